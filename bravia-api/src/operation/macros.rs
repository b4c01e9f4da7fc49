//! Declarative macro for JSON-RPC operation definitions
//!
//! Instead of writing the request struct, the marker type and the trait
//! implementation by hand, operations are declared in a few lines.

/// Define a Bravia JSON-RPC operation
///
/// Generates `<Operation>Request` (camelCase on the wire, or `()` when the
/// method takes no parameters), the `<Operation>` marker type and its
/// [`BraviaOperation`](crate::operation::BraviaOperation) implementation.
/// `parse` replaces the default, which deserializes `result[0]` with
/// [`parse_first`](crate::operation::parse_first).
///
/// # Example
/// ```rust,ignore
/// define_bravia_operation! {
///     operation: SetPlayContent,
///     method: "setPlayContent",
///     service: AvContent,
///     request: {
///         uri: String,
///     },
///     response: (),
///     parse: |_result| Ok(()),
/// }
/// ```
#[macro_export]
macro_rules! define_bravia_operation {
    (
        operation: $op:ident,
        method: $method:literal,
        service: $service:ident,
        request: (),
        response: $response:ty
        $(, parse: |$result:ident| $parse:expr)? $(,)?
    ) => {
        paste::paste! {
            pub type [<$op Request>] = ();

            $crate::define_bravia_operation!(@impl $op, $method, $service, $response $(, |$result| $parse)?);
        }
    };
    (
        operation: $op:ident,
        method: $method:literal,
        service: $service:ident,
        request: {
            $($field:ident: $field_type:ty),+ $(,)?
        },
        response: $response:ty
        $(, parse: |$result:ident| $parse:expr)? $(,)?
    ) => {
        paste::paste! {
            #[derive(serde::Serialize, Clone, Debug, PartialEq)]
            #[serde(rename_all = "camelCase")]
            pub struct [<$op Request>] {
                $(pub $field: $field_type,)+
            }

            $crate::define_bravia_operation!(@impl $op, $method, $service, $response $(, |$result| $parse)?);
        }
    };
    (@impl $op:ident, $method:literal, $service:ident, $response:ty) => {
        $crate::define_bravia_operation!(
            @impl $op, $method, $service, $response,
            |result| $crate::operation::parse_first(result)
        );
    };
    (@impl $op:ident, $method:literal, $service:ident, $response:ty, |$result:ident| $parse:expr) => {
        paste::paste! {
            pub struct $op;

            impl $crate::operation::BraviaOperation for $op {
                type Request = [<$op Request>];
                type Response = $response;

                const SERVICE: $crate::service::Service = $crate::service::Service::$service;
                const METHOD: &'static str = $method;

                fn parse_result(
                    $result: &[serde_json::Value],
                ) -> Result<Self::Response, $crate::error::ApiError> {
                    $parse
                }
            }
        }
    };
}
