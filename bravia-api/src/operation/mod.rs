//! Operation framework for typed JSON-RPC calls
//!
//! Every JSON-RPC method the crate uses is a zero-sized type implementing
//! [`BraviaOperation`]. The trait ties together the service endpoint, the
//! method name, how to turn a request into the single parameter object and
//! how to read the `result` list back into a typed response.

pub mod macros;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::request::build_json_request;
use crate::service::Service;

/// Base trait for all Bravia JSON-RPC operations
pub trait BraviaOperation {
    /// The request type; `()` for methods that take no parameters
    type Request: Serialize;

    /// The typed response
    type Response;

    /// The service endpoint this method lives on
    const SERVICE: Service;

    /// The JSON-RPC method name
    const METHOD: &'static str;

    /// Build the single parameter object for this request
    ///
    /// Requests that serialize to `null` (the unit type) carry no parameter
    /// object, which the request builder turns into an empty `params` list.
    fn build_params(request: &Self::Request) -> Result<Option<Value>> {
        match serde_json::to_value(request)? {
            Value::Null => Ok(None),
            params => Ok(Some(params)),
        }
    }

    /// Build the full request body
    fn build_body(request: &Self::Request) -> Result<String> {
        let params = Self::build_params(request)?;
        Ok(build_json_request(Self::METHOD, params.as_ref()))
    }

    /// Parse the `result` list of a successful response
    ///
    /// Most methods answer with a single object in `result[0]`; see
    /// [`parse_first`].
    fn parse_result(result: &[Value]) -> Result<Self::Response>;

    /// Human-readable metadata, used in log lines
    fn metadata() -> OperationMetadata {
        OperationMetadata {
            service: Self::SERVICE.name(),
            method: Self::METHOD,
        }
    }
}

/// Metadata about an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    /// The service name (e.g. "avContent")
    pub service: &'static str,
    /// The method name (e.g. "getPlayingContentInfo")
    pub method: &'static str,
}

/// Deserialize `result[0]`
pub fn parse_first<T: DeserializeOwned>(result: &[Value]) -> Result<T> {
    let first = result
        .first()
        .ok_or_else(|| ApiError::ParseError("Empty result list".to_string()))?;
    Ok(serde_json::from_value(first.clone())?)
}
