//! Request body construction for the two Bravia sub-protocols
//!
//! Both builders are pure functions: they never fail and never touch the
//! network. The client pairs their output with the matching endpoint and
//! headers.

use serde_json::{json, Value};

/// Service URI of the IRCC SOAP service
pub const IRCC_SERVICE_URI: &str = "urn:schemas-sony-com:service:IRCC:1";

/// Value of the `SOAPACTION` header for IRCC requests, quotes included
pub const IRCC_SOAP_ACTION: &str = "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"";

/// JSON-RPC request id; the device does not correlate on it
pub const JSON_REQUEST_ID: u32 = 1;

/// JSON-RPC protocol version sent with every request
pub const JSON_API_VERSION: &str = "1.0";

/// Build a JSON-RPC request body
///
/// `params` is the single parameter object of the method. It is wrapped in a
/// one-element list when present; an absent object produces an empty list.
/// Callers pass the object itself, never a list.
///
/// ```
/// use bravia_api::request::build_json_request;
/// use serde_json::json;
///
/// let body = build_json_request("setPlayContent", Some(&json!({"uri": "tv:dvbt?trip=1.2.3"})));
/// let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
/// assert_eq!(parsed["params"][0]["uri"], "tv:dvbt?trip=1.2.3");
/// ```
pub fn build_json_request(method: &str, params: Option<&Value>) -> String {
    let params: Vec<&Value> = params.into_iter().collect();
    json!({
        "method": method,
        "params": params,
        "id": JSON_REQUEST_ID,
        "version": JSON_API_VERSION,
    })
    .to_string()
}

/// Build the SOAP envelope sending one IR code through `X_SendIRCC`
///
/// The code is embedded verbatim as the text of `<IRCCCode>`. IR codes are
/// base64 tokens, so no escaping is applied; a string containing XML
/// metacharacters produces a malformed envelope that the device rejects.
pub fn build_ircc_envelope(code: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">"#,
            r#"<s:Body><u:X_SendIRCC xmlns:u="{service_uri}"><IRCCCode>{code}</IRCCCode></u:X_SendIRCC></s:Body>"#,
            r#"</s:Envelope>"#
        ),
        service_uri = IRCC_SERVICE_URI,
        code = code
    )
}
