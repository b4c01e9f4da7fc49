//! Response envelope parsing for both sub-protocols

use serde::Deserialize;
use serde_json::Value;
use xmltree::Element;

use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
struct JsonEnvelope {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<Vec<Value>>,
}

/// Parse a JSON-RPC response body and return its `result` list
///
/// `{"error": [code, message]}` becomes [`ApiError::DeviceError`]; a body
/// carrying neither field is a parse error.
pub fn parse_json_response(body: &str) -> Result<Vec<Value>> {
    let envelope: JsonEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.error {
        let code = error.first().and_then(Value::as_i64).unwrap_or(-1);
        let message = error
            .get(1)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ApiError::DeviceError { code, message });
    }

    envelope
        .result
        .ok_or_else(|| ApiError::ParseError("Response has neither result nor error".to_string()))
}

/// Check an IRCC response body for a SOAP fault
///
/// Devices answer a successful `X_SendIRCC` with an empty
/// `X_SendIRCCResponse` element, and some firmware with an empty body.
pub fn check_ircc_response(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Ok(());
    }

    let xml = Element::parse(body.as_bytes()).map_err(|e| ApiError::ParseError(e.to_string()))?;

    let body = xml
        .get_child("Body")
        .ok_or_else(|| ApiError::ParseError("Missing SOAP Body".to_string()))?;

    if let Some(fault) = body.get_child("Fault") {
        let error_code = fault
            .get_child("detail")
            .and_then(|d| d.get_child("UPnPError"))
            .and_then(|e| e.get_child("errorCode"))
            .and_then(|c| c.get_text())
            .and_then(|t| t.trim().parse::<u16>().ok())
            .unwrap_or(500);
        return Err(ApiError::SoapFault(error_code));
    }

    Ok(())
}
