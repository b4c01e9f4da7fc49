use thiserror::Error;
use transport::TransportError;

/// High-level API errors for Bravia operations
///
/// These abstract over the HTTP transport and the two payload formats
/// (JSON-RPC and IRCC/SOAP) so callers can decide how to react without
/// knowing which sub-protocol a command used.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The device could not be reached: connection refused, timeout, DNS
    /// failure. A television in standby is the most common cause.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The device answered with a non-success HTTP status
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Response parsing error
    ///
    /// The device answered but the body was not the expected JSON envelope
    /// or XML document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// SOAP fault returned by the IRCC endpoint
    #[error("SOAP fault: error code {0}")]
    SoapFault(u16),

    /// Error envelope returned by a JSON-RPC endpoint (`{"error": [code, message]}`)
    #[error("Device error {code}: {message}")]
    DeviceError { code: i64, message: String },

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Wake-on-LAN packet could not be sent
    #[error("Wake-on-LAN error: {0}")]
    WakeOnLan(String),
}

impl ApiError {
    /// True when the television could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::NetworkError(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Network(msg) => ApiError::NetworkError(msg),
            TransportError::Status { code, .. } => ApiError::HttpStatus(code),
            TransportError::Body(msg) => ApiError::ParseError(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::ParseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_conversion() {
        let api_error: ApiError = TransportError::Network("connection refused".to_string()).into();
        assert!(matches!(api_error, ApiError::NetworkError(_)));
        assert!(api_error.is_unreachable());

        let api_error: ApiError = TransportError::Status {
            code: 404,
            body: String::new(),
        }
        .into();
        assert!(matches!(api_error, ApiError::HttpStatus(404)));
        assert!(!api_error.is_unreachable());

        let api_error: ApiError = TransportError::Body("truncated".to_string()).into();
        assert!(matches!(api_error, ApiError::ParseError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::DeviceError {
            code: 7,
            message: "Illegal State".to_string(),
        };
        assert_eq!(format!("{}", err), "Device error 7: Illegal State");

        let soap_fault = ApiError::SoapFault(401);
        assert_eq!(format!("{}", soap_fault), "SOAP fault: error code 401");
    }
}
