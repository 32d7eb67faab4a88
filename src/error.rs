pub type IiResult<T> = Result<T, IiError>;

#[derive(Debug, thiserror::Error)]
pub enum IiError {
    #[error("[Concurrent Error] {0}")]
    ConcurrentError(#[from] ::tokio::task::JoinError),

    #[error("[HTTP Request Error] {0}")]
    HttpRequestError(#[from] ::reqwest::Error),

    #[error("[HTTP Status Error] [{request}] {status}")]
    HttpStatusError {
        status: u16,
        request: String,
        message: Option<String>,
    },

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("[IO Error] {0}")]
    IoError(#[from] std::io::Error),

    #[error("[Not Exists] {message}")]
    NotExists { code: &'static str, message: String },

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse DataTime Error] {0}")]
    ParseDataTimeError(#[from] chrono::ParseError),

    #[error("[Parse URL Error] {0}")]
    ParseUrlError(#[from] url::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),
}

impl IiError {
    /// The human readable `{"error": ...}` text a backend attached to a non-2xx response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            IiError::HttpStatusError {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = IiError::HttpStatusError {
            status: 404,
            request: "http://127.0.0.1:5001/api/company/Acme".to_string(),
            message: Some("Company 'Acme' not found".to_string()),
        };
        assert_eq!(err.server_message(), Some("Company 'Acme' not found"));
        assert_eq!(
            err.to_string(),
            "[HTTP Status Error] [http://127.0.0.1:5001/api/company/Acme] 404"
        );

        let err = IiError::Invalid {
            code: "INVALID_RESPONSE",
            message: "Invalid response".to_string(),
        };
        assert_eq!(err.server_message(), None);
    }
}
