use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the deals gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// The two failure kinds the application distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkError,
    DataShapeError,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Network(_) | GatewayError::Status(_) | GatewayError::Build(_) => {
                ErrorKind::NetworkError
            }
            GatewayError::DataShape(_) => ErrorKind::DataShapeError,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Network(e) if e.is_timeout())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::DataShape(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_are_network_kind() {
        let err = GatewayError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind(), ErrorKind::NetworkError);
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_json_errors_are_data_shape_kind() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = GatewayError::from(json_err);
        assert_eq!(err.kind(), ErrorKind::DataShapeError);
    }
}
