use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("validation_error - {0}")]
    Validation(String),
    #[error("not_found - {0}")]
    NotFound(String),
    #[error("transport_error - {0}")]
    Transport(String),
    #[error("invalid_data - {0}")]
    InvalidData(String),
    #[error("unauthenticated - sign in to continue")]
    Unauthenticated,
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::Transport(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Transport(_) => "transport_error",
            Self::InvalidData(_) => "invalid_data",
            Self::Unauthenticated => "unauthenticated",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Transport(message)
            | Self::InvalidData(message) => message,
            Self::Unauthenticated => "sign in to continue",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidData(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_includes_code_and_message() {
        let err = AppError::not_found("todo not found");
        assert_eq!(err.to_string(), "not_found - todo not found");
    }

    #[test]
    fn io_errors_map_to_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(io);
        assert_eq!(err.code(), "transport_error");
    }

    #[test]
    fn unauthenticated_has_fixed_message() {
        assert_eq!(
            AppError::Unauthenticated.to_string(),
            "unauthenticated - sign in to continue"
        );
    }
}
