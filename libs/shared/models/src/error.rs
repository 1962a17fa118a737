use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl AppError {
    /// Maps a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => AppError::Unauthorized(body),
            404 => AppError::NotFound(body),
            _ => AppError::Server { status, message: body },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Translation key for the user-facing message of this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "errors.validation",
            AppError::Unauthorized(_) => "errors.unauthorized",
            AppError::NotFound(_) => "errors.not_found",
            AppError::Network(_) | AppError::Server { .. } | AppError::Decode(_) => "errors.generic",
        }
    }
}
