use thiserror::Error;

/// Everything that can go wrong between a button press and the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] rusqlite::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Background task failed: {0}")]
    Background(#[from] tokio::task::JoinError),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl ApiError {
    /// Text for a toast: the server's own message when it sent one, the
    /// page's fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ApiError::Validation(message) | ApiError::Spreadsheet(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. } | ApiError::NotAuthenticated)
    }
}

/// Iced messages must be `Clone`; results travel through them as this.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub message: Option<String>,
    pub unauthorized: bool,
    pub detail: String,
}

impl Failure {
    pub fn text(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        let message = match &err {
            ApiError::Status { message: Some(m), .. } if !m.trim().is_empty() => Some(m.clone()),
            ApiError::Validation(m) | ApiError::Spreadsheet(m) => Some(m.clone()),
            _ => None,
        };
        Failure {
            message,
            unauthorized: err.is_unauthorized(),
            detail: err.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, Failure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Status { status: 409, message: Some("Email already used".into()) };
        assert_eq!(err.user_message("Something went wrong"), "Email already used");
    }

    #[test]
    fn fallback_when_server_is_silent() {
        let err = ApiError::Status { status: 500, message: None };
        assert_eq!(err.user_message("Failed to fetch students"), "Failed to fetch students");

        let blank = ApiError::Status { status: 500, message: Some("  ".into()) };
        assert_eq!(blank.user_message("Import failed"), "Import failed");
    }

    #[test]
    fn failure_keeps_unauthorized_flag() {
        let failure: Failure = ApiError::Status { status: 401, message: None }.into();
        assert!(failure.unauthorized);
        assert_eq!(failure.text("Failed"), "Failed");

        let failure: Failure = ApiError::Validation("Excel file is empty".into()).into();
        assert!(!failure.unauthorized);
        assert_eq!(failure.text("Failed"), "Excel file is empty");
    }
}
