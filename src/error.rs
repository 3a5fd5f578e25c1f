use thiserror::Error;

/// Everything that can end a submit or list operation.
#[derive(Error, Debug)]
pub enum GuestbookError {
    /// A required form field was empty after trimming.
    #[error("Please fill in all fields")]
    Validation,

    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint answered with HTTP {0}")]
    HttpStatus(u16),

    /// The endpoint answered but reported a failure status.
    #[error("{0}")]
    Application(String),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GuestbookError {
    /// Failures on the wire rather than ones the server chose to report.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GuestbookError::Transport(_) | GuestbookError::HttpStatus(_) | GuestbookError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transport_failures() {
        assert!(GuestbookError::HttpStatus(502).is_transport());
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();
        assert!(GuestbookError::Decode(decode).is_transport());
        assert!(!GuestbookError::Application("Wrong password".into()).is_transport());
        assert!(!GuestbookError::Validation.is_transport());
    }

    #[test]
    fn application_error_shows_server_text() {
        let err = GuestbookError::Application("Sheet is full".into());
        assert_eq!(err.to_string(), "Sheet is full");
    }
}
