// src/error.rs
use std::fmt;

/// Failure taxonomy for sourcing operations.
///
/// `Validation` and `InvalidInput` are raised before any network call and
/// carry a user-facing message. `Api`/`Network` wrap collaborator failures;
/// `Auth` is the 401 case and means stored credentials must be cleared.
#[derive(Debug)]
pub enum Error {
    Validation(String),
    InvalidInput(String),
    Api { status: u16, message: String },
    Network(String),
    Auth,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Validation failed: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Api { status, message } => {
                write!(f, "API request failed with status {}: {}", status, message)
            }
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Auth => write!(f, "Not authorized. Please log in again."),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl Error {
    /// Map a non-success HTTP status to the right variant.
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            Error::Auth
        } else {
            Error::Api { status, message }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_auth() {
        assert!(matches!(
            Error::from_status(401, "unauthorized".to_string()),
            Error::Auth
        ));
    }

    #[test]
    fn test_other_statuses_map_to_api() {
        match Error::from_status(500, "boom".to_string()) {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
