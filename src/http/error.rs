use thiserror::Error;

pub const GENERIC_ERROR_KEY: &str = "something_went_wrong";
pub const NOT_FOUND_KEY: &str = "song_not_found";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Catalog returned {status}: {}", .message.as_deref().unwrap_or(GENERIC_ERROR_KEY))]
    Status { status: u16, message: Option<String> },

    #[error("Malformed catalog response: {0}")]
    Decode(String),

    #[error("Track {0} not found")]
    NotFound(u64),
}

impl ApiError {
    /// Text shown on the error card: the catalog's own message when it sent
    /// one, otherwise the generic translation key.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiError::Transport(message) if !message.is_empty() => message.clone(),
            ApiError::NotFound(_) => NOT_FOUND_KEY.to_string(),
            _ => GENERIC_ERROR_KEY.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_is_surfaced() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Invalid value(s) for key(s): [term]".into()),
        };
        assert_eq!(err.user_message(), "Invalid value(s) for key(s): [term]");
    }

    #[test]
    fn falls_back_to_generic_key() {
        let err = ApiError::Status {
            status: 503,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_KEY);
        assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_ERROR_KEY);
        assert_eq!(ApiError::NotFound(3).user_message(), NOT_FOUND_KEY);
    }
}
