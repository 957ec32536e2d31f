use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Failed to fetch preview: {0}")]
    FetchError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

impl From<reqwest::Error> for AudioError {
    fn from(err: reqwest::Error) -> Self {
        AudioError::FetchError(err.to_string())
    }
}
