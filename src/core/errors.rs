use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanaflashError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP {status} from {url}: {body}")]
    Api { status: u16, url: String, body: String },

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("KanaflashError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for KanaflashError {
    fn from(error: std::io::Error) -> Self {
        KanaflashError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for KanaflashError {
    fn from(error: reqwest::Error) -> Self {
        KanaflashError::Reqwest(Box::new(error))
    }
}
