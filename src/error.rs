use thiserror::Error;

#[derive(Error, Debug)]
pub enum LemmataError {
    // Request errors
    #[error("Query string parameter \"query\" is required.")]
    MissingQuery,

    #[error("No results found.")]
    NoResults,

    // Corpus errors
    #[error("malformed corpus file name: {name}")]
    InvalidFileName { name: String },

    #[error("metadata error: {0}")]
    Metadata(String),

    // Serialization errors
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("config error: {0}")]
    Config(String),

    // IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, LemmataError>;

impl LemmataError {
    pub fn status_code(&self) -> u16 {
        match self {
            LemmataError::MissingQuery => 400,

            LemmataError::NoResults => 404,

            _ => 500,
        }
    }
}
