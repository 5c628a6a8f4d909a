use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvcGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid capability rule: {message}")]
    InvalidRule { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

pub type Result<T> = std::result::Result<T, SvcGraphError>;
