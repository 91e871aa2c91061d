use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog document failed schema validation: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, CuratorError>;
