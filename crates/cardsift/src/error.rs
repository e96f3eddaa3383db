use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    /// A container the engine cannot run without (filter root or list root).
    #[error("Missing required markup: {0}")]
    MissingMarkup(&'static str),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;
