use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("symbol not in vocabulary: {0:?}")]
    Lookup(String),
    #[error("token id {id} out of range for vocabulary of size {size}")]
    Range { id: u32, size: usize },
    #[error("sampler error: {0}")]
    Sampler(#[from] mg_sampler::SamplerError),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
