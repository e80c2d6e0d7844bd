use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("temperature must be a positive finite number, got {temperature}")]
    Domain { temperature: f64 },
}

pub type Result<T> = std::result::Result<T, SamplerError>;
