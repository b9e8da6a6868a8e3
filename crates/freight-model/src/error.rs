use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown column role: {0}")]
    UnknownRole(String),
    #[error("unknown match mode: {0}")]
    UnknownMatchMode(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
