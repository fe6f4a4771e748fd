use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
