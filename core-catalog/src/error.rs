use thiserror::Error;

/// Errors that can occur while querying a catalog provider.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog backend could not be reached or failed mid-request.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with data the client could not interpret.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
