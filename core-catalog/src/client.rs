//! Catalog client abstraction.
//!
//! Providers (remote services, local library scans) implement this trait;
//! the interactive client consumes it as `Arc<dyn CatalogClient>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Genre, GenreId, Track};

/// Async catalog query interface.
///
/// All methods are read-only. A missing track is reported as `Ok(None)`
/// rather than an error so callers can distinguish "not found" from a
/// backend failure.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// List every genre known to the catalog.
    async fn list_genres(&self) -> Result<Vec<Genre>>;

    /// List the tracks belonging to a genre.
    ///
    /// An unknown genre id yields an empty list.
    async fn tracks_by_genre(&self, genre: GenreId) -> Result<Vec<Track>>;

    /// Look up a track by its exact title (case-sensitive).
    async fn find_track(&self, title: &str) -> Result<Option<Track>>;
}
