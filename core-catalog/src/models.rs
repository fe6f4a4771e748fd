//! Domain models for the music catalog
//!
//! Catalog records are immutable value types: once fetched from a
//! provider they are never mutated, only moved or borrowed into the
//! playback layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenreId(pub u32);

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// A music genre used to scope catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Unique identifier
    pub id: GenreId,
    /// Display name
    pub name: String,
}

/// A single track in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier
    pub id: TrackId,
    /// Track title
    pub title: String,
    /// Track artist
    pub artist: String,
    /// Release year, when known
    pub release_year: Option<u32>,
    /// Human-readable duration (e.g. "3:41")
    pub duration: String,
    /// Genre this track belongs to
    pub genre: Genre,
}
