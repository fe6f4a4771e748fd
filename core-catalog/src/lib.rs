//! # Catalog Module
//!
//! Domain model and client interface for the music catalog.
//!
//! ## Overview
//!
//! This module provides:
//! - Genre and track domain models with stable identifiers
//! - The `CatalogClient` trait implemented by catalog providers
//! - Catalog-specific error types
//!
//! The catalog is a read-only collaborator: callers query genres and
//! tracks, then hand the selected [`Track`] to the playback layer. Track
//! values are immutable once fetched.

pub mod client;
pub mod error;
pub mod models;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use models::{Genre, GenreId, Track, TrackId};
