//! Local music directory catalog.
//!
//! Scans a directory tree once at startup, extracts tags with `lofty`,
//! and serves catalog queries from memory. Files whose tags cannot be
//! read still become tracks with filename-derived titles; a missing
//! genre tag lands the track in "Unknown".

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use tokio::fs;
use tracing::{debug, info, warn};

use core_catalog::{CatalogClient, Genre, GenreId, Track, TrackId};

use crate::error::{ProviderError, Result};
use crate::streaming::LocalStreaming;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a", "aac"];

/// In-memory catalog built from one directory scan.
pub struct LocalCatalog {
    genres: Vec<Genre>,
    tracks: Vec<Track>,
    paths: Arc<HashMap<TrackId, PathBuf>>,
}

impl LocalCatalog {
    /// Scan `root` recursively and build the catalog.
    ///
    /// # Errors
    ///
    /// Fails only when the root directory itself cannot be read;
    /// individual unreadable files are skipped with a warning.
    pub async fn scan(root: &Path) -> Result<Self> {
        let mut audio_files = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                if dir == root {
                    ProviderError::Scan(format!("Cannot read {}: {}", dir.display(), e))
                } else {
                    ProviderError::Io(e)
                }
            })?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if is_audio_file(&path) {
                    audio_files.push(path);
                }
            }
        }
        // Stable ids across runs over the same tree.
        audio_files.sort();

        let mut genres: Vec<Genre> = Vec::new();
        let mut genre_ids: HashMap<String, GenreId> = HashMap::new();
        let mut tracks = Vec::new();
        let mut paths = HashMap::new();

        for path in audio_files {
            let id = TrackId(tracks.len() as u32 + 1);
            let meta = extract_metadata(&path).await;

            let genre_key = meta.genre.trim().to_lowercase();
            let genre_id = *genre_ids.entry(genre_key).or_insert_with(|| {
                let id = GenreId(genres.len() as u32 + 1);
                genres.push(Genre {
                    id,
                    name: meta.genre.trim().to_string(),
                });
                id
            });
            let genre = genres
                .iter()
                .find(|g| g.id == genre_id)
                .cloned()
                .unwrap_or(Genre {
                    id: genre_id,
                    name: meta.genre,
                });

            debug!(track = %id, title = %meta.title, genre = %genre.name, "Catalogued {}", path.display());
            tracks.push(Track {
                id,
                title: meta.title,
                artist: meta.artist,
                release_year: meta.year,
                duration: meta.duration,
                genre,
            });
            paths.insert(id, path);
        }

        info!(
            tracks = tracks.len(),
            genres = genres.len(),
            "Catalog scan of {} complete",
            root.display()
        );

        Ok(Self {
            genres,
            tracks,
            paths: Arc::new(paths),
        })
    }

    /// Streaming backend over the same scanned files.
    pub fn streaming(&self) -> LocalStreaming {
        LocalStreaming::new(Arc::clone(&self.paths))
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[async_trait]
impl CatalogClient for LocalCatalog {
    async fn list_genres(&self) -> core_catalog::Result<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn tracks_by_genre(&self, genre: GenreId) -> core_catalog::Result<Vec<Track>> {
        Ok(self
            .tracks
            .iter()
            .filter(|t| t.genre.id == genre)
            .cloned()
            .collect())
    }

    async fn find_track(&self, title: &str) -> core_catalog::Result<Option<Track>> {
        Ok(self.tracks.iter().find(|t| t.title == title).cloned())
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

struct FileMetadata {
    title: String,
    artist: String,
    year: Option<u32>,
    duration: String,
    genre: String,
}

async fn extract_metadata(path: &Path) -> FileMetadata {
    let fallback_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string();
    let mut meta = FileMetadata {
        title: fallback_title,
        artist: "Unknown Artist".to_string(),
        year: None,
        duration: "0:00".to_string(),
        genre: "Unknown".to_string(),
    };

    let file_data = match fs::read(path).await {
        Ok(data) => data,
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return meta;
        }
    };

    let probe = match Probe::new(std::io::Cursor::new(&file_data)).guess_file_type() {
        Ok(probe) => probe,
        Err(e) => {
            warn!("Cannot probe {}: {}", path.display(), e);
            return meta;
        }
    };
    let tagged_file = match probe.read() {
        Ok(f) => f,
        Err(e) => {
            warn!("Cannot parse tags of {}: {}", path.display(), e);
            return meta;
        }
    };

    meta.duration = format_duration(tagged_file.properties().duration());

    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
    if let Some(tag) = tag {
        if let Some(title) = tag.title() {
            let title = title.trim();
            if !title.is_empty() {
                meta.title = title.to_string();
            }
        }
        if let Some(artist) = tag.artist() {
            let artist = artist.trim();
            if !artist.is_empty() {
                meta.artist = artist.to_string();
            }
        }
        if let Some(genre) = tag.genre() {
            let genre = genre.trim();
            if !genre.is_empty() {
                meta.genre = genre.to_string();
            }
        }
        meta.year = tag.year();
    }

    meta
}

fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total >= 3600 {
        format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    } else {
        format!("{}:{:02}", total / 60, total % 60)
    }
}
