use std::path::PathBuf;

use core_catalog::{CatalogClient, TrackId};
use core_playback::{AudioChunkStream, AudioEncoding, StreamingClient};
use provider_local::{LocalCatalog, CHUNK_SIZE};

async fn write_file(dir: &std::path::Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    tokio::fs::write(&path, contents).await.unwrap();
    path
}

#[tokio::test]
async fn scan_falls_back_to_filename_for_unparseable_files() {
    let dir = tempfile::tempdir().unwrap();
    // Not a real mp3: tag parsing fails, the file is still catalogued.
    write_file(dir.path(), "garage song.mp3", b"not really audio").await;
    write_file(dir.path(), "notes.txt", b"ignored").await;

    let catalog = LocalCatalog::scan(dir.path()).await.unwrap();

    let genres = catalog.list_genres().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Unknown");

    let tracks = catalog.tracks_by_genre(genres[0].id).await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "garage song");
    assert_eq!(tracks[0].artist, "Unknown Artist");
}

#[tokio::test]
async fn find_track_is_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "alpha.mp3", b"x").await;

    let catalog = LocalCatalog::scan(dir.path()).await.unwrap();
    assert!(catalog.find_track("alpha").await.unwrap().is_some());
    assert!(catalog.find_track("Alpha").await.unwrap().is_none());
    assert!(catalog.find_track("alp").await.unwrap().is_none());
}

#[tokio::test]
async fn scan_recurses_and_assigns_stable_sequential_ids() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::create_dir(dir.path().join("sub")).await.unwrap();
    write_file(dir.path(), "b.mp3", b"x").await;
    write_file(&dir.path().join("sub"), "a.mp3", b"x").await;

    let catalog = LocalCatalog::scan(dir.path()).await.unwrap();
    let genres = catalog.list_genres().await.unwrap();
    let tracks = catalog.tracks_by_genre(genres[0].id).await.unwrap();

    assert_eq!(tracks.len(), 2);
    // Path-sorted, so ids are deterministic across runs.
    assert_eq!(tracks.iter().map(|t| t.id.0).collect::<Vec<_>>(), [1, 2]);
}

#[tokio::test]
async fn streaming_unknown_track_is_a_start_failure() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = LocalCatalog::scan(dir.path()).await.unwrap();
    let streaming = catalog.streaming();

    let err = streaming
        .open_stream(TrackId(99), AudioEncoding::Mp3)
        .await
        .expect_err("unknown id must not open");
    assert!(err.is_start_failure());
}

#[tokio::test]
async fn streaming_delivers_whole_file_in_ordered_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let payload: Vec<u8> = (0..(CHUNK_SIZE * 2 + 123)).map(|i| (i % 251) as u8).collect();
    write_file(dir.path(), "big.mp3", &payload).await;

    let catalog = LocalCatalog::scan(dir.path()).await.unwrap();
    let mut stream = catalog
        .streaming()
        .open_stream(TrackId(1), AudioEncoding::Mp3)
        .await
        .unwrap();

    let mut received = Vec::new();
    let mut chunks = 0;
    while let Some(chunk) = stream.next_chunk().await.unwrap() {
        assert!(chunk.len() <= CHUNK_SIZE);
        received.extend_from_slice(&chunk);
        chunks += 1;
    }

    assert_eq!(chunks, 3);
    assert_eq!(received, payload);
}
