//! Interactive streaming music player over a local music directory.
//!
//! Usage: `player-cli [MUSIC_DIR]` (defaults to `./music`).

mod audio;
mod console;
mod menu;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use core_playback::PlaybackCoordinator;
use core_runtime::logging::{init_logging, LoggingConfig};
use provider_local::LocalCatalog;

use crate::audio::RodioRenderer;
use crate::console::Console;
use crate::menu::Menu;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default()).context("failed to initialize logging")?;

    let music_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./music"));

    println!("Scanning {} for audio files...", music_dir.display());
    let catalog = LocalCatalog::scan(&music_dir)
        .await
        .with_context(|| format!("failed to scan {}", music_dir.display()))?;
    if catalog.is_empty() {
        println!(
            "No audio files found under {}. Add some and restart.",
            music_dir.display()
        );
        return Ok(());
    }

    let streaming = Arc::new(catalog.streaming());
    let coordinator = PlaybackCoordinator::new(streaming, Arc::new(RodioRenderer));

    let scope = CancellationToken::new();
    let menu = Menu::new(
        Arc::new(catalog),
        coordinator,
        Console::stdin(),
        scope.clone(),
    );
    menu.run().await;

    // Release anything still parked on the playback scope before exit.
    scope.cancel();
    Ok(())
}
