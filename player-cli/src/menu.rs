//! Interactive menu flow.
//!
//! Sequential request/response navigation around the playback core:
//! browse genres, list tracks, search by exact title, confirm, play.
//! Catalog failures print and drop the operator back one level; only the
//! playback coordinator involves any concurrency.

use std::io::Write;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use core_catalog::{CatalogClient, Genre, Track};
use core_playback::{PlaybackCoordinator, PlaybackOutcome, STOP_COMMAND};
use core_runtime::logging;

use crate::console::Console;

pub struct Menu {
    catalog: Arc<dyn CatalogClient>,
    coordinator: PlaybackCoordinator,
    console: Console,
    scope: CancellationToken,
}

impl Menu {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        coordinator: PlaybackCoordinator,
        console: Console,
        scope: CancellationToken,
    ) -> Self {
        Self {
            catalog,
            coordinator,
            console,
            scope,
        }
    }

    /// Main menu loop; returns when the operator quits or stdin closes.
    pub async fn run(&self) {
        loop {
            println!("\n{}", "=".repeat(50));
            println!("MUSIC PLAYER - MAIN MENU");
            println!("{}", "=".repeat(50));
            println!("1. Browse genres");
            println!("2. Quit");

            match self.prompt("Select an option (1-2): ").await {
                Some(input) => match input.trim() {
                    "1" => self.browse_genres().await,
                    "2" => {
                        println!("\nThanks for listening. Goodbye!");
                        return;
                    }
                    _ => println!("\nInvalid option. Please select 1 or 2."),
                },
                None => return,
            }
        }
    }

    async fn browse_genres(&self) {
        println!("\nFetching available genres...");
        let genres = match self.catalog.list_genres().await {
            Ok(genres) => genres,
            Err(e) => {
                println!("Could not fetch genres: {}", e);
                self.pause().await;
                return;
            }
        };
        if genres.is_empty() {
            println!("No genres available right now.");
            self.pause().await;
            return;
        }

        loop {
            let Some(genre) = self.select_genre(&genres).await else {
                return;
            };
            if self.browse_genre_tracks(&genre).await {
                // Playback was interrupted: unwind to the main menu.
                return;
            }
        }
    }

    /// Show the genre list until the operator picks one or goes back.
    async fn select_genre(&self, genres: &[Genre]) -> Option<Genre> {
        loop {
            println!("\n{}", "=".repeat(40));
            println!("AVAILABLE GENRES");
            println!("{}", "=".repeat(40));
            for genre in genres {
                println!("{}. {}", genre.id, genre.name);
            }
            println!("0. Back to main menu");

            let input = self.prompt("Select a genre: ").await?;
            let input = input.trim();
            if input == "0" {
                return None;
            }
            let Ok(id) = input.parse::<u32>() else {
                println!("Please enter a valid number.");
                continue;
            };
            match genres.iter().find(|g| g.id.0 == id) {
                Some(genre) => return Some(genre.clone()),
                None => println!("Genre {} not found. Try again.", id),
            }
        }
    }

    /// Returns `true` when playback ended via operator interrupt.
    async fn browse_genre_tracks(&self, genre: &Genre) -> bool {
        println!("\nLooking up tracks for '{}'...", genre.name);
        let tracks = match self.catalog.tracks_by_genre(genre.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                println!("Could not fetch tracks: {}", e);
                self.pause().await;
                return false;
            }
        };
        if tracks.is_empty() {
            println!("No tracks found for '{}'.", genre.name);
            self.pause().await;
            return false;
        }

        loop {
            println!("\n{}", "=".repeat(50));
            println!("TRACKS - {}", genre.name.to_uppercase());
            println!("{}", "=".repeat(50));
            for (i, track) in tracks.iter().enumerate() {
                println!("{}. {} - {}", i + 1, track.title, track.artist);
            }
            println!("\nType the exact title of a track to play it.");

            let Some(title) = self.prompt_title().await else {
                return false;
            };
            if self.search_and_play(&title).await {
                return true;
            }
        }
    }

    async fn prompt_title(&self) -> Option<String> {
        loop {
            let input = self
                .prompt("Track title (or 'back' to return): ")
                .await?;
            let input = input.trim();
            if input.eq_ignore_ascii_case("back") {
                return None;
            }
            if input.is_empty() {
                println!("The title cannot be empty. Try again.");
                continue;
            }
            return Some(input.to_string());
        }
    }

    /// Returns `true` when playback ended via operator interrupt.
    async fn search_and_play(&self, title: &str) -> bool {
        println!("\nSearching for '{}'...", title);
        let track = match self.catalog.find_track(title).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                println!("'{}' was not found.", title);
                println!("Check that the title matches the list exactly.");
                self.pause().await;
                return false;
            }
            Err(e) => {
                println!("Search failed: {}", e);
                self.pause().await;
                return false;
            }
        };

        print_track_details(&track);
        if !self.confirm_playback().await {
            return false;
        }
        self.play(&track).await
    }

    async fn confirm_playback(&self) -> bool {
        loop {
            let Some(input) = self.prompt("Play this track? (y/n): ").await else {
                return false;
            };
            match input.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer 'y' or 'n'."),
            }
        }
    }

    /// Returns `true` when playback ended via operator interrupt.
    async fn play(&self, track: &Track) -> bool {
        println!("\nStarting playback of '{}'...", track.title);
        println!(
            "Type '{}' and press Enter at any time to stop and return to the menu.",
            STOP_COMMAND
        );

        // Keep decoder/device diagnostics out of the prompt; the
        // coordinator restores the filter on natural completion.
        logging::quiet();

        match self
            .coordinator
            .play(track, self.console.control(), &self.scope)
            .await
        {
            Ok(PlaybackOutcome::Interrupted) => {
                println!("\nPlayback stopped by user.");
                true
            }
            Ok(PlaybackOutcome::Completed) => {
                println!("\nPlayback finished.");
                self.pause().await;
                false
            }
            Err(e) => {
                logging::restore();
                warn!("Playback failed to start: {}", e);
                println!("Could not start playback: {}", e);
                self.pause().await;
                false
            }
        }
    }

    async fn prompt(&self, message: &str) -> Option<String> {
        print!("\n{}", message);
        let _ = std::io::stdout().flush();
        self.console.read_line().await
    }

    async fn pause(&self) {
        print!("\nPress Enter to continue...");
        let _ = std::io::stdout().flush();
        self.console.read_line().await;
    }
}

fn print_track_details(track: &Track) {
    println!("\n{}", "=".repeat(45));
    println!("TRACK DETAILS");
    println!("{}", "=".repeat(45));
    println!("Title:    {}", track.title);
    println!("Artist:   {}", track.artist);
    if let Some(year) = track.release_year {
        println!("Year:     {}", year);
    }
    println!("Duration: {}", track.duration);
    println!("Genre:    {}", track.genre.name);
    println!("{}", "=".repeat(45));
}
