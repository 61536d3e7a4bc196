use std::io;
use std::path::Path;

use crate::console::{is_yes, Console};
use crate::directory::ensure_directory;
use crate::error::FetchError;
use crate::fetch::{Fetcher, HttpSource};

pub const URL_PROMPT: &str = "Enter the image URL (or 'quit' to exit): ";
pub const AGAIN_PROMPT: &str = "Download another image? (y/n): ";

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub fn print_banner(console: &mut impl Console, dir: &Path) {
    console.say(&"=".repeat(50));
    console.say("           IMAGE DOWNLOADER");
    console.say(&"=".repeat(50));
    console.say(&format!(
        "This tool downloads images from URLs and saves them to '{}' directory",
        dir.display()
    ));
    console.say("");
}

/// Runs a session if the fetcher could be built; otherwise reports why and
/// ends without prompting.
pub fn start<S: HttpSource>(
    fetcher: Result<Fetcher<S>, FetchError>,
    console: &mut impl Console,
    dir: &Path,
) -> io::Result<SessionSummary> {
    match fetcher {
        Ok(fetcher) => run(&fetcher, console, dir),
        Err(e) => {
            log::error!("Cannot start downloader: {:?}", e);
            console.say(&e.to_string());
            Ok(SessionSummary::default())
        }
    }
}

/// Runs the prompt loop until the user quits or input ends.
///
/// A directory that cannot be created ends the session before the first
/// prompt. Download failures are reported and never end the session.
pub fn run<S: HttpSource>(
    fetcher: &Fetcher<S>,
    console: &mut impl Console,
    dir: &Path,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    if let Err(e) = ensure_directory(dir) {
        log::error!("Cannot create {:?}: {}", e.path, e.source);
        console.say(&e.to_string());
        console.say("Cannot proceed without download directory.");
        return Ok(summary);
    }
    console.say(&format!("Directory '{}' is ready.", dir.display()));

    loop {
        console.say("");
        console.say(&"-".repeat(30));

        let Some(input) = console.prompt(URL_PROMPT)? else {
            break;
        };
        let url = input.trim();

        if QUIT_WORDS.iter().any(|w| url.eq_ignore_ascii_case(w)) {
            break;
        }

        if url.is_empty() {
            console.say("Please enter a valid URL.");
            continue;
        }

        if fetcher.fetch_image(url, dir, console).is_some() {
            summary.succeeded += 1;
            console.say("✓ Download successful!");
        } else {
            summary.failed += 1;
            console.say("✗ Download failed.");
        }

        console.say("");
        let again = console.prompt(AGAIN_PROMPT)?;
        if !is_yes(again.as_deref()) {
            break;
        }
    }

    console.say("Goodbye!");
    log::info!(
        "Session finished: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed
    );
    Ok(summary)
}
