mod reqwest_source;

#[cfg(test)]
mod mock_source;

use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::console::{is_yes, Console};
use crate::error::FetchError;
use crate::filename::{create_unique, resolve_filename};

pub use reqwest_source::ReqwestSource;

#[cfg(test)]
pub use mock_source::MockSource;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const CONFIRM_PROMPT: &str = "Do you want to continue downloading? (y/n): ";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub chunk_size: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            chunk_size: 8192,
            max_redirects: 10,
        }
    }
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A successful response whose body has not been read yet.
pub struct HttpResponse {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

pub trait HttpSource {
    /// Issues a GET. Non-success statuses come back as `FetchError::HttpStatus`.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved(SavedImage),
    Cancelled,
}

pub struct Fetcher<S: HttpSource = ReqwestSource> {
    source: S,
    chunk_size: usize,
}

impl Fetcher<ReqwestSource> {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let source = ReqwestSource::new(config)?;
        Ok(Self::with_source(source, config.chunk_size))
    }
}

impl<S: HttpSource> Fetcher<S> {
    pub fn with_source(source: S, chunk_size: usize) -> Self {
        Self {
            source,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Downloads `url` into `dir`, printing any failure to the console.
    /// Returns the saved path, or `None` if nothing was written.
    pub fn fetch_image(&self, url: &str, dir: &Path, console: &mut impl Console) -> Option<PathBuf> {
        match self.download(url, dir, console) {
            Ok(FetchOutcome::Saved(image)) => Some(image.path),
            Ok(FetchOutcome::Cancelled) => {
                log::info!("Download of {} cancelled by user", url);
                None
            }
            Err(e) => {
                log::warn!("Download of {} failed: {:?}", url, e);
                console.say(&e.to_string());
                None
            }
        }
    }

    pub fn download(
        &self,
        url: &str,
        dir: &Path,
        console: &mut impl Console,
    ) -> Result<FetchOutcome, FetchError> {
        log::info!("Downloading from {} into {:?}", url, dir);
        console.say(&format!("Connecting to: {url}"));

        let mut response = self.source.get(url)?;

        let content_type = response
            .content_type
            .take()
            .unwrap_or_default()
            .to_lowercase();

        if !content_type.starts_with("image/") {
            console.say(&format!(
                "Warning: Content-Type is '{content_type}' - may not be an image"
            ));
            let answer = console
                .prompt(CONFIRM_PROMPT)
                .map_err(|e| FetchError::Unexpected(e.to_string()))?;
            if !is_yes(answer.as_deref()) {
                console.say("Download cancelled by user.");
                return Ok(FetchOutcome::Cancelled);
            }
        }

        let filename = resolve_filename(url, &content_type);
        let (path, mut file) =
            create_unique(dir, &filename).map_err(|e| FetchError::io(dir.join(&filename), e))?;

        console.say(&format!("Downloading to: {}", path.display()));

        let size = self.stream_body(
            &mut response.body,
            &mut file,
            &path,
            response.content_length,
            console,
        )?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());

        console.say("");
        console.say("Download completed successfully!");
        console.say(&format!("Saved as: {file_name}"));
        console.say(&format!("File size: {} bytes", group_thousands(size)));
        log::info!("Download completed: {:?} ({} bytes)", path, size);

        Ok(FetchOutcome::Saved(SavedImage {
            path,
            file_name,
            size,
        }))
    }

    fn stream_body(
        &self,
        body: &mut dyn Read,
        file: &mut File,
        path: &Path,
        total: Option<u64>,
        console: &mut impl Console,
    ) -> Result<u64, FetchError> {
        let total = total.filter(|t| *t > 0);
        let mut buf = vec![0u8; self.chunk_size];
        let mut downloaded: u64 = 0;

        loop {
            let n = match body.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FetchError::body_read(e)),
            };

            file.write_all(&buf[..n])
                .map_err(|e| FetchError::io(path, e))?;
            downloaded += n as u64;

            if let Some(total) = total {
                console.progress(&progress_line(downloaded, total));
            }
        }

        file.flush().map_err(|e| FetchError::io(path, e))?;
        Ok(downloaded)
    }
}

fn progress_line(downloaded: u64, total: u64) -> String {
    let percent = downloaded as f64 / total as f64 * 100.0;
    format!("Progress: {percent:.1}% ({downloaded}/{total} bytes)")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
