use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

const MAX_NAME_LEN: usize = 100;
const FALLBACK_EXTENSION: &str = "bin";

/// Derives a filesystem-safe name for `url`, falling back to a timestamped
/// `image_*` name built from `content_type` when the URL has no usable one.
pub fn resolve_filename(url: &str, content_type: &str) -> String {
    resolve_filename_at(url, content_type, Local::now().naive_local())
}

pub fn resolve_filename_at(url: &str, content_type: &str, now: NaiveDateTime) -> String {
    let candidate = last_path_segment(url);

    let filename = if is_usable(&candidate) {
        candidate
    } else {
        format!(
            "image_{}.{}",
            now.format("%Y%m%d_%H%M%S"),
            extension_from_content_type(content_type)
        )
    };

    let filename = filename.split('?').next().unwrap_or_default();
    sanitize(filename)
}

fn is_usable(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.contains('.') && candidate.chars().count() <= MAX_NAME_LEN
}

/// Final path segment exactly as typed: no percent-encoding or normalization.
fn last_path_segment(url: &str) -> String {
    let before_query = url.split(['?', '#']).next().unwrap_or_default();

    let path = match before_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => before_query,
    };

    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Subtype of a `type/subtype; params` header, or `bin` without a `/`.
pub fn extension_from_content_type(content_type: &str) -> String {
    match content_type.rsplit_once('/') {
        Some((_, subtype)) => subtype
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => FALLBACK_EXTENSION.to_string(),
    }
}

/// Replaces everything outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Inserts `_n` before the extension: `cat.jpg` -> `cat_2.jpg`.
pub fn with_suffix(filename: &str, n: u32) -> String {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();

    match filename[leading_dots..].rfind('.') {
        Some(dot) => {
            let (stem, ext) = filename.split_at(leading_dots + dot);
            format!("{stem}_{n}{ext}")
        }
        None => format!("{filename}_{n}"),
    }
}

/// Claims the first free name among `filename`, `filename_1`, `filename_2`, ...
/// in `dir`. Each candidate is opened with `create_new`, so an existing file is
/// never truncated.
pub fn create_unique(dir: &Path, filename: &str) -> io::Result<(PathBuf, File)> {
    let mut path = dir.join(filename);
    let mut counter = 1;

    loop {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{:?} already exists, trying next suffix", path);
                path = dir.join(with_suffix(filename, counter));
                counter += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
