pub mod console;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod filename;
pub mod session;

pub use console::{Console, Terminal};
pub use directory::{ensure_directory, DOWNLOAD_DIR};
pub use error::{DirectoryError, FetchError};
pub use fetch::{FetchConfig, FetchOutcome, Fetcher, HttpResponse, HttpSource, SavedImage};
pub use filename::resolve_filename;
pub use session::SessionSummary;
