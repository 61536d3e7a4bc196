use anyhow::{Context, Result};
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs;
use std::path::Path;

use image_fetch::{session, FetchConfig, Fetcher, Terminal, DOWNLOAD_DIR};

fn setup_logging() -> Result<()> {
    let log_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join("image-fetch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!(
        "image_fetch_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    WriteLogger::init(
        LevelFilter::Info,
        config,
        fs::File::create(log_file).context("Failed to create log file")?,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    if let Err(e) = setup_logging() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    info!("image-fetch starting");

    let dir = Path::new(DOWNLOAD_DIR);
    let mut console = Terminal;
    session::print_banner(&mut console, dir);

    let fetcher = Fetcher::new(&FetchConfig::default());
    let summary = session::start(fetcher, &mut console, dir).context("Failed to read input")?;

    info!(
        "Exiting after {} successful and {} failed downloads",
        summary.succeeded, summary.failed
    );
    Ok(())
}
