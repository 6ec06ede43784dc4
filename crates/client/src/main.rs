//! Casebook terminal client.
//!
//! Composition root: reads the environment, sets up logging, loads the case
//! content and hands a [`casebook_runtime::GameSession`] to the line loop.
//!
//! ```bash
//! # Bundled sample case
//! cargo run -p casebook
//!
//! # Case from a data directory, logs mirrored to stderr
//! CASEBOOK_DATA_DIR=./my_case CASEBOOK_LOG_STDERR=1 cargo run -p casebook
//! ```
mod app;
mod command;
mod config;
mod logging;
mod presentation;

use anyhow::{Context, Result};
use casebook_content::ContentFactory;
use casebook_runtime::{FileStateRepository, GameSession};

use app::CliApp;
use config::CliConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(&config.session_id, config.log_to_stderr)?;

    let content = match &config.data_dir {
        Some(dir) => {
            tracing::info!("Loading case from {}", dir.display());
            ContentFactory::new(dir).load_all()
        }
        None => {
            tracing::info!("Loading bundled case");
            ContentFactory::bundled()
        }
    }
    .context("failed to load case content")?;

    for rejected in &content.rejected {
        eprintln!("warning: dialog '{}' skipped: {}", rejected.dialog, rejected.reason);
    }

    let session = GameSession::from_content(content)?;
    let save_dir = config.save_dir();
    let saves = FileStateRepository::new(&save_dir)
        .with_context(|| format!("failed to open save directory {}", save_dir.display()))?;

    CliApp::new(session, saves).run()
}
