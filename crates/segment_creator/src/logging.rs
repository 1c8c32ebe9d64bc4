use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ensure_data_dir_exists, LOG_ENV, LOG_FILE};

/// File-backed tracing subscriber. The terminal belongs to the UI, so nothing
/// is ever logged to stdout/stderr.
///
/// Filter: `SEGMENT_CREATOR_LOG_LEVEL`, then `RUST_LOG`, then
/// `segment_creator=info`.
pub fn init() -> Result<()> {
    let directory = ensure_data_dir_exists()?;
    let log_path = directory.join(LOG_FILE.clone());
    let log_file = std::fs::File::create(log_path)?;

    let directives = std::env::var(LOG_ENV.clone())
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .parse_lossy(directives);

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
