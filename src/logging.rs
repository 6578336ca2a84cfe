//! Log output setup
//!
//! Logs go to stderr as `LEVEL message` lines without timestamps or targets,
//! at `INFO` by default and `DEBUG` when `--debug` is given.

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Level filter for the given `--debug` flag
pub fn level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Builds the subscriber writing through `writer`
pub fn subscriber<W>(debug: bool, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(level(debug))
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

/// Installs the process-wide subscriber on stderr
pub fn init(debug: bool) {
    if let Err(err) = tracing::subscriber::set_global_default(subscriber(debug, std::io::stderr)) {
        eprintln!("Failed to initialise logging: {}", err);
    }
}
