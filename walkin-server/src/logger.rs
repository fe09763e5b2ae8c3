//! Logging setup
//!
//! Console output always; JSON lines instead of the human format when
//! `json` is set; an extra daily-rolling file when a log directory is given.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "walkin_server=info,tower_http=info";

/// Initialize the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logger(json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let console = if json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) if dir.is_dir() => {
            let appender = tracing_appender::rolling::daily(dir, "walkin-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        Some(dir) => {
            eprintln!("log directory {} does not exist, file logging disabled", dir.display());
            (None, None)
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("logger already initialized: {e}");
    }

    guard
}
