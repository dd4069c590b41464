//! Logging setup
//!
//! Human-readable console output plus a daily rolling file of JSON lines in
//! the configured log directory.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// File name prefix; the appender adds the date suffix
pub const LOG_FILE_NAME: &str = "rlp-api.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer<S>() -> impl Layer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_filter(env_filter())
}

/// JSON layer writing to a daily rolling file under `log_dir`
///
/// The returned guard flushes buffered lines when dropped and must outlive
/// the subscriber.
pub fn json_file_layer<S>(log_dir: &Path) -> io::Result<(impl Layer<S>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true);

    Ok((layer, guard))
}

/// Install the global subscriber
///
/// Falls back to console-only output if the log directory cannot be created.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    match json_file_layer(log_dir) {
        Ok((file_layer, guard)) => {
            tracing_subscriber::registry()
                .with(file_layer.with_filter(env_filter()))
                .with(console_layer())
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(console_layer()).init();
            tracing::warn!(
                "Failed to create log directory {}: {}; logging to console only",
                log_dir.display(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_file_layer_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let (layer, guard) = json_file_layer(&log_dir).unwrap();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("http_request", request_id = "abc-123");
            let _entered = span.enter();
            tracing::info!(recipe_id = 7, "Recipe created");
        });
        drop(guard);

        let file = fs::read_dir(&log_dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_NAME))
            .expect("Should create a log file");
        let content = fs::read_to_string(file.path()).unwrap();
        let line: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();

        assert_eq!(line["level"], "INFO");
        assert_eq!(line["fields"]["message"], "Recipe created");
        assert_eq!(line["fields"]["recipe_id"], 7);
        assert_eq!(line["span"]["request_id"], "abc-123");
    }
}
