//! Logging Infrastructure

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Where log output ends up for a configured `log_dir`
#[derive(Debug, PartialEq, Eq)]
enum LogTarget<'a> {
    Stdout,
    File(&'a Path),
    /// Configured but absent; falls back to stdout
    MissingDir(&'a str),
}

fn log_target(log_dir: Option<&str>) -> LogTarget<'_> {
    match log_dir {
        None => LogTarget::Stdout,
        Some(dir) if Path::new(dir).exists() => LogTarget::File(Path::new(dir)),
        Some(dir) => LogTarget::MissingDir(dir),
    }
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over `log_level` when set. Output goes to a daily rolling
/// file when `log_dir` exists, stdout otherwise.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("recur_server={log_level},{log_level}")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    match log_target(log_dir) {
        LogTarget::File(log_path) => {
            let file_appender = tracing_appender::rolling::daily(log_path, "recur-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
        }
        LogTarget::Stdout => subscriber.init(),
        LogTarget::MissingDir(dir) => {
            subscriber.init();
            tracing::warn!(log_dir = dir, "Log directory does not exist, logging to stdout");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_target() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().to_str().unwrap();
        let missing = dir.path().join("absent");
        let missing = missing.to_str().unwrap();

        assert_eq!(log_target(None), LogTarget::Stdout);
        assert_eq!(log_target(Some(existing)), LogTarget::File(dir.path()));
        assert_eq!(log_target(Some(missing)), LogTarget::MissingDir(missing));
    }
}
