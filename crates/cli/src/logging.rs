//! Console + per-run log file

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::settings::LogFormat;

/// Operator-facing layer: the message only, no time, level or target
fn console_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
}

/// Initialize logging to stdout and to `<log_dir>/<file_name>`
///
/// Keep the returned guard alive until exit so the file gets flushed.
///
/// # Environment Variables
///
/// - `RUST_LOG`: filter directives (default: `info`)
pub fn init(log_dir: &Path, file_name: &str, format: LogFormat) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log folder {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let (json_file, text_file) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(file_writer)), None),
        LogFormat::Text => (
            None,
            Some(fmt::layer().with_ansi(false).with_writer(file_writer)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer(std::io::stdout))
        .with(json_file)
        .with(text_file)
        .try_init()
        .context("Failed to install the log subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_prints_message_without_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber =
            tracing_subscriber::registry().with(console_layer(move || writer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Please specify the row number (from 0 to 2) of the T2w image");
            tracing::warn!("Invalid input. Please enter a number.");
        });

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            out,
            "Please specify the row number (from 0 to 2) of the T2w image\n\
             Invalid input. Please enter a number.\n"
        );
    }
}
