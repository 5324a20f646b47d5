use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// `typeahead` prefixes both the crate's module targets and the `typeahead.*` event targets.
const DEFAULT_FILTER: &str = "typeahead=info";
const LOG_FILE: &str = "typeahead-lab.log";

/// Keeps the non-blocking file writer alive and owns the receiving end of the log pane feed.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_rx: Option<Receiver<String>>,
}

impl LoggingGuard {
    pub fn take_log_rx(&mut self) -> Option<Receiver<String>> {
        self.log_rx.take()
    }
}

/// The log pane shows orchestrator, limiter, backend and lab events only. Module-path
/// targets (settings, runtime plumbing) still reach the file.
fn is_lab_target(target: &str) -> bool {
    target
        .strip_prefix("typeahead.")
        .is_some_and(|rest| !rest.is_empty())
}

/// Collects one formatted event and forwards its lines to the pane when dropped.
struct PaneWriter {
    buf: Vec<u8>,
    tx: Sender<String>,
}

impl Write for PaneWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for PaneWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            if self.tx.send(line.to_string()).is_err() {
                break;
            }
        }
    }
}

#[derive(Clone)]
struct PaneMakeWriter {
    tx: Sender<String>,
}

impl<'a> MakeWriter<'a> for PaneMakeWriter {
    type Writer = PaneWriter;

    fn make_writer(&'a self) -> Self::Writer {
        PaneWriter {
            buf: Vec::with_capacity(256),
            tx: self.tx.clone(),
        }
    }
}

/// Compact, timeless lines for the lab's log pane.
fn pane_layer<S>(tx: Sender<String>) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(PaneMakeWriter { tx })
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .compact()
        .with_filter(filter_fn(|meta| is_lab_target(meta.target())))
}

fn resolve_log_dir() -> Option<PathBuf> {
    typeahead_lab::kernel::services::adapters::ensure_log_dir()
        .or_else(|_| -> io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("typeahead-lab").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()
}

/// Installs the global subscriber: a daily file plus the pane feed. Returns `None` when
/// no log directory is usable or a subscriber is already set.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let (log_tx, log_rx) = mpsc::channel::<String>();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(pane_layer(log_tx));

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(target: "typeahead.lab", panic = %panic_info, "panic");
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_rx: Some(log_rx),
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
