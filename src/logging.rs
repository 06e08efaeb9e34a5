use std::io::{self, Write};
use std::path::PathBuf;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Keeps the file writer alive and hands out the diagnostic stream.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_dir: Option<PathBuf>,
    diagnostics_rx: Option<UnboundedReceiver<String>>,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.log_dir.as_deref()
    }

    pub fn take_diagnostics_rx(&mut self) -> Option<UnboundedReceiver<String>> {
        self.diagnostics_rx.take()
    }
}

/// Collects one formatted event and forwards its lines when dropped.
struct DiagnosticWriter {
    buf: Vec<u8>,
    tx: UnboundedSender<String>,
}

impl DiagnosticWriter {
    fn new(tx: UnboundedSender<String>) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            tx,
        }
    }
}

impl Write for DiagnosticWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for DiagnosticWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines() {
            let _ = self.tx.send(line.to_string());
        }
    }
}

#[derive(Clone)]
struct DiagnosticMakeWriter {
    tx: UnboundedSender<String>,
}

impl<'a> MakeWriter<'a> for DiagnosticMakeWriter {
    type Writer = DiagnosticWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DiagnosticWriter::new(self.tx.clone())
    }
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "zdialog=info",
        1 => "zdialog=debug",
        _ => "zdialog=trace",
    }
}

/// Installs the global subscriber.
///
/// Everything allowed by `RUST_LOG` (or the `-v` level) goes to a daily log
/// file; warnings and errors also go to the diagnostic channel, which the
/// caller shows while the dialog runs and flushes to stderr afterwards.
pub fn init(verbose: u8) -> Option<LoggingGuard> {
    let (diag_tx, diag_rx) = mpsc::unbounded_channel::<String>();

    let diagnostics = tracing_subscriber::fmt::layer()
        .with_writer(DiagnosticMakeWriter { tx: diag_tx })
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::WARN);

    let log_dir = zdialog::settings::ensure_log_dir()
        .or_else(|_| -> std::io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("zdialog").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok();

    let env_filter = if verbose > 0 {
        EnvFilter::new(default_directive(verbose))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(0)))
    };

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "zdialog.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(diagnostics);

    if subscriber.try_init().is_err() {
        return None;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));

    if let Some(dir) = &log_dir {
        tracing::debug!(log_dir = %dir.display(), "tracing initialized");
    }

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
        diagnostics_rx: Some(diag_rx),
    })
}
