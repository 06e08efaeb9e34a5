//! Screen modes held for the dialog's lifetime, and teardown on signals.

use std::fs::File;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::cursor;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Where the dialog is drawn: the controlling terminal, else stderr.
///
/// stdin and stdout carry data, so the UI never touches them.
pub enum TtyWriter {
    Tty(File),
    Stderr(io::Stderr),
}

impl TtyWriter {
    pub fn open() -> Self {
        match std::fs::OpenOptions::new().write(true).open("/dev/tty") {
            Ok(file) => TtyWriter::Tty(file),
            Err(_) => TtyWriter::Stderr(io::stderr()),
        }
    }
}

impl Write for TtyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TtyWriter::Tty(file) => file.write(buf),
            TtyWriter::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TtyWriter::Tty(file) => file.flush(),
            TtyWriter::Stderr(stderr) => stderr.flush(),
        }
    }
}

/// Switches the terminal into and out of the dialog's screen modes.
pub trait ScreenModes: Send + Sync + 'static {
    fn enter(&self) -> io::Result<()>;
    fn leave(&self) -> io::Result<()>;
}

/// Raw mode, alternate screen and mouse capture on the controlling terminal.
#[derive(Debug, Default)]
pub struct TtyScreenModes;

impl ScreenModes for TtyScreenModes {
    fn enter(&self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let entered = execute!(
            TtyWriter::open(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        );
        if let Err(err) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        // Both steps always run; the first failure is reported.
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            TtyWriter::open(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
        raw.and(screen)
    }
}

/// Cloneable handle that leaves the screen modes at most once.
#[derive(Clone)]
pub struct ScreenRestorer {
    left: Arc<AtomicBool>,
    modes: Arc<dyn ScreenModes>,
}

impl ScreenRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.left.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.modes.leave()
    }

    pub fn is_restored(&self) -> bool {
        self.left.load(Ordering::SeqCst)
    }
}

/// Holds the dialog's screen modes until dropped.
pub struct TerminalGuard {
    restorer: ScreenRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_modes(Arc::new(TtyScreenModes))
    }

    pub fn with_modes(modes: Arc<dyn ScreenModes>) -> io::Result<Self> {
        modes.enter()?;
        Ok(Self {
            restorer: ScreenRestorer {
                left: Arc::new(AtomicBool::new(false)),
                modes,
            },
        })
    }

    pub fn restorer(&self) -> ScreenRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restorer.restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

/// Signals that end the dialog. The exit status is `128 + signal number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigHup,
    SigInt,
    SigTerm,
}

impl TerminationSignal {
    pub const ALL: [TerminationSignal; 3] = [
        TerminationSignal::SigHup,
        TerminationSignal::SigInt,
        TerminationSignal::SigTerm,
    ];

    /// POSIX signal number.
    pub fn number(self) -> i32 {
        match self {
            TerminationSignal::SigHup => 1,
            TerminationSignal::SigInt => 2,
            TerminationSignal::SigTerm => 15,
        }
    }

    pub fn from_number(number: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.number() == number)
    }

    pub fn exit_code(self) -> i32 {
        128 + self.number()
    }
}

/// Time the event loop gets to close the dialog after a signal.
#[cfg(unix)]
const SIGNAL_GRACE: std::time::Duration = std::time::Duration::from_secs(2);

/// Forwards the first termination signal to the event loop.
///
/// If the loop has not closed the dialog after [`SIGNAL_GRACE`], the screen
/// is restored here and the process exits with the signal's status.
#[cfg(unix)]
pub fn install_termination_signals(
    restorer: ScreenRestorer,
    tx: tokio::sync::mpsc::UnboundedSender<TerminationSignal>,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new(TerminationSignal::ALL.map(TerminationSignal::number))?;
    std::thread::Builder::new()
        .name("zdialog-signals".into())
        .spawn(move || {
            let Some(signal) = signals.forever().find_map(TerminationSignal::from_number) else {
                return;
            };
            tracing::debug!(?signal, "termination signal received");
            let _ = tx.send(signal);

            std::thread::sleep(SIGNAL_GRACE);
            let _ = restorer.restore();
            std::process::exit(signal.exit_code());
        })
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
