use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use futures_util::Stream;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tokio::io::BufReader;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::cli::ListArgs;
use crate::kernel::ingest::{fill_from_args, read_lines};
use crate::kernel::print::print_result;
use crate::kernel::{
    DialogResponse, IconResolver, ImageLoader, ListState, PrintOptions, Result, Schema, Store,
    Table,
};
use crate::settings::Settings;
use crate::tui::terminal_guard::TerminalGuard;
use crate::tui::{run_dialog, DialogChannels, DialogOutcome, TtyWriter, UiTheme};

/// Pending ingest events between the stdin reader and the event loop.
const INGEST_CHANNEL_CAPACITY: usize = 1024;

/// A configured list dialog, ready to run.
pub struct ListDialog {
    store: Store,
    print: PrintOptions,
    theme: UiTheme,
    timeout: Option<Duration>,
}

/// The closed dialog: how it ended and the table it ended with.
pub struct DialogRun {
    pub outcome: DialogOutcome,
    pub state: ListState,
    pub print: PrintOptions,
}

impl DialogRun {
    pub fn response(&self) -> DialogResponse {
        self.outcome.response
    }

    /// Prints the qualifying rows when the dialog was confirmed.
    pub fn write_result<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if !self.outcome.response.prints_result() {
            return Ok(());
        }
        print_result(w, &self.state.table, &self.state.selection, &self.print)
    }
}

impl ListDialog {
    pub fn from_args(args: &ListArgs, settings: &Settings) -> Result<Self> {
        let images = IconResolver::with_system_dirs(settings.icon_dirs.clone());
        let stdin_is_terminal = io::stdin().is_terminal();
        Self::with_loader(args, settings, Box::new(images), stdin_is_terminal)
    }

    /// Builds the dialog around an explicit image loader.
    ///
    /// Without data arguments the table is filled from stdin, unless stdin
    /// is a terminal, which would swallow the dialog's own keystrokes.
    pub fn with_loader(
        args: &ListArgs,
        settings: &Settings,
        images: Box<dyn ImageLoader>,
        stdin_is_terminal: bool,
    ) -> Result<Self> {
        let schema = Schema::parse(&args.columns, args.checklist)?;
        let print = args.print_options(settings);
        print.validate(&schema)?;

        let mut table = Table::new(schema);
        if args.has_fixed_data() {
            let rows = fill_from_args(&mut table, &args.data, images.as_ref());
            tracing::debug!(rows, "filled list from arguments");
        }

        let mut state = ListState::new(table, args.list_options(settings));
        state.streaming = !args.has_fixed_data() && !stdin_is_terminal;
        if !args.has_fixed_data() && stdin_is_terminal {
            tracing::warn!("stdin is a terminal; not reading list data from it");
        }

        Ok(Self {
            store: Store::new(state, images),
            print,
            theme: UiTheme::from_settings(&settings.theme),
            timeout: args.timeout(),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_streaming(&self) -> bool {
        self.store.state().streaming
    }

    pub fn print_options(&self) -> &PrintOptions {
        &self.print
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs the dialog on `terminal` until it closes.
    pub async fn run_on<B, S>(
        mut self,
        terminal: &mut Terminal<B>,
        channels: DialogChannels<S>,
    ) -> io::Result<DialogRun>
    where
        B: Backend,
        S: Stream<Item = io::Result<crossterm::event::Event>> + Unpin,
    {
        let outcome =
            run_dialog(terminal, &mut self.store, &self.theme, channels, self.timeout).await?;
        tracing::info!(response = ?outcome.response, "dialog closed");
        Ok(DialogRun {
            outcome,
            state: self.store.into_state(),
            print: self.print,
        })
    }

    /// Runs the dialog on the controlling terminal, reading stdin when streaming.
    pub fn run(self, diagnostics: Option<UnboundedReceiver<String>>) -> io::Result<DialogRun> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let ingest = if self.is_streaming() {
            let (tx, rx) = mpsc::channel(INGEST_CHANNEL_CAPACITY);
            rt.spawn(read_lines(BufReader::new(tokio::io::stdin()), tx));
            Some(rx)
        } else {
            None
        };

        let result = {
            let guard = TerminalGuard::new()?;
            let signals = install_signals(&guard);

            let mut terminal = Terminal::new(CrosstermBackend::new(TtyWriter::open()))?;
            terminal.clear()?;

            let channels = DialogChannels {
                events: crossterm::event::EventStream::new(),
                ingest,
                diagnostics,
                signals,
            };
            rt.block_on(self.run_on(&mut terminal, channels))
        };

        // The stdin reader may be parked in a blocking read.
        rt.shutdown_background();
        result
    }
}

#[cfg(unix)]
fn install_signals(
    guard: &TerminalGuard,
) -> Option<UnboundedReceiver<crate::tui::TerminationSignal>> {
    let (tx, rx) = mpsc::unbounded_channel();
    match crate::tui::terminal_guard::install_termination_signals(guard.restorer(), tx) {
        Ok(_) => Some(rx),
        Err(err) => {
            tracing::warn!(error = %err, "failed to install signal handlers");
            None
        }
    }
}

#[cfg(not(unix))]
fn install_signals(
    _guard: &TerminalGuard,
) -> Option<UnboundedReceiver<crate::tui::TerminationSignal>> {
    None
}

#[cfg(test)]
#[path = "../../tests/unit/app/list_dialog.rs"]
mod tests;
