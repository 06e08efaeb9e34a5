use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use zdialog::app::ListDialog;
use zdialog::cli::{Cli, Mode};
use zdialog::settings::load_settings_or_default;

mod logging;

/// Exit status for invalid invocations and terminal failures.
const EXIT_SETUP_ERROR: u8 = 255;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = logging::init(cli.verbose);
    let diagnostics = logging.as_mut().and_then(|guard| guard.take_diagnostics_rx());

    let settings = load_settings_or_default(cli.settings.as_deref());

    let Mode::List(args) = cli.mode;
    let dialog = match ListDialog::from_args(&args, &settings) {
        Ok(dialog) => dialog,
        Err(err) => {
            tracing::error!(error = %err, config = err.is_config(), "invalid list dialog");
            eprintln!("zdialog: {err}");
            return ExitCode::from(EXIT_SETUP_ERROR);
        }
    };

    let run = match dialog.run(diagnostics) {
        Ok(run) => run,
        Err(err) => {
            tracing::error!(error = %err, "dialog failed");
            eprintln!("zdialog: {err}");
            return ExitCode::from(EXIT_SETUP_ERROR);
        }
    };

    let mut stderr = io::stderr().lock();
    for line in &run.outcome.diagnostics {
        let _ = writeln!(stderr, "{line}");
    }
    drop(stderr);

    let mut stdout = io::stdout().lock();
    if let Err(err) = run.write_result(&mut stdout) {
        tracing::error!(error = %err, "failed to print result");
    }

    if let Some(dir) = logging.as_ref().and_then(|guard| guard.log_dir()) {
        tracing::debug!(log_dir = %dir.display(), "exiting");
    }
    ExitCode::from(run.response().code() as u8)
}
