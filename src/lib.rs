//! zdialog - list dialogs for shell scripts
//!
//! Modules:
//! - kernel: table model, ingestion, selection, printing and the action store
//! - settings: user settings file and state directories
//! - cli: command-line arguments
//! - tui: terminal frontend (crossterm + ratatui)
//! - app: wiring of the above into a runnable dialog

pub mod cli;
pub mod kernel;
pub mod settings;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
