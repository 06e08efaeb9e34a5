//! Terminal frontend (crossterm + ratatui).
//!
//! Kept apart from `kernel` so the list model, ingestion and printing build
//! without terminal crates.

pub mod keymap;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::{run_dialog, DialogChannels, DialogOutcome};
pub use terminal_guard::{TerminalGuard, TerminationSignal, TtyWriter};
pub use theme::UiTheme;
