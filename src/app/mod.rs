//! Application layer: wires the kernel, the terminal frontend and the process.

mod list_dialog;

pub use list_dialog::{DialogRun, ListDialog};
