//! Headless list dialog core (schema, table, ingestion, printing, state/action/effect).
//!
//! Nothing here depends on terminal crates, so the core is testable without a TTY.

pub mod action;
pub mod cell;
pub mod effect;
pub mod error;
pub mod image;
pub mod ingest;
pub mod print;
pub mod schema;
pub mod selection;
pub mod state;
pub mod store;
pub mod table;

pub use action::Action;
pub use cell::CellValue;
pub use effect::{DialogResponse, Effect};
pub use error::{DialogError, Result};
pub use image::{IconResolver, ImageHandle, ImageLoader};
pub use ingest::{IngestEvent, RowAssembler};
pub use print::PrintOptions;
pub use schema::{Column, ColumnType, Schema};
pub use selection::{RowSelection, SelectionMode};
pub use state::{CellEditor, ContextMenuItem, ListOptions, ListState, SortState};
pub use store::{DispatchResult, Store};
pub use table::{Row, RowId, Table};
