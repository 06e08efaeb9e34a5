//! Table population from command-line tokens or a line stream.
//!
//! Streaming is split in two halves: [`read_lines`] is an async task that
//! turns an input stream into [`IngestEvent`]s, and [`RowAssembler`] applies
//! them to the table on the dialog's event loop, one line per event.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use super::cell::CellValue;
use super::image::ImageLoader;
use super::table::{RowId, Table};

/// Consecutive hard read failures after which the stream counts as closed.
pub const MAX_CONSECUTIVE_READ_ERRORS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    Line(String),
    Closed,
}

/// Fills complete rows from `tokens`, `n` at a time; a short trailing group is dropped.
pub fn fill_from_args<S: AsRef<str>>(
    table: &mut Table,
    tokens: &[S],
    images: &dyn ImageLoader,
) -> usize {
    let n = table.schema().len();
    if n == 0 {
        return 0;
    }

    let mut added = 0;
    for group in tokens.chunks_exact(n) {
        let values = group
            .iter()
            .zip(table.schema().columns())
            .map(|(token, column)| CellValue::coerce(column.ty, token.as_ref(), images))
            .collect();
        table.append_values(values);
        added += 1;
    }

    let dropped = tokens.len() % n;
    if dropped > 0 {
        tracing::debug!(dropped, columns = n, "ignoring incomplete trailing row");
    }
    added
}

/// Places streamed fields into the table in column order.
#[derive(Debug, Default)]
pub struct RowAssembler {
    column: usize,
    open: Option<RowId>,
    lines: usize,
    closed: bool,
}

impl RowAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores one field and returns the row that received it.
    pub fn push(&mut self, table: &mut Table, raw: &str, images: &dyn ImageLoader) -> RowId {
        let n = table.schema().len();
        if self.column >= n {
            self.column = 0;
            self.open = None;
        }

        let id = match self.open.filter(|id| table.index_of(*id).is_some()) {
            Some(id) => id,
            None => {
                let id = table.append_empty();
                self.open = Some(id);
                id
            }
        };

        if let Some(ty) = table.schema().column_type(self.column) {
            table.set_cell_by_id(id, self.column, CellValue::coerce(ty, raw, images));
        }

        self.lines += 1;
        self.column += 1;
        if self.column == n {
            self.column = 0;
            self.open = None;
        }
        id
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.open = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Row currently being filled, if a group is in progress.
    pub fn open_row(&self) -> Option<RowId> {
        self.open
    }

    pub fn lines(&self) -> usize {
        self.lines
    }
}

/// Strips one trailing `\n` and a `\r` before it.
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads `reader` line by line and forwards every line, in order, to `tx`.
///
/// Yields after each line so the event loop stays responsive. Ends with
/// [`IngestEvent::Closed`] at end of stream, or silently once the receiver
/// is gone.
pub async fn read_lines<R>(mut reader: R, tx: mpsc::Sender<IngestEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::with_capacity(256);
    let mut failures = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                tracing::debug!("input stream closed");
                let _ = tx.send(IngestEvent::Closed).await;
                return;
            }
            Ok(_) => {
                failures = 0;
                let line = String::from_utf8_lossy(strip_line_ending(&buf)).into_owned();
                if tx.send(IngestEvent::Line(line)).await.is_err() {
                    return;
                }
                tokio::task::yield_now().await;
            }
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::Interrupted | std::io::ErrorKind::WouldBlock
                ) =>
            {
                tokio::task::yield_now().await;
            }
            Err(err) => {
                failures += 1;
                tracing::error!(error = %err, "failed to read list data from stdin");
                if failures >= MAX_CONSECUTIVE_READ_ERRORS {
                    let _ = tx.send(IngestEvent::Closed).await;
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/ingest.rs"]
mod tests;
