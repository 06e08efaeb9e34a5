use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

use super::*;
use crate::kernel::image::ImageHandle;
use crate::kernel::schema::Schema;

struct NoImages;

impl ImageLoader for NoImages {
    fn load(&self, source: &str) -> ImageHandle {
        ImageHandle::missing(source)
    }
}

fn table(columns: &[&str], checkbox: bool) -> Table {
    Table::new(Schema::parse(columns, checkbox).unwrap())
}

#[test]
fn fixed_arguments_fill_whole_rows() {
    let mut table = table(&["Pick", "Name"], true);
    let added = fill_from_args(&mut table, &["TRUE", "Alice", "false", "Bob"], &NoImages);

    assert_eq!(added, 2);
    assert_eq!(table.cell(0, 0), Some(&CellValue::Check(true)));
    assert_eq!(table.cell(0, 1), Some(&CellValue::Text("Alice".into())));
    assert_eq!(table.cell(1, 0), Some(&CellValue::Check(false)));
}

#[test]
fn fixed_arguments_drop_short_trailing_group() {
    let mut table = table(&["A", "B", "C"], false);
    let added = fill_from_args(&mut table, &["1", "2", "3", "4", "5"], &NoImages);

    assert_eq!(added, 1);
    assert_eq!(table.len(), 1);
}

#[test]
fn assembler_fills_columns_in_order_and_wraps() {
    let mut table = table(&["Name", "Size:NUM"], false);
    let mut assembler = RowAssembler::new();

    let first = assembler.push(&mut table, "a", &NoImages);
    assert_eq!(table.len(), 1);
    assert_eq!(assembler.open_row(), Some(first));
    assert_eq!(table.cell(0, 1), None);

    let same = assembler.push(&mut table, "12abc", &NoImages);
    assert_eq!(first, same);
    assert_eq!(table.cell(0, 1), Some(&CellValue::Numeric(12)));
    assert_eq!(assembler.open_row(), None);

    let second = assembler.push(&mut table, "b", &NoImages);
    assert_ne!(first, second);
    assert_eq!(table.len(), 2);
    assert_eq!(assembler.lines(), 3);
}

#[test]
fn partial_row_stays_visible_after_close() {
    let mut table = table(&["Name", "Size:NUM", "Note"], false);
    let mut assembler = RowAssembler::new();
    for line in ["a", "1", "note", "b"] {
        assembler.push(&mut table, line, &NoImages);
    }
    assembler.close();

    assert!(assembler.is_closed());
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(1, 0), Some(&CellValue::Text("b".into())));
    assert!(!table.row(1).unwrap().is_complete());
}

#[test]
fn deleted_open_row_is_replaced_by_a_fresh_one() {
    let mut table = table(&["A", "B"], false);
    let mut assembler = RowAssembler::new();
    let open = assembler.push(&mut table, "a", &NoImages);
    table.remove(table.index_of(open).unwrap());

    let next = assembler.push(&mut table, "b", &NoImages);
    assert_ne!(open, next);
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, 0), None);
    assert_eq!(table.cell(0, 1), Some(&CellValue::Text("b".into())));
}

#[test]
fn strip_line_ending_removes_lf_and_crlf() {
    assert_eq!(strip_line_ending(b"abc\n"), b"abc");
    assert_eq!(strip_line_ending(b"abc\r\n"), b"abc");
    assert_eq!(strip_line_ending(b"abc"), b"abc");
    assert_eq!(strip_line_ending(b"\n"), b"");
}

#[tokio::test]
async fn read_lines_forwards_every_line_then_closes() {
    let input: &[u8] = b"TRUE\nAlice\r\n\nlast";
    let (tx, mut rx) = mpsc::channel(16);

    read_lines(input, tx).await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            IngestEvent::Line("TRUE".into()),
            IngestEvent::Line("Alice".into()),
            IngestEvent::Line(String::new()),
            IngestEvent::Line("last".into()),
            IngestEvent::Closed,
        ]
    );
}

#[tokio::test]
async fn read_lines_replaces_invalid_utf8() {
    let input: &[u8] = b"ab\xffcd\n";
    let (tx, mut rx) = mpsc::channel(4);

    read_lines(input, tx).await;

    assert_eq!(rx.recv().await, Some(IngestEvent::Line("ab\u{fffd}cd".into())));
    assert_eq!(rx.recv().await, Some(IngestEvent::Closed));
}

#[tokio::test]
async fn read_lines_stops_when_receiver_is_gone() {
    let input: &[u8] = b"a\nb\nc\n";
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    read_lines(input, tx).await;
}

/// One step of a scripted input stream.
enum Step {
    Data(&'static [u8]),
    Fail(io::ErrorKind),
}

/// Input that replays data chunks and read errors in a fixed order.
struct ScriptedInput {
    steps: VecDeque<Step>,
    chunk: Vec<u8>,
    pos: usize,
}

impl ScriptedInput {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            chunk: Vec::new(),
            pos: 0,
        }
    }
}

impl AsyncBufRead for ScriptedInput {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        let this = self.get_mut();
        if this.pos >= this.chunk.len() {
            match this.steps.pop_front() {
                Some(Step::Data(data)) => {
                    this.chunk = data.to_vec();
                    this.pos = 0;
                }
                Some(Step::Fail(kind)) => return Poll::Ready(Err(kind.into())),
                None => return Poll::Ready(Ok(&[])),
            }
        }
        Poll::Ready(Ok(&this.chunk[this.pos..]))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().pos += amt;
    }
}

impl AsyncRead for ScriptedInput {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let n = match self.as_mut().poll_fill_buf(cx) {
            Poll::Ready(Ok(data)) => {
                let n = data.len().min(buf.remaining());
                buf.put_slice(&data[..n]);
                n
            }
            Poll::Ready(Err(err)) => return Poll::Ready(Err(err)),
            Poll::Pending => return Poll::Pending,
        };
        self.consume(n);
        Poll::Ready(Ok(()))
    }
}

async fn collect(steps: Vec<Step>) -> Vec<IngestEvent> {
    let (tx, mut rx) = mpsc::channel(64);
    read_lines(ScriptedInput::new(steps), tx).await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn read_lines_skips_a_failed_read_and_continues() {
    let events = collect(vec![
        Step::Data(b"a\n"),
        Step::Fail(io::ErrorKind::Other),
        Step::Data(b"b\n"),
    ])
    .await;

    assert_eq!(
        events,
        vec![
            IngestEvent::Line("a".into()),
            IngestEvent::Line("b".into()),
            IngestEvent::Closed,
        ]
    );
}

#[tokio::test]
async fn read_lines_retries_interrupted_and_would_block() {
    let events = collect(vec![
        Step::Fail(io::ErrorKind::Interrupted),
        Step::Data(b"a\n"),
        Step::Fail(io::ErrorKind::WouldBlock),
        Step::Fail(io::ErrorKind::WouldBlock),
        Step::Data(b"b\n"),
    ])
    .await;

    assert_eq!(
        events,
        vec![
            IngestEvent::Line("a".into()),
            IngestEvent::Line("b".into()),
            IngestEvent::Closed,
        ]
    );
}

#[tokio::test]
async fn read_lines_closes_after_too_many_consecutive_failures() {
    let mut steps: Vec<Step> = (0..MAX_CONSECUTIVE_READ_ERRORS)
        .map(|_| Step::Fail(io::ErrorKind::Other))
        .collect();
    steps.push(Step::Data(b"late\n"));

    assert_eq!(collect(steps).await, vec![IngestEvent::Closed]);
}

#[tokio::test]
async fn read_lines_resets_failure_count_after_a_good_line() {
    let mut steps = Vec::new();
    for line in [&b"a\n"[..], &b"b\n"[..]] {
        steps.extend((1..MAX_CONSECUTIVE_READ_ERRORS).map(|_| Step::Fail(io::ErrorKind::Other)));
        steps.push(Step::Data(line));
    }

    assert_eq!(
        collect(steps).await,
        vec![
            IngestEvent::Line("a".into()),
            IngestEvent::Line("b".into()),
            IngestEvent::Closed,
        ]
    );
}
