//! The dialog's event loop.
//!
//! One task owns the store. Terminal input, ingested lines, diagnostics,
//! termination signals and the timeout are multiplexed with `select!`, turned
//! into [`Action`]s and dispatched in arrival order. A frame is drawn only
//! after something changed.

use std::io;
use std::time::Duration;

use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio::time::Instant;

use crate::kernel::{Action, DialogResponse, Effect, IngestEvent, Store};

use super::keymap::map_event;
use super::layout::ListLayout;
use super::render::render;
use super::terminal_guard::TerminationSignal;
use super::theme::UiTheme;

/// Lines applied per wake-up before the next frame is drawn.
const INGEST_BATCH: usize = 256;

pub struct DialogChannels<S> {
    pub events: S,
    pub ingest: Option<Receiver<IngestEvent>>,
    pub diagnostics: Option<UnboundedReceiver<String>>,
    pub signals: Option<UnboundedReceiver<TerminationSignal>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOutcome {
    pub response: DialogResponse,
    /// Every diagnostic seen while the dialog was open, oldest first.
    pub diagnostics: Vec<String>,
}

enum LoopEvent {
    Terminal(Option<io::Result<Event>>),
    Ingest(Option<IngestEvent>),
    Diagnostic(Option<String>),
    Signal(Option<TerminationSignal>),
    Deadline,
}

pub async fn run_dialog<B, S>(
    terminal: &mut Terminal<B>,
    store: &mut Store,
    theme: &UiTheme,
    mut channels: DialogChannels<S>,
    timeout: Option<Duration>,
) -> io::Result<DialogOutcome>
where
    B: Backend,
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    let deadline = timeout.map(|timeout| Instant::now() + timeout);
    let mut layout = ListLayout::default();
    let mut diagnostics = Vec::new();
    let mut dirty = true;

    loop {
        if dirty {
            let mut drawn = None;
            terminal.draw(|frame| {
                let next = ListLayout::compute(frame.area(), store.state());
                render(frame, store.state(), theme, &next);
                drawn = Some(next);
            })?;
            layout = drawn.unwrap_or_default();
            dirty = false;

            let height = layout.body_height();
            if height != store.state().view_height
                && store
                    .dispatch(Action::SetViewHeight { height })
                    .state_changed
            {
                dirty = true;
                continue;
            }
        }

        let event = tokio::select! {
            biased;
            signal = recv_unbounded(&mut channels.signals) => LoopEvent::Signal(signal),
            event = channels.events.next() => LoopEvent::Terminal(event),
            ingest = recv(&mut channels.ingest) => LoopEvent::Ingest(ingest),
            message = recv_unbounded(&mut channels.diagnostics) => LoopEvent::Diagnostic(message),
            _ = sleep_until(deadline) => LoopEvent::Deadline,
        };

        let mut actions = Vec::new();
        match event {
            LoopEvent::Signal(Some(signal)) => {
                tracing::info!(?signal, "termination signal received");
                actions.push(Action::Terminate {
                    code: signal.exit_code(),
                });
            }
            LoopEvent::Signal(None) => channels.signals = None,
            LoopEvent::Terminal(Some(Ok(Event::Resize(..)))) => dirty = true,
            LoopEvent::Terminal(Some(Ok(event))) => {
                let now = std::time::Instant::now();
                actions.extend(map_event(store.state(), &layout, &event, now));
            }
            LoopEvent::Terminal(Some(Err(err))) => return Err(err),
            LoopEvent::Terminal(None) => {
                tracing::warn!("terminal input closed");
                actions.push(Action::Escape);
            }
            LoopEvent::Ingest(Some(first)) => {
                actions.push(Action::Ingest(first));
                if let Some(rx) = channels.ingest.as_mut() {
                    while actions.len() < INGEST_BATCH {
                        match rx.try_recv() {
                            Ok(event) => actions.push(Action::Ingest(event)),
                            Err(_) => break,
                        }
                    }
                }
            }
            LoopEvent::Ingest(None) => {
                channels.ingest = None;
                if !store.state().assembler.is_closed() {
                    actions.push(Action::Ingest(IngestEvent::Closed));
                }
            }
            LoopEvent::Diagnostic(Some(message)) => {
                diagnostics.push(message.clone());
                actions.push(Action::Diagnostic(message));
            }
            LoopEvent::Diagnostic(None) => channels.diagnostics = None,
            LoopEvent::Deadline => {
                tracing::debug!("dialog timed out");
                actions.push(Action::Timeout);
            }
        }

        for action in actions {
            let result = store.dispatch(action);
            dirty |= result.state_changed;
            for effect in result.effects {
                match effect {
                    Effect::Close(response) => {
                        if let Some(rx) = channels.diagnostics.as_mut() {
                            while let Ok(message) = rx.try_recv() {
                                diagnostics.push(message);
                            }
                        }
                        return Ok(DialogOutcome {
                            response,
                            diagnostics,
                        });
                    }
                }
            }
        }
    }
}

async fn recv<T>(rx: &mut Option<Receiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn recv_unbounded<T>(rx: &mut Option<UnboundedReceiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/runtime.rs"]
mod tests;
