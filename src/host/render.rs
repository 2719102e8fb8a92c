//! Rendering collaborator.
//!
//! The engine never draws. [`InstrumentedHooks`](super::InstrumentedHooks)
//! forwards redraws and highlights to a [`Renderer`], with a
//! [`HighlightTracker`] deciding when previous highlights are cleared:
//! untagged calls clear after every operation, tagged calls keep a stage's
//! highlights until the phase tag changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::element::{Element, SortArray};
use crate::error::{SortError, SortResult};
use crate::hooks::Phase;

use super::counters::OperationKind;

/// A drawing surface.
pub trait Renderer {
    /// Draws the columns at `indices` in their normal color.
    fn redraw(&mut self, arr: &SortArray, indices: &[usize]);

    /// Draws the columns at `indices` highlighted as `kind`.
    fn highlight(&mut self, arr: &SortArray, indices: &[usize], kind: OperationKind);
}

/// Draw-iteration bookkeeping for highlights.
#[derive(Debug, Default)]
pub struct HighlightTracker {
    current: Option<Phase>,
    highlighted: Vec<usize>,
}

impl HighlightTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlights `indices`. Previously highlighted columns are redrawn first
    /// unless `phase` is set and equal to the current phase.
    pub fn highlight(
        &mut self,
        renderer: &mut dyn Renderer,
        arr: &SortArray,
        indices: &[usize],
        kind: OperationKind,
        phase: Option<Phase>,
    ) {
        if phase.is_none() || phase != self.current {
            self.clear(renderer, arr);
            self.current = phase;
        }
        if indices.is_empty() {
            return;
        }
        self.highlighted.extend_from_slice(indices);
        renderer.highlight(arr, indices, kind);
    }

    /// Redraws every highlighted column and forgets the current phase.
    pub fn stop_highlighting(&mut self, renderer: &mut dyn Renderer, arr: &SortArray) {
        self.clear(renderer, arr);
        self.current = None;
    }

    /// Columns currently highlighted.
    #[must_use]
    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    /// Phase of the current highlights, if tagged.
    #[must_use]
    pub fn current_phase(&self) -> Option<Phase> {
        self.current
    }

    fn clear(&mut self, renderer: &mut dyn Renderer, arr: &SortArray) {
        if !self.highlighted.is_empty() {
            renderer.redraw(arr, &self.highlighted);
            self.highlighted.clear();
        }
    }
}

/// A column as sent to a remote surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Position in the array.
    pub index: usize,
    /// Element currently in that position.
    pub element: Element,
}

/// A draw request emitted by [`ChannelRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderEvent {
    /// Draw these columns plainly.
    Redraw {
        /// Columns to draw.
        columns: Vec<Column>,
    },
    /// Draw these columns in the colour of `kind`.
    Highlight {
        /// Columns to highlight.
        columns: Vec<Column>,
        /// Operation being shown.
        kind: OperationKind,
    },
}

fn columns(arr: &SortArray, indices: &[usize]) -> Vec<Column> {
    arr.with_cells(|cells| {
        indices
            .iter()
            .map(|&index| Column {
                index,
                element: cells[index],
            })
            .collect()
    })
}

/// Renderer that forwards draw requests over a bounded channel.
///
/// Sending never blocks the run: when the queue is full or the receiver is
/// gone the event is dropped and counted.
#[derive(Debug)]
pub struct ChannelRenderer {
    tx: Sender<RenderEvent>,
    dropped_events: Arc<AtomicU64>,
}

impl ChannelRenderer {
    /// Creates a renderer and the stream its events arrive on.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, RenderStream) {
        let (tx, rx) = bounded(capacity.max(1));
        let dropped_events = Arc::new(AtomicU64::new(0));
        let renderer = Self {
            tx,
            dropped_events: Arc::clone(&dropped_events),
        };
        (renderer, RenderStream { rx, dropped_events })
    }

    fn send(&self, event: RenderEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                let dropped = self.dropped_events.fetch_add(1, Ordering::Relaxed) + 1;
                trace!("Render queue unavailable, dropped {dropped} events so far");
            }
        }
    }
}

impl Renderer for ChannelRenderer {
    fn redraw(&mut self, arr: &SortArray, indices: &[usize]) {
        self.send(RenderEvent::Redraw {
            columns: columns(arr, indices),
        });
    }

    fn highlight(&mut self, arr: &SortArray, indices: &[usize], kind: OperationKind) {
        self.send(RenderEvent::Highlight {
            columns: columns(arr, indices),
            kind,
        });
    }
}

/// Receiving end of a [`ChannelRenderer`].
#[derive(Debug)]
pub struct RenderStream {
    rx: Receiver<RenderEvent>,
    dropped_events: Arc<AtomicU64>,
}

impl RenderStream {
    /// Takes every queued event without blocking.
    #[must_use]
    pub fn drain(&self) -> Vec<RenderEvent> {
        self.rx.try_iter().collect()
    }

    /// Receives the next event, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a hook error on timeout or once the renderer is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> SortResult<RenderEvent> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => SortError::hook(format!("no render event within {timeout:?}")),
            RecvTimeoutError::Disconnected => SortError::hook("render stream disconnected"),
        })
    }

    /// Events the renderer could not enqueue.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events.load(Ordering::Relaxed)
    }
}
