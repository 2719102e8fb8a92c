//! Host-side collaborators of the engine.
//!
//! The engine only knows the four hook operations. Everything a host wires
//! behind them lives here: the shared run flag, operation counters, pacing,
//! the highlight protocol for a rendering surface, audio cues, and the
//! session that drives one run at a time.

mod counters;
mod flag;
mod instrumented;
mod pacing;
mod render;
mod session;
mod sound;

pub use counters::{CounterSnapshot, OperationKind, RunCounters};
pub use flag::RunFlag;
pub use instrumented::InstrumentedHooks;
pub use pacing::{inverse_time_scale, pace, time_scale, PacingConfig, MAX_TIME_SCALE};
pub use render::{ChannelRenderer, Column, HighlightTracker, RenderEvent, RenderStream, Renderer};
pub use session::{RunOutcome, RunReport, SortSession};
pub use sound::{frequency_for, SoundCue, SoundSettings, SoundWave};
