//! # sortviz - Instrumented Sorting Engine
//!
//! sortviz runs classic and unusual sorting algorithms step by step so a host
//! can watch them. Algorithms never touch the array directly: every
//! comparison, swap and auxiliary write goes through a [`SortHooks`]
//! implementation, which counts it, paces it, renders it and can cancel the
//! run at any point.
//!
//! ## Core Concepts
//!
//! - **Element**: a value plus a stable identity, so stability is observable
//! - **Hooks**: the four instrumented operations, each an `async fn`
//! - **Phase**: a tag grouping the operations of one network stage
//! - **Catalog**: sixteen algorithms behind [`SortEngine`]
//! - **Session**: the host loop that owns settings, the array and one run
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sortviz::{Algorithm, PacingConfig, Settings, SortSession};
//!
//! let settings = Settings {
//!     column_count: 64,
//!     algorithm: Algorithm::BitonicSort,
//!     pacing: PacingConfig::unpaced(),
//!     ..Settings::default()
//! };
//! let mut session = SortSession::new(settings)?;
//! let stop = session.stop_handle();
//! let report = session.run().await?;
//! assert!(report.sorted);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod element;
pub mod error;
pub mod operator;
pub mod options;

// Engine
pub mod catalog;
pub mod hooks;
pub mod scheduler;

// Host
pub mod host;
pub mod settings;

pub use catalog::{SortEngine, SortRoutine};
pub use element::{create_elements, elements_from_values, is_permutation_of, is_sorted, Element, ResetPreset, SortArray};
pub use error::{SortError, SortResult, ValidationError};
pub use hooks::{Phase, SortContext, SortHooks};
pub use operator::Operator;
pub use options::{Algorithm, AlgorithmOptions, HeapType, NetworkForm, OptionField};
pub use scheduler::{run_phase, PhaseTask};
pub use settings::Settings;

pub use host::{
    ChannelRenderer, CounterSnapshot, InstrumentedHooks, OperationKind, PacingConfig, RenderEvent, RenderStream,
    Renderer, RunCounters, RunFlag, RunOutcome, RunReport, SortSession, SoundCue, SoundSettings,
};
