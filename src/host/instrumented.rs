//! The standard hook implementation.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use crate::element::SortArray;
use crate::error::SortResult;
use crate::hooks::{Phase, SortHooks};
use crate::operator::Operator;

use super::counters::{OperationKind, RunCounters};
use super::flag::RunFlag;
use super::pacing::{pace, PacingConfig};
use super::render::{HighlightTracker, Renderer};
use super::sound::{frequency_for, SoundCue, SoundSettings};

type SoundSink = Box<dyn Fn(SoundCue)>;

/// Hooks wired to a run flag, counters, pacing, and optional render and
/// sound collaborators.
///
/// Every call checks the flag, then counts. When the operation's delay is
/// non-zero it also plays a cue for the first column, highlights the columns
/// involved and sleeps; with a zero delay it only yields. Swaps redraw both
/// columns regardless of pacing.
pub struct InstrumentedHooks {
    flag: RunFlag,
    counters: Arc<RunCounters>,
    pacing: PacingConfig,
    sound: SoundSettings,
    columns: usize,
    renderer: Option<RefCell<Box<dyn Renderer>>>,
    tracker: RefCell<HighlightTracker>,
    sound_sink: Option<SoundSink>,
}

impl fmt::Debug for InstrumentedHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentedHooks")
            .field("flag", &self.flag)
            .field("counters", &self.counters.snapshot())
            .field("pacing", &self.pacing)
            .field("columns", &self.columns)
            .field("has_renderer", &self.renderer.is_some())
            .field("has_sound_sink", &self.sound_sink.is_some())
            .finish_non_exhaustive()
    }
}

impl InstrumentedHooks {
    /// Creates hooks bound to `flag` with default pacing and no collaborators.
    #[must_use]
    pub fn new(flag: RunFlag) -> Self {
        Self {
            flag,
            counters: Arc::new(RunCounters::new()),
            pacing: PacingConfig::default(),
            sound: SoundSettings::default(),
            columns: 0,
            renderer: None,
            tracker: RefCell::new(HighlightTracker::new()),
            sound_sink: None,
        }
    }

    /// Sets per-operation delays.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Attaches a rendering surface.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(RefCell::new(Box::new(renderer)));
        self
    }

    /// Attaches an audio sink.
    #[must_use]
    pub fn with_sound(mut self, settings: SoundSettings, sink: impl Fn(SoundCue) + 'static) -> Self {
        self.sound = settings;
        self.sound_sink = Some(Box::new(sink));
        self
    }

    /// Sets the column count used to map values to pitch.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Replaces per-operation delays between runs.
    pub fn set_pacing(&mut self, pacing: PacingConfig) {
        self.pacing = pacing;
    }

    /// Replaces sound settings between runs.
    pub fn set_sound_settings(&mut self, sound: SoundSettings) {
        self.sound = sound;
    }

    /// Updates the column count after a resize.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns;
    }

    /// The run flag.
    #[must_use]
    pub fn flag(&self) -> &RunFlag {
        &self.flag
    }

    /// The shared counters.
    #[must_use]
    pub fn counters(&self) -> Arc<RunCounters> {
        Arc::clone(&self.counters)
    }

    /// Current pacing.
    #[must_use]
    pub fn pacing(&self) -> PacingConfig {
        self.pacing
    }

    /// Clears any highlights left over from a run.
    pub fn stop_highlighting(&self, arr: &SortArray) {
        if let Some(renderer) = &self.renderer {
            let mut renderer = renderer.borrow_mut();
            self.tracker.borrow_mut().stop_highlighting(&mut **renderer, arr);
        }
    }

    fn redraw(&self, arr: &SortArray, indices: &[usize]) {
        if let Some(renderer) = &self.renderer {
            renderer.borrow_mut().redraw(arr, indices);
        }
    }

    /// Counts the operation and, when paced, voices and highlights it.
    /// Returns the delay to wait for.
    fn observe(
        &self,
        arr: &SortArray,
        kind: OperationKind,
        indices: &[usize],
        phase: Option<Phase>,
    ) -> std::time::Duration {
        self.counters.record(kind);
        let delay = self.pacing.delay_for(kind);
        if delay.is_zero() {
            return delay;
        }

        if let (Some(sink), Some(&column)) = (&self.sound_sink, indices.first()) {
            if self.sound.plays_on(kind) {
                sink(SoundCue {
                    frequency_hz: frequency_for(arr.value(column), self.columns, self.sound.frequency_range),
                    kind,
                    column,
                });
            }
        }
        if let Some(renderer) = &self.renderer {
            let mut renderer = renderer.borrow_mut();
            self.tracker
                .borrow_mut()
                .highlight(&mut **renderer, arr, indices, kind, phase);
        }
        delay
    }
}

impl SortHooks for InstrumentedHooks {
    async fn compare(
        &self,
        arr: &SortArray,
        i: usize,
        op: Operator,
        j: usize,
        phase: Option<Phase>,
    ) -> SortResult<bool> {
        self.flag.ensure_running()?;
        let delay = self.observe(arr, OperationKind::Comparison, &[i, j], phase);
        pace(delay).await;
        Ok(op.apply_values(arr.value(i), arr.value(j)))
    }

    async fn value_compare(
        &self,
        arr: &SortArray,
        i: usize,
        op: Operator,
        value: f64,
        phase: Option<Phase>,
    ) -> SortResult<bool> {
        self.flag.ensure_running()?;
        let delay = self.observe(arr, OperationKind::Comparison, &[i], phase);
        pace(delay).await;
        Ok(op.apply(f64::from(arr.value(i)), value))
    }

    async fn swap(&self, arr: &SortArray, i: usize, j: usize, phase: Option<Phase>) -> SortResult<()> {
        self.flag.ensure_running()?;
        arr.exchange(i, j);
        self.redraw(arr, &[i, j]);
        let delay = self.observe(arr, OperationKind::Swap, &[i, j], phase);
        pace(delay).await;
        Ok(())
    }

    async fn aux_write(&self, arr: &SortArray, i: usize, phase: Option<Phase>) -> SortResult<()> {
        self.flag.ensure_running()?;
        let delay = self.observe(arr, OperationKind::AuxWrite, &[i], phase);
        pace(delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::element::elements_from_values;
    use crate::error::SortError;
    use crate::host::render::{ChannelRenderer, RenderEvent};

    fn running_hooks() -> InstrumentedHooks {
        let flag = RunFlag::new();
        flag.start();
        InstrumentedHooks::new(flag)
    }

    #[tokio::test]
    async fn test_cleared_flag_fails_every_hook() {
        let hooks = InstrumentedHooks::new(RunFlag::new());
        let arr = SortArray::new(elements_from_values(&[1, 0]));
        assert!(matches!(
            hooks.compare(&arr, 0, Operator::Gt, 1, None).await,
            Err(SortError::NotRunning)
        ));
        assert!(hooks.value_compare(&arr, 0, Operator::Lt, 0.5, None).await.is_err());
        assert!(hooks.swap(&arr, 0, 1, None).await.is_err());
        assert!(hooks.aux_write(&arr, 0, None).await.is_err());
        assert_eq!(arr.values(), vec![1, 0]);
        assert_eq!(hooks.counters().snapshot().total(), 0);
    }

    #[tokio::test]
    async fn test_counts_and_evaluates_unpaced() {
        let hooks = running_hooks().with_pacing(PacingConfig::unpaced());
        let arr = SortArray::new(elements_from_values(&[4, 2]));
        assert!(hooks.compare(&arr, 0, Operator::Gt, 1, None).await.unwrap());
        assert!(hooks.value_compare(&arr, 1, Operator::Le, 2.0, None).await.unwrap());
        hooks.swap(&arr, 0, 1, None).await.unwrap();
        hooks.aux_write(&arr, 0, None).await.unwrap();

        assert_eq!(arr.values(), vec![2, 4]);
        let counters = hooks.counters().snapshot();
        assert_eq!((counters.comparisons, counters.swaps, counters.aux_writes), (2, 1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_operations_sleep_highlight_and_sound() {
        let cues = Rc::new(RefCell::new(Vec::new()));
        let sink_cues = Rc::clone(&cues);
        let (renderer, stream) = ChannelRenderer::bounded(64);
        let hooks = running_hooks()
            .with_pacing(PacingConfig {
                compare_ms: 10,
                swap_ms: 0,
                aux_write_ms: 0,
            })
            .with_columns(4)
            .with_renderer(renderer)
            .with_sound(SoundSettings::default(), move |cue| sink_cues.borrow_mut().push(cue));
        let arr = SortArray::new(elements_from_values(&[2, 0, 1, 3]));

        let before = tokio::time::Instant::now();
        hooks.compare(&arr, 0, Operator::Gt, 1, None).await.unwrap();
        assert!(before.elapsed() >= Duration::from_millis(10));

        let events = stream.drain();
        assert!(matches!(
            &events[..],
            [RenderEvent::Highlight {
                kind: OperationKind::Comparison,
                ..
            }]
        ));
        assert_eq!(cues.borrow().len(), 1);
        assert!((cues.borrow()[0].frequency_hz - 420.0).abs() < 1e-9);

        // Unpaced swap: redraw only, no highlight or cue.
        hooks.swap(&arr, 0, 1, None).await.unwrap();
        let events = stream.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RenderEvent::Redraw { .. }));
        assert_eq!(cues.borrow().len(), 1);

        hooks.stop_highlighting(&arr);
        assert!(matches!(&stream.drain()[..], [RenderEvent::Redraw { .. }]));
    }
}
