//! The host run loop.

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::SortEngine;
use crate::element::{create_elements, is_sorted, Element, ResetPreset, SortArray};
use crate::error::{SortResult, ValidationError};
use crate::options::{check_column_count, check_preconditions, Algorithm};
use crate::settings::Settings;

use super::counters::CounterSnapshot;
use super::flag::RunFlag;
use super::instrumented::InstrumentedHooks;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The catalog entry returned normally.
    Completed,
    /// The run flag was cleared mid-run.
    Cancelled,
    /// A hook failed for a reason other than cancellation.
    Failed {
        /// Rendered error.
        message: String,
    },
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// Catalog entry that ran.
    pub algorithm: Algorithm,
    /// Number of columns sorted.
    pub column_count: usize,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Operation counts at the end of the run.
    pub counters: CounterSnapshot,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub finished_at: DateTime<Utc>,
    /// Whether the array was in non-decreasing order afterwards.
    pub sorted: bool,
}

impl RunReport {
    /// Wall-clock duration of the run.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Returns true if the catalog entry ran to completion.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }
}

/// Owns the settings, the working set and an engine wired to
/// [`InstrumentedHooks`]. One run at a time: [`SortSession::run`] borrows the
/// session mutably, and cancellation goes through a [`RunFlag`] obtained from
/// [`SortSession::stop_handle`] beforehand.
#[derive(Debug)]
pub struct SortSession {
    settings: Settings,
    elements: Vec<Element>,
    engine: SortEngine<InstrumentedHooks>,
}

impl SortSession {
    /// Creates a session with default hooks and a freshly reset array.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the column count is out of range.
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        Self::with_hooks(settings, InstrumentedHooks::new(RunFlag::new()))
    }

    /// Creates a session around caller-built hooks, e.g. with a renderer or
    /// sound sink attached. Pacing, sound settings and column count are taken
    /// from `settings`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the column count is out of range.
    pub fn with_hooks(settings: Settings, hooks: InstrumentedHooks) -> Result<Self, ValidationError> {
        check_column_count(settings.column_count)?;
        let mut hooks = hooks;
        hooks.set_pacing(settings.pacing);
        hooks.set_sound_settings(settings.sound.clone());
        hooks.set_columns(settings.column_count);

        let mut session = Self {
            engine: SortEngine::new(settings.column_count, hooks),
            elements: Vec::new(),
            settings,
        };
        session.reset();
        Ok(session)
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The working set, as left by the last run or reset.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The hook implementation.
    #[must_use]
    pub fn hooks(&self) -> &InstrumentedHooks {
        self.engine.hooks()
    }

    /// Mutable access to the hooks between runs.
    pub fn hooks_mut(&mut self) -> &mut InstrumentedHooks {
        self.engine.hooks_mut()
    }

    /// A handle that stops the active run when cleared.
    #[must_use]
    pub fn stop_handle(&self) -> RunFlag {
        self.hooks().flag().clone()
    }

    /// Returns true while a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.hooks().flag().is_running()
    }

    /// Counts of the current or last run.
    #[must_use]
    pub fn counters(&self) -> CounterSnapshot {
        self.hooks().counters().snapshot()
    }

    /// Recreates values `0..N` and applies the configured reset preset.
    pub fn reset(&mut self) {
        let mut elements = create_elements(self.settings.column_count);
        self.settings.reset_preset.apply(&mut elements);
        debug!(
            "Reset {} columns ({})",
            elements.len(),
            self.settings.reset_preset
        );
        self.elements = elements;
    }

    /// Shuffles the current working set in place.
    pub fn shuffle(&mut self) {
        ResetPreset::Shuffle.apply(&mut self.elements);
    }

    /// Resizes the working set and resets it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `count` is out of range.
    pub fn set_column_count(&mut self, count: usize) -> Result<(), ValidationError> {
        check_column_count(count)?;
        self.settings.column_count = count;
        self.apply_column_count();
        Ok(())
    }

    /// Selects the catalog entry for the next run. If it only sorts
    /// power-of-two lengths the column count snaps down to one, and the
    /// working set is reset; returns true in that case.
    pub fn choose_algorithm(&mut self, algorithm: Algorithm) -> bool {
        self.settings.algorithm = algorithm;
        let snapped = self.settings.snap_column_count();
        if snapped {
            info!(
                "{algorithm} needs a power-of-two length; snapped to {} columns",
                self.settings.column_count
            );
            self.apply_column_count();
        }
        snapped
    }

    /// Replaces the settings between runs. The column count is snapped for
    /// the selected algorithm; the working set is reset if it changed size.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the current settings untouched,
    /// if the new settings are invalid.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ValidationError> {
        let mut settings = settings;
        settings.snap_column_count();
        settings.validate()?;

        let resized = settings.column_count != self.settings.column_count;
        let hooks = self.engine.hooks_mut();
        hooks.set_pacing(settings.pacing);
        hooks.set_sound_settings(settings.sound.clone());
        self.settings = settings;
        if resized {
            self.apply_column_count();
        }
        Ok(())
    }

    /// Replaces the working set with caller-provided elements. The column
    /// count follows the new length and is not range checked.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        let len = elements.len();
        self.settings.column_count = len;
        self.engine.set_column_count(len);
        self.engine.hooks_mut().set_columns(len);
        self.elements = elements;
    }

    /// Sorts the working set with the selected algorithm.
    ///
    /// Cancellation and hook failures are not errors here: both end the run
    /// and are reported in [`RunReport::outcome`]. The working set keeps
    /// whatever state the run left it in.
    ///
    /// # Errors
    ///
    /// Returns a validation error, without starting, if the algorithm's
    /// options or length requirement are not met.
    pub async fn run(&mut self) -> SortResult<RunReport> {
        let algorithm = self.settings.algorithm;
        let options = self.settings.algorithm_options.clone();
        let column_count = self.elements.len();
        check_preconditions(algorithm, &options, column_count)?;

        let counters = self.engine.hooks().counters();
        counters.reset();
        self.engine.hooks().flag().start();
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Run {run_id}: {algorithm} over {column_count} columns");

        let arr = SortArray::new(std::mem::take(&mut self.elements));
        let result = self.engine.run(algorithm, &arr, &options).await;

        let hooks = self.engine.hooks();
        hooks.flag().stop();
        hooks.stop_highlighting(&arr);
        self.elements = arr.into_inner();
        let finished_at = Utc::now();
        let counters = counters.snapshot();

        let outcome = match result {
            Ok(()) => {
                info!(
                    "Run {run_id} completed: {} comparisons, {} swaps, {} aux writes",
                    counters.comparisons, counters.swaps, counters.aux_writes
                );
                RunOutcome::Completed
            }
            Err(e) if e.is_cancellation() => {
                debug!("Run {run_id} cancelled after {} operations", counters.total());
                RunOutcome::Cancelled
            }
            Err(e) => {
                error!("Run {run_id} failed: {e}");
                RunOutcome::Failed { message: e.to_string() }
            }
        };

        Ok(RunReport {
            run_id,
            algorithm,
            column_count,
            outcome,
            counters,
            started_at,
            finished_at,
            sorted: is_sorted(&self.elements),
        })
    }

    fn apply_column_count(&mut self) {
        let count = self.settings.column_count;
        self.engine.set_column_count(count);
        self.engine.hooks_mut().set_columns(count);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::is_permutation_of;
    use crate::error::SortError;
    use crate::host::PacingConfig;
    use crate::options::AlgorithmOptions;

    fn unpaced(algorithm: Algorithm, column_count: usize) -> Settings {
        Settings {
            column_count,
            algorithm,
            pacing: PacingConfig::unpaced(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_rejects_out_of_range_columns() {
        assert!(matches!(
            SortSession::new(unpaced(Algorithm::QuickSort, 2000)),
            Err(ValidationError::ColumnCountOutOfRange { count: 2000, .. })
        ));
    }

    #[test]
    fn test_reset_presets() {
        let mut settings = unpaced(Algorithm::QuickSort, 16);
        settings.reset_preset = ResetPreset::ReverseSorted;
        let session = SortSession::new(settings).unwrap();
        let values: Vec<u32> = session.elements().iter().map(|e| e.value).collect();
        assert_eq!(values, (0..16).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_run_completes_and_reports() {
        let mut session = SortSession::new(unpaced(Algorithm::ShellSort, 50)).unwrap();
        let before = session.elements().to_vec();

        let report = session.run().await.unwrap();
        assert!(report.is_completed());
        assert!(report.sorted);
        assert_eq!(report.algorithm, Algorithm::ShellSort);
        assert_eq!(report.column_count, 50);
        assert!(report.counters.comparisons > 0);
        assert_eq!(report.counters, session.counters());
        assert!(report.duration() >= chrono::Duration::zero());
        assert!(is_permutation_of(session.elements(), &before));
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn test_counters_reset_between_runs() {
        let mut session = SortSession::new(unpaced(Algorithm::SelectionSort, 10)).unwrap();
        let first = session.run().await.unwrap();
        // Sorted input: selection sort still compares every pair, but swaps nothing.
        let second = session.run().await.unwrap();
        assert_eq!(second.counters.comparisons, first.counters.comparisons);
        assert_eq!(second.counters.swaps, 0);
        assert_ne!(first.run_id, second.run_id);
    }

    #[tokio::test]
    async fn test_run_rejects_non_power_of_two() {
        let mut session = SortSession::new(unpaced(Algorithm::QuickSort, 12)).unwrap();
        // choose_algorithm would snap; select without it.
        session.settings.algorithm = Algorithm::BitonicSort;

        let err = session.run().await.unwrap_err();
        assert!(matches!(
            err,
            SortError::Validation(ValidationError::NonPowerOfTwoLength { len: 12, .. })
        ));
        assert_eq!(session.counters().total(), 0);
        assert_eq!(session.elements().len(), 12);
    }

    #[tokio::test]
    async fn test_stop_mid_run_is_cancelled() {
        let mut session = SortSession::new(unpaced(Algorithm::BubbleSort, 8)).unwrap();
        session.set_elements(crate::element::elements_from_values(&[7, 6, 5, 4, 3, 2, 1, 0]));
        let stop = session.stop_handle();

        // The first comparison yields; the stop lands before the swap.
        let (report, ()) = tokio::join!(session.run(), async {
            stop.stop();
        });
        let report = report.unwrap();
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.counters.comparisons, 1);
        assert_eq!(report.counters.swaps, 0);
        assert!(!report.sorted);
        assert_eq!(session.elements()[0].value, 7);
        assert!(!session.is_running());
    }

    #[test]
    fn test_choose_algorithm_snaps_columns() {
        let mut session = SortSession::new(unpaced(Algorithm::QuickSort, 100)).unwrap();
        assert!(!session.choose_algorithm(Algorithm::OddEvenSort));
        assert!(session.choose_algorithm(Algorithm::BitonicSort));
        assert_eq!(session.settings().column_count, 64);
        assert_eq!(session.elements().len(), 64);
    }

    #[test]
    fn test_update_settings() {
        let mut session = SortSession::new(unpaced(Algorithm::QuickSort, 32)).unwrap();
        let mut settings = session.settings().clone();
        settings.column_count = 48;
        settings.pacing = PacingConfig::uniform(7);
        session.update_settings(settings).unwrap();
        assert_eq!(session.elements().len(), 48);
        assert_eq!(session.hooks().pacing(), PacingConfig::uniform(7));

        let mut bad = session.settings().clone();
        bad.algorithm_options = AlgorithmOptions::default().with_base(1);
        bad.algorithm = Algorithm::RadixSortLsd;
        assert!(session.update_settings(bad).is_err());
        assert_eq!(session.settings().algorithm, Algorithm::QuickSort);
    }

    #[test]
    fn test_set_column_count() {
        let mut session = SortSession::new(unpaced(Algorithm::QuickSort, 32)).unwrap();
        assert!(session.set_column_count(7).is_err());
        session.set_column_count(1024).unwrap();
        assert_eq!(session.elements().len(), 1024);
    }

    #[test]
    fn test_report_json() {
        let report = RunReport {
            run_id: Uuid::nil(),
            algorithm: Algorithm::CombSort,
            column_count: 8,
            outcome: RunOutcome::Failed {
                message: "boom".to_string(),
            },
            counters: CounterSnapshot::default(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            sorted: false,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["message"], "boom");
        assert_eq!(json["algorithm"], "comb_sort");
    }
}
