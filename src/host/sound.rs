//! Audio cue settings. Playback itself belongs to the host; the hooks only
//! hand a [`SoundCue`] to a sink.

use serde::{Deserialize, Serialize};

use super::counters::OperationKind;

/// Oscillator shape for the host's synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundWave {
    /// Pure tone.
    Sine,
    /// Hollow, buzzy tone.
    Square,
    /// Bright tone rich in harmonics.
    Sawtooth,
    /// Soft tone; the default.
    #[default]
    Triangle,
}

/// Which operations produce a tone, and at what pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Volume, 0 to 100.
    pub volume: u8,
    /// Oscillator shape.
    pub wave: SoundWave,
    /// Lowest and highest tone in Hz.
    pub frequency_range: [f64; 2],
    /// Voice comparisons.
    pub play_on_comparison: bool,
    /// Voice swaps.
    pub play_on_swap: bool,
    /// Voice auxiliary writes.
    pub play_on_aux_write: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            volume: 50,
            wave: SoundWave::Triangle,
            frequency_range: [200.0, 640.0],
            play_on_comparison: true,
            play_on_swap: false,
            play_on_aux_write: false,
        }
    }
}

impl SoundSettings {
    /// Returns true if operations of `kind` are voiced.
    #[must_use]
    pub const fn plays_on(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Comparison => self.play_on_comparison,
            OperationKind::Swap => self.play_on_swap,
            OperationKind::AuxWrite => self.play_on_aux_write,
        }
    }
}

/// A tone requested for one paced operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    /// Pitch derived from the column's value.
    pub frequency_hz: f64,
    /// Operation that produced the tone.
    pub kind: OperationKind,
    /// Column whose value was voiced.
    pub column: usize,
}

/// Maps a column value linearly onto `range`: value 0 sounds at the low end,
/// value `columns` at the high end.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frequency_for(value: u32, columns: usize, range: [f64; 2]) -> f64 {
    let [low, high] = range;
    if columns == 0 {
        return low;
    }
    low + (high - low) * f64::from(value) / columns as f64
}
