use serde::{Deserialize, Serialize};

use crate::foundation::error::{WaveglowError, WaveglowResult};

/// Normalized mono waveform produced by the decoder and stored in the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveformRecord {
    /// Mono amplitudes in `[-1, 1]`, one per decoded frame.
    pub samples: Vec<f32>,
    /// Length of the source in seconds (`frame_count / sample_rate`).
    pub duration: f64,
    /// Frame count declared by the source header.
    pub frame_count: u64,
}

impl WaveformRecord {
    /// Check the structural invariants every record must satisfy.
    ///
    /// Used by the cache to reject entries that deserialize but could not have come from a
    /// successful decode.
    pub fn validate(&self) -> WaveglowResult<()> {
        if self.frame_count == 0 {
            return Err(WaveglowError::validation("frame_count must be > 0"));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(WaveglowError::validation(
                "duration must be finite and > 0",
            ));
        }
        if self.samples.len() as u64 > self.frame_count {
            return Err(WaveglowError::validation(format!(
                "record holds {} samples but only {} frames",
                self.samples.len(),
                self.frame_count
            )));
        }
        if self
            .samples
            .iter()
            .any(|s| !s.is_finite() || s.abs() > 1.0)
        {
            return Err(WaveglowError::validation(
                "samples must be finite and within [-1, 1]",
            ));
        }
        Ok(())
    }
}
