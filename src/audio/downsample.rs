use crate::foundation::error::{WaveglowError, WaveglowResult};

/// Bounded time/amplitude series ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct DownsampledSeries {
    /// Amplitude per point.
    pub amplitudes: Vec<f32>,
    /// Time in seconds per point, same length as `amplitudes`.
    pub time_axis: Vec<f64>,
}

impl DownsampledSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// `true` when the series has no points.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Number of 2-point segments the series draws as.
    pub fn segment_count(&self) -> usize {
        self.len().saturating_sub(1)
    }
}

/// Reduce `samples` to at most `max_points` block means.
///
/// When reduction happens the block size is `len / max_points`, the input is truncated to exactly
/// `block * max_points` samples and each block becomes its mean. The time span is then rescaled by
/// `reduced_len / frame_count`. Note the denominator is the original *frame count*, not the
/// sample count; existing renders depend on this exact ratio.
pub fn downsample(
    samples: &[f32],
    duration: f64,
    frame_count: u64,
    max_points: usize,
) -> WaveglowResult<DownsampledSeries> {
    if max_points == 0 {
        return Err(WaveglowError::validation("max_points must be > 0"));
    }

    if samples.len() <= max_points {
        return Ok(DownsampledSeries {
            amplitudes: samples.to_vec(),
            time_axis: linspace(0.0, duration, samples.len()),
        });
    }

    let factor = samples.len() / max_points;
    let amplitudes: Vec<f32> = samples[..factor * max_points]
        .chunks_exact(factor)
        .map(block_mean)
        .collect();

    let adjusted = duration * (amplitudes.len() as f64 / frame_count as f64);
    let time_axis = linspace(0.0, adjusted, amplitudes.len());
    Ok(DownsampledSeries {
        amplitudes,
        time_axis,
    })
}

fn block_mean(block: &[f32]) -> f32 {
    let sum: f64 = block.iter().map(|&s| f64::from(s)).sum();
    (sum / block.len() as f64) as f32
}

/// `n` evenly spaced values over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/downsample.rs"]
mod tests;
