use std::{fs::File, io::BufReader, path::Path};

use crate::{
    audio::record::WaveformRecord,
    foundation::error::{WaveglowError, WaveglowResult},
};

/// Frames pulled from the container per read step.
pub const DECODE_CHUNK_FRAMES: usize = 44_100;

/// Progress notification emitted after every decoded chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Frames decoded so far.
    pub frames_read: u64,
    /// Frames declared by the header.
    pub frames_total: u64,
}

/// Header fields the decoder relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcmHeader {
    /// Frame rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bytes per sample (1, 2 or 4 for supported inputs).
    pub bytes_per_sample: u16,
    /// Number of frames (samples per channel).
    pub frame_count: u64,
}

/// Decode a WAV file into a normalized mono [`WaveformRecord`].
pub fn decode(wav_path: &Path) -> WaveglowResult<WaveformRecord> {
    decode_with_progress(wav_path, |_| {})
}

/// Decode a WAV file, reporting progress after every chunk of [`DECODE_CHUNK_FRAMES`] frames.
///
/// Multi-channel audio is downmixed by the arithmetic mean of each frame. The result is divided
/// by its peak absolute value unless the signal is all zero.
pub fn decode_with_progress(
    wav_path: &Path,
    mut on_progress: impl FnMut(DecodeProgress),
) -> WaveglowResult<WaveformRecord> {
    let reader = hound::WavReader::open(wav_path).map_err(|e| map_hound_err(wav_path, e))?;
    let header = read_header(&reader)?;
    tracing::debug!(
        path = %wav_path.display(),
        sample_rate = header.sample_rate,
        channels = header.channels,
        bytes_per_sample = header.bytes_per_sample,
        frames = header.frame_count,
        "decoding pcm"
    );

    let mut samples = downmix_frames(reader, header, &mut on_progress)
        .map_err(|e| map_hound_err(wav_path, e))?;
    normalize_peak(&mut samples);

    Ok(WaveformRecord {
        samples,
        duration: header.frame_count as f64 / f64::from(header.sample_rate),
        frame_count: header.frame_count,
    })
}

/// Validate the container header and extract the fields the decoder needs.
pub fn read_header<R: std::io::Read>(reader: &hound::WavReader<R>) -> WaveglowResult<PcmHeader> {
    let spec = reader.spec();
    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 8 | 16 | 32) => {}
        (format, bits) => {
            return Err(WaveglowError::UnsupportedFormat {
                bits_per_sample: bits,
                float: format == hound::SampleFormat::Float,
            });
        }
    }
    if spec.channels == 0 {
        return Err(WaveglowError::invalid_input("wav header declares 0 channels"));
    }
    if spec.sample_rate == 0 {
        return Err(WaveglowError::invalid_input(
            "wav header declares a 0 Hz sample rate",
        ));
    }
    let frame_count = u64::from(reader.duration());
    if frame_count == 0 {
        return Err(WaveglowError::invalid_input("wav file contains no frames"));
    }

    Ok(PcmHeader {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bytes_per_sample: spec.bits_per_sample / 8,
        frame_count,
    })
}

fn downmix_frames(
    mut reader: hound::WavReader<BufReader<File>>,
    header: PcmHeader,
    on_progress: &mut impl FnMut(DecodeProgress),
) -> Result<Vec<f32>, hound::Error> {
    let channels = usize::from(header.channels);
    let mut out = Vec::with_capacity(header.frame_count.min(1 << 28) as usize);
    // hound re-centers 8-bit data around zero; undo that so samples keep their raw unsigned
    // values.
    let bias = if header.bytes_per_sample == 1 { 128 } else { 0 };
    let mut iter = reader.samples::<i32>();
    let mut frame = Vec::with_capacity(channels);
    let mut frames_read = 0u64;

    'chunks: while frames_read < header.frame_count {
        let to_read = (header.frame_count - frames_read).min(DECODE_CHUNK_FRAMES as u64);
        for _ in 0..to_read {
            frame.clear();
            for _ in 0..channels {
                match iter.next() {
                    Some(Ok(s)) => frame.push(s + bias),
                    Some(Err(hound::Error::IoError(e)))
                        if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                    {
                        break;
                    }
                    Some(Err(e)) => return Err(e),
                    None => break,
                }
            }
            if frame.len() < channels {
                // Truncated data chunk: keep what was complete.
                break 'chunks;
            }
            out.push(mean_of_frame(&frame));
            frames_read += 1;
        }
        on_progress(DecodeProgress {
            frames_read,
            frames_total: header.frame_count,
        });
    }

    if frames_read < header.frame_count {
        tracing::warn!(
            frames_read,
            frames_total = header.frame_count,
            "pcm data ended before the declared frame count"
        );
        on_progress(DecodeProgress {
            frames_read,
            frames_total: header.frame_count,
        });
    }

    Ok(out)
}

fn mean_of_frame(frame: &[i32]) -> f32 {
    if let [mono] = frame {
        return *mono as f32;
    }
    let sum: i64 = frame.iter().map(|&s| i64::from(s)).sum();
    (sum as f64 / frame.len() as f64) as f32
}

/// Scale `samples` so the largest magnitude becomes exactly 1. Silence is left untouched.
pub fn normalize_peak(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}

fn map_hound_err(path: &Path, e: hound::Error) -> WaveglowError {
    match e {
        hound::Error::IoError(io) => WaveglowError::Io(io),
        hound::Error::Unsupported => WaveglowError::invalid_input(format!(
            "'{}' uses a wav feature that is not supported",
            path.display()
        )),
        other => WaveglowError::invalid_input(format!(
            "'{}' is not a valid wav file: {other}",
            path.display()
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/decode.rs"]
mod tests;
