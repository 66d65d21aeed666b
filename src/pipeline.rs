use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    audio::{
        cache::{FsWaveformCache, WaveformCache},
        decode::{DecodeProgress, decode_with_progress},
        downsample::downsample,
        fingerprint::{AudioFingerprint, fingerprint},
        record::WaveformRecord,
    },
    config::PipelineConfig,
    foundation::error::{WaveglowError, WaveglowResult},
    media::ffmpeg::Transcoder,
    render::waveform::render,
};

/// Steps of one pipeline run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Validating arguments.
    Init,
    /// Hashing the input for the cache key.
    Fingerprinting,
    /// Looking the fingerprint up in the cache.
    CacheLookup,
    /// Converting a non-WAV input to WAV.
    Transcode,
    /// Reading PCM samples.
    Decode,
    /// Writing the decoded record to the cache.
    CacheStore,
    /// Reducing the record to the point budget.
    Downsample,
    /// Drawing and writing the SVG.
    Render,
    /// Removing transient files.
    Cleanup,
    /// Finished successfully.
    Done,
}

/// What the cache contributed to a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The decoded record came from the cache.
    Hit,
    /// The input was decoded; the record was offered to the cache.
    Miss,
    /// Caching was disabled or the input could not be fingerprinted.
    Unavailable,
}

/// Summary of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    /// Cache behavior for this run.
    pub cache: CacheOutcome,
    /// Whether the transcoder was invoked.
    pub transcoded: bool,
    /// Frames in the decoded source.
    pub frame_count: u64,
    /// Source duration in seconds.
    pub duration: f64,
    /// Points drawn after downsampling.
    pub points: usize,
    /// SVG written.
    pub output: PathBuf,
}

/// Turn `input` into a waveform SVG at `output`.
///
/// Opens the filesystem cache named by `config.cache_dir` (a failure to open it only disables
/// caching) and then runs [`run_with_cache`].
pub fn run_pipeline(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    transcoder: &dyn Transcoder,
    on_progress: impl FnMut(DecodeProgress),
) -> WaveglowResult<PipelineReport> {
    let cache = match config.cache_dir.as_deref() {
        Some(dir) => match FsWaveformCache::open(dir) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cache directory unavailable; continuing without cache");
                None
            }
        },
        None => None,
    };
    run_with_cache(
        input,
        output,
        config,
        cache.as_ref().map(|c| c as &dyn WaveformCache),
        transcoder,
        on_progress,
    )
}

/// Run the pipeline against an explicit cache (or none).
///
/// Non-`.wav` inputs are transcoded into a uniquely named file under `config.temp_dir`, which is
/// removed on every exit path. The input itself is never touched.
#[tracing::instrument(
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn run_with_cache(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    cache: Option<&dyn WaveformCache>,
    transcoder: &dyn Transcoder,
    mut on_progress: impl FnMut(DecodeProgress),
) -> WaveglowResult<PipelineReport> {
    enter(PipelineStage::Init);
    config.validate()?;
    if !input.is_file() {
        return Err(WaveglowError::invalid_input(format!(
            "input file not found: {}",
            input.display()
        )));
    }

    let fp = match cache {
        Some(_) => {
            enter(PipelineStage::Fingerprinting);
            match fingerprint(input) {
                Ok(fp) => Some(fp),
                Err(e) => {
                    tracing::warn!(error = %e, "fingerprint failed; cache unavailable");
                    None
                }
            }
        }
        None => None,
    };

    let cached = match (cache, fp.as_ref()) {
        (Some(cache), Some(fp)) => {
            enter(PipelineStage::CacheLookup);
            cache.get(fp)
        }
        _ => None,
    };

    let mut temp = TempFileGuard(None);
    let (record, outcome, transcoded) = match cached {
        Some(record) => {
            tracing::info!("using cached waveform");
            (record, CacheOutcome::Hit, false)
        }
        None => {
            let transcoded = !is_wav(input);
            let wav_path = if transcoded {
                enter(PipelineStage::Transcode);
                let path = temp_wav_path(&config.temp_dir);
                temp.0 = Some(path.clone());
                transcoder.transcode(input, &path)?;
                path
            } else {
                input.to_path_buf()
            };

            enter(PipelineStage::Decode);
            let record = decode_with_progress(&wav_path, &mut on_progress)?;
            tracing::info!(
                frames = record.frame_count,
                duration = record.duration,
                "decoded audio"
            );

            let outcome = match (cache, fp.as_ref()) {
                (Some(cache), Some(fp)) => {
                    enter(PipelineStage::CacheStore);
                    store(cache, fp, &record);
                    CacheOutcome::Miss
                }
                _ => CacheOutcome::Unavailable,
            };
            (record, outcome, transcoded)
        }
    };

    enter(PipelineStage::Downsample);
    let series = downsample(
        &record.samples,
        record.duration,
        record.frame_count,
        config.max_points,
    )?;

    enter(PipelineStage::Render);
    render(&series, output, &config.render)?;

    enter(PipelineStage::Cleanup);
    drop(temp);

    enter(PipelineStage::Done);
    Ok(PipelineReport {
        cache: outcome,
        transcoded,
        frame_count: record.frame_count,
        duration: record.duration,
        points: series.len(),
        output: output.to_path_buf(),
    })
}

fn enter(stage: PipelineStage) {
    tracing::debug!(?stage, "pipeline stage");
}

fn store(cache: &dyn WaveformCache, fp: &AudioFingerprint, record: &WaveformRecord) {
    if let Err(e) = cache.put(fp, record) {
        tracing::warn!(fingerprint = %fp, error = %e, "cache store failed; continuing");
    }
}

/// `true` when `path` has a `.wav` extension (any case).
pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
}

fn temp_wav_path(dir: &Path) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    dir.join(format!(
        "waveglow_transcode_{}_{}_{}.wav",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
        SEQ.fetch_add(1, Ordering::Relaxed)
    ))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
