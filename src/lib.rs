//! Waveglow turns an audio file into a stylized, glowing SVG waveform.
//!
//! # Pipeline overview
//!
//! 1. **Fingerprint**: SHA-256 of the file bytes plus its modification time (the cache key)
//! 2. **Cache lookup**: a previously decoded [`WaveformRecord`] is reused when present
//! 3. **Transcode** (non-WAV only): the system `ffmpeg` converts the input to 16-bit PCM WAV
//! 4. **Decode**: WAV frames are downmixed to mono and peak-normalized
//! 5. **Downsample**: block means bound the series to `max_points`
//! 6. **Render**: shadow, glow, highlight, main and edge passes are written as one SVG
//!
//! Every transient file is removed before [`run_pipeline`] returns, whether it succeeds or not.
//!
//! # Getting started
//!
//! ```no_run
//! use std::path::Path;
//! use waveglow::{FfmpegTranscoder, PipelineConfig, run_pipeline};
//!
//! let report = run_pipeline(
//!     Path::new("song.mp3"),
//!     Path::new("waveform.svg"),
//!     &PipelineConfig::default(),
//!     &FfmpegTranscoder::new(),
//!     |_| {},
//! )?;
//! println!("{} points, cache {:?}", report.points, report.cache);
//! # Ok::<(), waveglow::WaveglowError>(())
//! ```
//!
//! The stages are also usable on their own. [`render_to_string`] returns the SVG document for an
//! already downsampled series without touching the filesystem:
//!
//! ```
//! use waveglow::{RenderOptions, downsample, render_to_string};
//!
//! let samples: Vec<f32> = (0..10_000).map(|i| (i as f32 * 0.01).sin()).collect();
//! let series = downsample(&samples, 1.0, 10_000, 500)?;
//! let svg = render_to_string(&series, &RenderOptions::default())?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), waveglow::WaveglowError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod audio;
mod config;
mod foundation;
mod media;
mod pipeline;
mod render;

pub use audio::cache::{CACHE_FORMAT_VERSION, FsWaveformCache, WaveformCache};
pub use audio::decode::{
    DECODE_CHUNK_FRAMES, DecodeProgress, PcmHeader, decode, decode_with_progress,
    normalize_peak, read_header,
};
pub use audio::downsample::{DownsampledSeries, downsample, linspace};
pub use audio::fingerprint::{AudioFingerprint, fingerprint};
pub use audio::record::WaveformRecord;
pub use config::{DEFAULT_CACHE_DIR, DEFAULT_MAX_POINTS, PipelineConfig};
pub use foundation::core::{Affine, Canvas, Line, Point, Rect, Rgba};
pub use foundation::error::{WaveglowError, WaveglowResult};
pub use media::ffmpeg::{
    FfmpegTranscoder, TRANSCODE_SAMPLE_RATE, Transcoder, ensure_parent_dir, is_tool_on_path,
};
pub use pipeline::{
    CacheOutcome, PipelineReport, PipelineStage, is_wav, run_pipeline, run_with_cache,
};
pub use render::colormap::Colormap;
pub use render::layers::{GLOW_PASSES, LayerColor, LayerKind, RenderLayer, standard_layers};
pub use render::raster::{MAX_PREVIEW_DIM, Preview, rasterize_svg, write_png_preview};
pub use render::surface::{LayerHandle, Segment, SvgSurface};
pub use render::waveform::{RenderOptions, RenderStats, draw, render, render_to_string};
