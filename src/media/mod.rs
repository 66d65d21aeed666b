//! External media tooling.

/// `ffmpeg`-based transcoding to canonical PCM WAV.
pub mod ffmpeg;
