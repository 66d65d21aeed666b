//! Audio data pipeline: fingerprinting, caching, PCM decoding and downsampling.

/// Fingerprint-keyed waveform cache.
pub mod cache;
/// WAV decoding into normalized mono records.
pub mod decode;
/// Block-mean reduction of long sample sequences.
pub mod downsample;
/// Content + mtime file identity.
pub mod fingerprint;
/// The cached waveform record type.
pub mod record;
