use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    audio::{fingerprint::AudioFingerprint, record::WaveformRecord},
    foundation::error::{WaveglowError, WaveglowResult},
};

/// Bumped whenever the on-disk envelope or record layout changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Fingerprint-keyed store of decoded waveforms.
///
/// Lookups never fail: anything that cannot be turned back into a valid record is a miss.
pub trait WaveformCache {
    /// Fetch the record stored for `fp`, or `None` on a miss.
    fn get(&self, fp: &AudioFingerprint) -> Option<WaveformRecord>;

    /// Store `record` under `fp`. Callers treat failures as "skip caching this run".
    fn put(&self, fp: &AudioFingerprint, record: &WaveformRecord) -> WaveglowResult<()>;
}

#[derive(Serialize, Deserialize)]
struct CacheEnvelope {
    version: u32,
    record: WaveformRecord,
}

#[derive(Serialize)]
struct CacheEnvelopeRef<'a> {
    version: u32,
    record: &'a WaveformRecord,
}

/// Filesystem cache: one JSON file per fingerprint under a fixed directory.
///
/// Entries are never evicted. A changed source file produces a new fingerprint, leaving the old
/// entry orphaned.
#[derive(Clone, Debug)]
pub struct FsWaveformCache {
    dir: PathBuf,
}

impl FsWaveformCache {
    /// Open (creating if needed) a cache rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> WaveglowResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Cache root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `fp`, whether or not it exists.
    pub fn entry_path(&self, fp: &AudioFingerprint) -> PathBuf {
        self.dir.join(format!("{}.json", fp.to_hex()))
    }

    fn load(&self, path: &Path) -> WaveglowResult<WaveformRecord> {
        let bytes = std::fs::read(path)?;
        let env: CacheEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| WaveglowError::cache_corrupt(format!("json: {e}")))?;
        if env.version != CACHE_FORMAT_VERSION {
            return Err(WaveglowError::cache_corrupt(format!(
                "format version {} (expected {CACHE_FORMAT_VERSION})",
                env.version
            )));
        }
        env.record
            .validate()
            .map_err(|e| WaveglowError::cache_corrupt(e.to_string()))?;
        Ok(env.record)
    }
}

impl WaveformCache for FsWaveformCache {
    fn get(&self, fp: &AudioFingerprint) -> Option<WaveformRecord> {
        let path = self.entry_path(fp);
        if !path.is_file() {
            tracing::debug!(entry = %path.display(), "waveform cache miss");
            return None;
        }
        match self.load(&path) {
            Ok(record) => {
                tracing::debug!(entry = %path.display(), "waveform cache hit");
                Some(record)
            }
            Err(e) => {
                tracing::warn!(entry = %path.display(), error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    fn put(&self, fp: &AudioFingerprint, record: &WaveformRecord) -> WaveglowResult<()> {
        let path = self.entry_path(fp);
        let tmp = self.dir.join(format!(
            "{}.{}.tmp",
            fp.to_hex(),
            std::process::id()
        ));

        let bytes = serde_json::to_vec(&CacheEnvelopeRef {
            version: CACHE_FORMAT_VERSION,
            record,
        })
        .map_err(|e| WaveglowError::Other(anyhow::Error::new(e)))?;

        if let Err(e) = std::fs::write(&tmp, &bytes).and_then(|_| std::fs::rename(&tmp, &path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(entry = %path.display(), bytes = bytes.len(), "stored waveform cache entry");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cache.rs"]
mod tests;
