use std::{
    fs::File,
    io::Read,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use sha2::{Digest as _, Sha256};

use crate::foundation::error::WaveglowResult;

const READ_CHUNK_BYTES: usize = 8192;

/// Content + modification-time identity of a source file, used as the cache key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AudioFingerprint([u8; 32]);

impl AudioFingerprint {
    /// Wrap a raw SHA-256 digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form (64 characters).
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 2);
        for b in self.0 {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }
}

impl std::fmt::Display for AudioFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash the full contents of `path` followed by its modification time.
///
/// The file is streamed in fixed-size chunks so memory use does not depend on file size.
pub fn fingerprint(path: &Path) -> WaveglowResult<AudioFingerprint> {
    let mut f = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_CHUNK_BYTES];
    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let modified = f.metadata()?.modified()?;
    hasher.update(mtime_token(modified).as_bytes());

    Ok(AudioFingerprint(hasher.finalize().into()))
}

fn mtime_token(modified: SystemTime) -> String {
    match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos().to_string(),
        Err(e) => format!("-{}", e.duration().as_nanos()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/fingerprint.rs"]
mod tests;
