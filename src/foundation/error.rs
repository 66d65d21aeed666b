/// Convenience result type used across waveglow.
pub type WaveglowResult<T> = Result<T, WaveglowError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WaveglowError {
    /// File open/stat/read/write failures.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file is missing or is not a readable PCM container.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The PCM container uses a sample encoding the decoder does not handle.
    #[error("unsupported sample format: {bits_per_sample}-bit {}", sample_kind(.float))]
    UnsupportedFormat {
        /// Bits per sample declared by the container header.
        bits_per_sample: u16,
        /// Whether the samples are IEEE float rather than integer PCM.
        float: bool,
    },

    /// The external transcoder binary could not be found.
    #[error("{tool} is not installed or not found in PATH")]
    ExternalToolMissing {
        /// Program name or path that failed to spawn.
        tool: String,
    },

    /// The external transcoder ran but exited unsuccessfully.
    #[error("{tool} exited with status {status}: {stderr}")]
    ExternalToolFailed {
        /// Program name or path.
        tool: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// A cache entry could not be decoded. Never surfaced past the cache layer.
    #[error("cache corrupt: {0}")]
    CacheCorrupt(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or writing the output image.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaveglowError {
    /// Build a [`WaveglowError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`WaveglowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WaveglowError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WaveglowError::CacheCorrupt`] value.
    pub fn cache_corrupt(msg: impl Into<String>) -> Self {
        Self::CacheCorrupt(msg.into())
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::UnsupportedFormat { .. } => 3,
            Self::ExternalToolMissing { .. } => 4,
            Self::ExternalToolFailed { .. } => 5,
            Self::Io(_)
            | Self::CacheCorrupt(_)
            | Self::Validation(_)
            | Self::Render(_)
            | Self::Other(_) => 1,
        }
    }
}

fn sample_kind(float: &bool) -> &'static str {
    if *float { "float" } else { "integer" }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
