use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{WaveglowError, WaveglowResult},
    render::waveform::RenderOptions,
};

/// Cache directory used when none is configured.
pub const DEFAULT_CACHE_DIR: &str = ".waveform_cache";

/// Point budget used when none is configured.
pub const DEFAULT_MAX_POINTS: usize = 3000;

/// Everything [`crate::run_pipeline`] needs besides the input, output and transcoder.
///
/// Loaded from JSON; every field is optional.
///
/// ```json
/// { "cache_dir": null, "max_points": 1500, "render": { "colormap": "viridis" } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where cache entries live; `None` disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Directory for transient transcoder output.
    pub temp_dir: PathBuf,
    /// Upper bound on rendered points.
    pub max_points: usize,
    /// Renderer settings.
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: Some(PathBuf::from(DEFAULT_CACHE_DIR)),
            temp_dir: std::env::temp_dir(),
            max_points: DEFAULT_MAX_POINTS,
            render: RenderOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> WaveglowResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| WaveglowError::validation(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> WaveglowResult<()> {
        if self.max_points == 0 {
            return Err(WaveglowError::validation("max_points must be > 0"));
        }
        if self.temp_dir.as_os_str().is_empty() {
            return Err(WaveglowError::validation("temp_dir must not be empty"));
        }
        self.render.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
