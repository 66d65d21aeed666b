use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::foundation::error::{WaveglowError, WaveglowResult};

/// Sample rate every transcoded file is resampled to.
pub const TRANSCODE_SAMPLE_RATE: u32 = 44_100;

/// Converts an arbitrary audio file into a 16-bit PCM WAV the decoder understands.
pub trait Transcoder {
    /// Write a WAV version of `input` to `output`, overwriting it.
    fn transcode(&self, input: &Path, output: &Path) -> WaveglowResult<()>;
}

/// [`Transcoder`] backed by the system `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    sample_rate: u32,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegTranscoder {
    /// Use `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Use a specific program name or path.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            sample_rate: TRANSCODE_SAMPLE_RATE,
        }
    }

    /// Program that will be spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd.args(["-y", "-loglevel", "error", "-i"])
            .arg(input)
            .args([
                "-acodec",
                "pcm_s16le",
                "-ar",
                &self.sample_rate.to_string(),
            ])
            .arg(output);
        cmd
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> WaveglowResult<()> {
        ensure_parent_dir(output)?;

        tracing::info!(input = %input.display(), output = %output.display(), "transcoding to wav");
        let out = self
            .command(input, output)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => WaveglowError::ExternalToolMissing {
                    tool: self.tool_name(),
                },
                _ => WaveglowError::Io(e),
            })?;

        if !out.status.success() {
            return Err(WaveglowError::ExternalToolFailed {
                tool: self.tool_name(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Check whether `program -version` runs successfully.
pub fn is_tool_on_path(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> WaveglowResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffmpeg.rs"]
mod tests;
