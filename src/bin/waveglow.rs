use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Extensions offered by the interactive prompt.
const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "flac", "ogg", "m4a", "aac"];

#[derive(Parser, Debug)]
#[command(name = "waveglow", version, about = "Render an audio file as a glowing SVG waveform")]
struct Cli {
    /// Input audio file. Prompts with the audio files in the current directory when omitted.
    input: Option<PathBuf>,

    /// Output SVG path.
    #[arg(long, default_value = "waveform.svg")]
    out: PathBuf,

    /// JSON pipeline config; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache directory for decoded waveforms.
    #[arg(long, conflicts_with = "no_cache")]
    cache_dir: Option<PathBuf>,

    /// Disable the waveform cache.
    #[arg(long)]
    no_cache: bool,

    /// Maximum number of rendered points.
    #[arg(long)]
    max_points: Option<usize>,

    /// Gradient colormap.
    #[arg(long, value_enum)]
    colormap: Option<ColormapChoice>,

    /// Also rasterize the SVG to this PNG path.
    #[arg(long)]
    preview_png: Option<PathBuf>,

    /// Preview width in pixels (defaults to the SVG width).
    #[arg(long, requires = "preview_png")]
    preview_width: Option<u32>,

    /// Transcoder program used for non-WAV inputs.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColormapChoice {
    Turbo,
    Viridis,
}

impl From<ColormapChoice> for waveglow::Colormap {
    fn from(c: ColormapChoice) -> Self {
        match c {
            ColormapChoice::Turbo => waveglow::Colormap::Turbo,
            ColormapChoice::Viridis => waveglow::Colormap::Viridis,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<waveglow::WaveglowError>()
        .map(waveglow::WaveglowError::exit_code)
        .unwrap_or(1)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;

    let input = match cli.input {
        Some(path) => path,
        None => prompt_for_input(Path::new("."))?,
    };

    let transcoder = waveglow::FfmpegTranscoder::with_program(&cli.ffmpeg);

    let mut bar: Option<ProgressBar> = None;
    let report = waveglow::run_pipeline(&input, &cli.out, &config, &transcoder, |p| {
        let pb = bar.get_or_insert_with(|| decode_bar(p.frames_total));
        pb.set_position(p.frames_read);
    });
    if let Some(pb) = bar {
        pb.finish_and_clear();
    }
    let report = report?;

    tracing::info!(
        cache = ?report.cache,
        transcoded = report.transcoded,
        points = report.points,
        duration = report.duration,
        "done"
    );
    eprintln!("wrote {}", report.output.display());

    if let Some(png) = &cli.preview_png {
        waveglow::write_png_preview(&report.output, png, cli.preview_width)?;
        eprintln!("wrote {}", png.display());
    }
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<waveglow::PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => waveglow::PipelineConfig::from_path(path)?,
        None => waveglow::PipelineConfig::default(),
    };
    if cli.no_cache {
        config.cache_dir = None;
    } else if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    if let Some(n) = cli.max_points {
        config.max_points = n;
    }
    if let Some(c) = cli.colormap {
        config.render.colormap = c.into();
    }
    config.validate()?;
    Ok(config)
}

fn decode_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} decoding [{bar:40.cyan/blue}] {percent}% ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn list_audio_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))? {
        let path = entry?.path();
        let is_audio = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                AUDIO_EXTENSIONS
                    .iter()
                    .any(|known| e.eq_ignore_ascii_case(known))
            });
        if is_audio && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Show the audio files in `dir` and read a choice (list number or path) from stdin.
fn prompt_for_input(dir: &Path) -> anyhow::Result<PathBuf> {
    let files = list_audio_files(dir)?;
    if files.is_empty() {
        eprintln!("no audio files found in {}", dir.display());
    } else {
        eprintln!("audio files:");
        for (i, f) in files.iter().enumerate() {
            eprintln!("  {:>2}. {}", i + 1, f.display());
        }
    }
    eprint!("audio file (number or path): ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    let n = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read selection from stdin")?;
    let choice = line.trim();
    if n == 0 || choice.is_empty() {
        anyhow::bail!("no input selected");
    }

    if let Ok(idx) = choice.parse::<usize>()
        && let Some(path) = idx.checked_sub(1).and_then(|i| files.get(i))
    {
        return Ok(path.clone());
    }
    Ok(PathBuf::from(choice))
}
