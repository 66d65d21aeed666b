use std::{ops::Range, path::Path};

use rayon::prelude::*;

use crate::{
    audio::downsample::DownsampledSeries,
    foundation::{
        core::{Affine, Canvas, Line, Point, Rect, Rgba},
        error::{WaveglowError, WaveglowResult},
    },
    media::ffmpeg::ensure_parent_dir,
    render::{
        colormap::Colormap,
        layers::{LayerKind, RenderLayer, standard_layers},
        surface::{Segment, SvgSurface},
    },
};

/// Styling and execution knobs for [`render`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Base stroke width `lw` every pass is scaled from.
    pub line_width: f64,
    /// Output canvas before view-box trimming.
    pub canvas: Canvas,
    /// Horizontal data margin as a fraction of the time span.
    pub margin_x: f64,
    /// Vertical data margin as a fraction of the amplitude span.
    pub margin_y: f64,
    /// Background fill.
    pub background: Rgba,
    /// Gradient source for the main and glow passes.
    pub colormap: Colormap,
    /// Main-pass segment count above which drawing is split across workers.
    pub parallel_threshold: usize,
    /// Worker count for the parallel main pass.
    pub workers: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_width: 2.8,
            canvas: Canvas::default(),
            margin_x: 0.01,
            margin_y: 0.18,
            background: Rgba::black(),
            colormap: Colormap::Turbo,
            parallel_threshold: 4000,
            workers: 4,
        }
    }
}

impl RenderOptions {
    /// Reject values that cannot produce a drawing.
    pub fn validate(&self) -> WaveglowResult<()> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(WaveglowError::validation("line_width must be finite and > 0"));
        }
        self.canvas.validate()?;
        for (name, m) in [("margin_x", self.margin_x), ("margin_y", self.margin_y)] {
            if !(m.is_finite() && m >= 0.0) {
                return Err(WaveglowError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.workers == 0 {
            return Err(WaveglowError::validation("render workers must be >= 1"));
        }
        Ok(())
    }
}

/// Summary of one render call.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStats {
    /// Points in the input series.
    pub points: usize,
    /// Segments drawn per pass.
    pub segments_per_pass: usize,
    /// Number of passes drawn.
    pub passes: usize,
    /// Whether the main pass ran on the worker pool.
    pub parallel: bool,
    /// Final (trimmed) view box.
    pub view_box: Rect,
}

/// Render `series` as a layered SVG and write it to `output`, overwriting any existing file.
#[tracing::instrument(skip(series, opts), fields(points = series.len()))]
pub fn render(
    series: &DownsampledSeries,
    output: &Path,
    opts: &RenderOptions,
) -> WaveglowResult<RenderStats> {
    let (surface, stats) = draw(series, opts)?;
    ensure_parent_dir(output)?;
    std::fs::write(output, surface.to_svg_string(true))?;
    tracing::info!(
        output = %output.display(),
        segments = stats.segments_per_pass,
        parallel = stats.parallel,
        "wrote waveform svg"
    );
    Ok(stats)
}

/// Render `series` to an SVG document in memory.
pub fn render_to_string(series: &DownsampledSeries, opts: &RenderOptions) -> WaveglowResult<String> {
    let (surface, _) = draw(series, opts)?;
    Ok(surface.to_svg_string(true))
}

/// Draw every pass onto a fresh surface.
pub fn draw(
    series: &DownsampledSeries,
    opts: &RenderOptions,
) -> WaveglowResult<(SvgSurface, RenderStats)> {
    opts.validate()?;
    if series.amplitudes.len() != series.time_axis.len() {
        return Err(WaveglowError::render(format!(
            "series length mismatch: {} amplitudes vs {} times",
            series.amplitudes.len(),
            series.time_axis.len()
        )));
    }
    if series.amplitudes.iter().any(|a| !a.is_finite())
        || series.time_axis.iter().any(|t| !t.is_finite())
    {
        return Err(WaveglowError::render("series contains non-finite values"));
    }

    let mut surface = SvgSurface::new(opts.canvas, opts.background);
    let layers = standard_layers(opts.line_width);
    let n_seg = series.segment_count();

    if n_seg == 0 {
        let stats = RenderStats {
            points: series.len(),
            segments_per_pass: 0,
            passes: 0,
            parallel: false,
            view_box: opts.canvas.rect(),
        };
        return Ok((surface, stats));
    }

    let mapping = DataMapping::new(series, &layers, opts);
    let gradient = opts.colormap.gradient(n_seg);
    let ctx = DrawCtx {
        series,
        mapping: &mapping,
        gradient: &gradient,
    };

    let mut parallel = false;
    for layer in &layers {
        let handle = surface.begin_layer(layer);
        if layer.kind == LayerKind::Main && n_seg > opts.parallel_threshold {
            parallel = true;
            let pool = build_thread_pool(opts.workers)?;
            let ranges = split_ranges(n_seg, opts.workers);
            tracing::debug!(workers = opts.workers, ranges = ranges.len(), "parallel main pass");
            let buffers: Vec<Vec<Segment>> = pool.install(|| {
                ranges
                    .par_iter()
                    .map(|r| ctx.segments(layer, r.clone()))
                    .collect()
            });
            for buf in buffers {
                surface.extend(handle, buf);
            }
        } else {
            surface.extend(handle, ctx.segments(layer, 0..n_seg));
        }
    }

    let view_box = surface
        .content_bounds()
        .unwrap_or_else(|| opts.canvas.rect());
    let stats = RenderStats {
        points: series.len(),
        segments_per_pass: n_seg,
        passes: layers.len(),
        parallel,
        view_box,
    };
    Ok((surface, stats))
}

/// Maps (time, amplitude) data to canvas coordinates, y pointing down.
#[derive(Clone, Copy, Debug)]
struct DataMapping {
    to_canvas: Affine,
    amplitude_range: f64,
}

impl DataMapping {
    fn new(series: &DownsampledSeries, layers: &[RenderLayer], opts: &RenderOptions) -> Self {
        let (t_min, t_max) = min_max(series.time_axis.iter().copied());
        let (a_min, a_max) = min_max(series.amplitudes.iter().map(|&a| f64::from(a)));

        let amplitude_range = a_max - a_min;
        let t_span = non_zero(t_max - t_min);
        let a_span = non_zero(amplitude_range);

        let lowest = layers.iter().map(|l| l.offset_frac).fold(0.0, f64::min);
        let highest = layers.iter().map(|l| l.offset_frac).fold(0.0, f64::max);

        let x0 = t_min - opts.margin_x * t_span;
        let x1 = t_max + opts.margin_x * t_span;
        let y0 = a_min + lowest * amplitude_range - opts.margin_y * a_span;
        let y1 = a_max + highest * amplitude_range + opts.margin_y * a_span;

        let sx = opts.canvas.width / (x1 - x0);
        let sy = opts.canvas.height / (y1 - y0);
        let to_canvas = Affine::new([sx, 0.0, 0.0, -sy, -x0 * sx, opts.canvas.height + y0 * sy]);
        Self {
            to_canvas,
            amplitude_range,
        }
    }

    fn point(&self, t: f64, a: f64) -> Point {
        self.to_canvas * Point::new(t, a)
    }
}

struct DrawCtx<'a> {
    series: &'a DownsampledSeries,
    mapping: &'a DataMapping,
    gradient: &'a [Rgba],
}

impl DrawCtx<'_> {
    fn segments(&self, layer: &RenderLayer, range: Range<usize>) -> Vec<Segment> {
        let off = layer.offset_frac * self.mapping.amplitude_range;
        let t = &self.series.time_axis;
        let a = &self.series.amplitudes;
        range
            .map(|i| Segment {
                line: Line::new(
                    self.mapping.point(t[i], f64::from(a[i]) + off),
                    self.mapping.point(t[i + 1], f64::from(a[i + 1]) + off),
                ),
                color: layer.color.resolve(&self.gradient[i]),
            })
            .collect()
    }
}

/// Split `0..n` into `parts` contiguous ranges; the last one absorbs the remainder.
pub(crate) fn split_ranges(n: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, n.max(1));
    let chunk = n / parts;
    (0..parts)
        .map(|w| {
            let start = w * chunk;
            let end = if w + 1 == parts { n } else { start + chunk };
            start..end
        })
        .collect()
}

fn build_thread_pool(threads: usize) -> WaveglowResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| WaveglowError::render(format!("failed to build rayon thread pool: {e}")))
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn non_zero(span: f64) -> f64 {
    if span > 0.0 { span } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/waveform.rs"]
mod tests;
