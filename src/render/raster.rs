use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{WaveglowError, WaveglowResult},
    media::ffmpeg::ensure_parent_dir,
};

/// Largest preview edge in pixels.
pub const MAX_PREVIEW_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 raster of an SVG document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub data: Vec<u8>,
}

/// Rasterize `svg` at `width` pixels wide (or its intrinsic width when `None`),
/// keeping the aspect ratio.
pub fn rasterize_svg(svg: &str, width: Option<u32>) -> WaveglowResult<Preview> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .context("parse svg tree")?;

    let size = tree.size();
    let (svg_w, svg_h) = (size.width(), size.height());
    if !(svg_w.is_finite() && svg_h.is_finite() && svg_w > 0.0 && svg_h > 0.0) {
        return Err(WaveglowError::render("svg has invalid width/height"));
    }

    let w = match width {
        Some(0) => return Err(WaveglowError::validation("preview width must be >= 1")),
        Some(w) => w,
        None => (svg_w.ceil() as u32).max(1),
    };
    let scale = w as f32 / svg_w;
    let h = ((svg_h * scale).ceil() as u32).max(1);
    if w > MAX_PREVIEW_DIM || h > MAX_PREVIEW_DIM {
        return Err(WaveglowError::render(format!(
            "preview size too large: {w}x{h} (max {MAX_PREVIEW_DIM}x{MAX_PREVIEW_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| WaveglowError::render("failed to allocate preview pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity((w as usize) * (h as usize) * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(Preview {
        width: w,
        height: h,
        data,
    })
}

/// Rasterize the SVG file at `svg_path` and save it as a PNG at `png_path`.
pub fn write_png_preview(
    svg_path: &Path,
    png_path: &Path,
    width: Option<u32>,
) -> WaveglowResult<Preview> {
    let svg = std::fs::read_to_string(svg_path)?;
    let preview = rasterize_svg(&svg, width)?;
    ensure_parent_dir(png_path)?;
    image::save_buffer_with_format(
        png_path,
        &preview.data,
        preview.width,
        preview.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", png_path.display()))?;
    tracing::info!(output = %png_path.display(), width = preview.width, height = preview.height, "wrote png preview");
    Ok(preview)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
