use std::fmt::Write as _;

use kurbo::Shape as _;

use crate::{
    foundation::core::{Canvas, Line, Rect, Rgba},
    render::layers::{LayerKind, RenderLayer},
};

/// One independently stroked 2-point segment in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Segment geometry.
    pub line: Line,
    /// Stroke color (straight alpha).
    pub color: Rgba,
}

#[derive(Clone, Debug)]
struct LayerBatch {
    id: String,
    kind: LayerKind,
    stroke_width: f64,
    segments: Vec<Segment>,
}

/// Handle to a layer opened on a [`SvgSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerHandle(usize);

/// Append-only vector drawing surface that serializes to SVG.
///
/// Draw calls are grouped per layer; layers are emitted in z-order, and within a layer in
/// append order.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    canvas: Canvas,
    background: Rgba,
    layers: Vec<LayerBatch>,
}

impl SvgSurface {
    /// Empty surface of the given size and background.
    pub fn new(canvas: Canvas, background: Rgba) -> Self {
        Self {
            canvas,
            background,
            layers: Vec::new(),
        }
    }

    /// Canvas the surface was created with.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Open a new, empty layer group.
    pub fn begin_layer(&mut self, layer: &RenderLayer) -> LayerHandle {
        self.layers.push(LayerBatch {
            id: layer.id(),
            kind: layer.kind,
            stroke_width: layer.stroke_width,
            segments: Vec::new(),
        });
        LayerHandle(self.layers.len() - 1)
    }

    /// Append one segment to a layer.
    pub fn push(&mut self, layer: LayerHandle, segment: Segment) {
        self.layers[layer.0].segments.push(segment);
    }

    /// Append a batch of segments to a layer, preserving their order.
    pub fn extend(&mut self, layer: LayerHandle, segments: impl IntoIterator<Item = Segment>) {
        self.layers[layer.0].segments.extend(segments);
    }

    /// Total number of segments across all layers.
    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }

    /// Segments drawn on the first layer of `kind`, in draw order.
    pub fn segments_of(&self, kind: LayerKind) -> &[Segment] {
        self.layers
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.segments.as_slice())
            .unwrap_or(&[])
    }

    /// Stroked bounds of everything drawn, clipped to the canvas.
    ///
    /// Round caps extend every segment by half the stroke width in all directions.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut acc: Option<Rect> = None;
        for layer in &self.layers {
            let half = layer.stroke_width * 0.5;
            for seg in &layer.segments {
                let r = seg.line.bounding_box().inflate(half, half);
                acc = Some(match acc {
                    Some(a) => a.union(r),
                    None => r,
                });
            }
        }
        let clipped = acc?.intersect(self.canvas.rect());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return None;
        }
        Some(clipped)
    }

    /// Serialize to a standalone SVG document.
    ///
    /// With `trim`, the view box hugs [`SvgSurface::content_bounds`]; otherwise (or when nothing
    /// was drawn) it covers the full canvas.
    pub fn to_svg_string(&self, trim: bool) -> String {
        let view = if trim {
            self.content_bounds().unwrap_or_else(|| self.canvas.rect())
        } else {
            self.canvas.rect()
        };

        let mut out = String::with_capacity(128 + self.segment_count() * 110);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
            x = fmt_num(view.x0),
            y = fmt_num(view.y0),
            w = fmt_num(view.width()),
            h = fmt_num(view.height()),
        );
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(view.x0),
            fmt_num(view.y0),
            fmt_num(view.width()),
            fmt_num(view.height()),
            self.background.to_hex_rgb(),
        );

        let mut order: Vec<usize> = (0..self.layers.len()).collect();
        order.sort_by_key(|&i| self.layers[i].kind.z_order());

        for i in order {
            let layer = &self.layers[i];
            let _ = writeln!(
                out,
                r#"<g id="{}" fill="none" stroke-linecap="round" stroke-width="{}">"#,
                layer.id,
                fmt_num(layer.stroke_width)
            );
            for seg in &layer.segments {
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}"/>"#,
                    fmt_num(seg.line.p0.x),
                    fmt_num(seg.line.p0.y),
                    fmt_num(seg.line.p1.x),
                    fmt_num(seg.line.p1.y),
                    seg.color.to_hex_rgb(),
                    fmt_num(seg.color.a),
                );
            }
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Fixed 3-decimal formatting with trailing zeros removed.
pub(crate) fn fmt_num(v: f64) -> String {
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
