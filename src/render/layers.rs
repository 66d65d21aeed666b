use crate::foundation::core::Rgba;

/// Visual pass kinds in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    /// Wide dark stroke below the line.
    Shadow,
    /// Additive halo around the line.
    Glow,
    /// Light reflection slightly above the line.
    Highlight,
    /// The waveform itself.
    Main,
    /// Thin light stroke on top of the main line.
    Edge,
}

impl LayerKind {
    /// Compositing order; larger draws later.
    pub fn z_order(self) -> u8 {
        match self {
            Self::Shadow => 1,
            Self::Glow => 2,
            Self::Highlight => 4,
            Self::Main => 5,
            Self::Edge => 6,
        }
    }

    /// Lowercase name used for SVG group ids.
    pub fn name(self) -> &'static str {
        match self {
            Self::Shadow => "shadow",
            Self::Glow => "glow",
            Self::Highlight => "highlight",
            Self::Main => "main",
            Self::Edge => "edge",
        }
    }
}

/// How a layer picks the stroke color of segment `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerColor {
    /// Same color for every segment.
    Fixed(Rgba),
    /// The segment's gradient color, optionally with its alpha replaced.
    Gradient {
        /// Alpha override; `None` keeps the gradient's own alpha.
        alpha: Option<f64>,
    },
}

impl LayerColor {
    /// Resolve the color for one segment.
    pub fn resolve(&self, gradient: &Rgba) -> Rgba {
        match *self {
            Self::Fixed(c) => c,
            Self::Gradient { alpha: None } => *gradient,
            Self::Gradient { alpha: Some(a) } => gradient.with_alpha(a),
        }
    }
}

/// One full draw of the series with a specific visual treatment.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderLayer {
    /// Pass kind, which fixes the z-order.
    pub kind: LayerKind,
    /// Index within passes of the same kind (glow has several).
    pub index: u8,
    /// Vertical offset as a fraction of the amplitude range; positive moves up.
    pub offset_frac: f64,
    /// Stroke color rule.
    pub color: LayerColor,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
}

impl RenderLayer {
    /// Identifier unique within a layer stack, e.g. `glow-3`.
    pub fn id(&self) -> String {
        if self.kind == LayerKind::Glow {
            format!("{}-{}", self.kind.name(), self.index)
        } else {
            self.kind.name().to_string()
        }
    }
}

/// Number of glow passes.
pub const GLOW_PASSES: u8 = 6;

/// The standard shadow / glow / highlight / main / edge stack for a base line width.
///
/// Returned already sorted by z-order.
pub fn standard_layers(line_width: f64) -> Vec<RenderLayer> {
    let mut out = Vec::with_capacity(usize::from(GLOW_PASSES) + 4);
    out.push(RenderLayer {
        kind: LayerKind::Shadow,
        index: 0,
        offset_frac: -0.012,
        color: LayerColor::Fixed(Rgba::black().with_alpha(0.18)),
        stroke_width: line_width * 4.5,
    });
    for k in 1..=GLOW_PASSES {
        out.push(RenderLayer {
            kind: LayerKind::Glow,
            index: k,
            offset_frac: 0.0,
            color: LayerColor::Gradient {
                alpha: Some(0.06 * f64::from(GLOW_PASSES + 1 - k)),
            },
            stroke_width: line_width + f64::from(k) * 3.0,
        });
    }
    out.push(RenderLayer {
        kind: LayerKind::Highlight,
        index: 0,
        offset_frac: 0.008,
        color: LayerColor::Fixed(Rgba::white().with_alpha(0.10)),
        stroke_width: line_width * 1.7,
    });
    out.push(RenderLayer {
        kind: LayerKind::Main,
        index: 0,
        offset_frac: 0.0,
        color: LayerColor::Gradient { alpha: None },
        stroke_width: line_width,
    });
    out.push(RenderLayer {
        kind: LayerKind::Edge,
        index: 0,
        offset_frac: 0.0,
        color: LayerColor::Fixed(Rgba::white().with_alpha(0.07)),
        stroke_width: line_width * 0.7,
    });
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
