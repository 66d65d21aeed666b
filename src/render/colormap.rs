use crate::foundation::core::Rgba;

/// Perceptually ordered colormaps available for the waveform gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// Google's Turbo rainbow map.
    #[default]
    Turbo,
    /// Matplotlib's Viridis.
    Viridis,
}

impl Colormap {
    /// Opaque color at position `t` in `[0, 1]` (clamped).
    pub fn sample(self, t: f64) -> Rgba {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let [r, g, b] = match self {
            Self::Turbo => turbo(t),
            Self::Viridis => viridis(t),
        };
        Rgba::new(r, g, b, 1.0)
    }

    /// `n` colors spread linearly over the whole map (`i / (n - 1)`).
    pub fn gradient(self, n: usize) -> Vec<Rgba> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => {
                let last = (n - 1) as f64;
                (0..n).map(|i| self.sample(i as f64 / last)).collect()
            }
        }
    }
}

// Polynomial fits (degree 5 for Turbo, degree 6 for Viridis), evaluated with Horner's rule.
fn turbo(x: f64) -> [f64; 3] {
    let r = 0.135_721_38
        + x * (4.615_392_60 + x * (-42.660_322_58 + x * (132.131_082_34 + x * (-152.942_393_96 + x * 59.286_379_43))));
    let g = 0.091_402_61
        + x * (2.194_188_39 + x * (4.842_966_58 + x * (-14.185_033_33 + x * (4.277_298_57 + x * 2.829_566_04))));
    let b = 0.106_673_30
        + x * (12.641_946_08 + x * (-60.582_048_36 + x * (110.362_767_71 + x * (-89.903_109_12 + x * 27.348_249_73))));
    [r, g, b]
}

fn viridis(x: f64) -> [f64; 3] {
    const C: [[f64; 3]; 7] = [
        [0.277_727_327_223_417_7, 0.005_407_344_544_966_578, 0.334_099_805_335_306_1],
        [0.105_093_043_108_577_4, 1.404_613_529_898_575, 1.384_590_162_594_685],
        [-0.330_861_828_725_556_3, 0.214_847_559_468_213, 0.095_095_163_028_236_59],
        [-4.634_230_498_983_486, -5.799_100_973_351_585, -19.332_440_956_279_87],
        [6.228_269_936_347_081, 14.179_933_366_805_09, 56.690_552_600_681_05],
        [4.776_384_997_670_288, -13.745_145_377_746_01, -65.353_032_633_372_34],
        [-5.435_455_855_934_631, 4.645_852_612_178_535, 26.312_435_249_583_2],
    ];
    let mut out = [0.0; 3];
    for (ch, v) in out.iter_mut().enumerate() {
        let mut acc = C[6][ch];
        for k in (0..6).rev() {
            acc = C[k][ch] + x * acc;
        }
        *v = acc;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;
