//! Sequential colormaps for polygon fills.

use plotters::style::RGBColor;
use rand::Rng;

/// Default number of discrete levels.
pub const DEFAULT_LEVELS: usize = 100;

/// Anchor colors of the plasma ramp at evenly spaced positions in `[0, 1]`.
const PLASMA_ANCHORS: [(u8, u8, u8); 9] = [
    (13, 8, 135),
    (75, 3, 161),
    (125, 3, 168),
    (168, 34, 150),
    (203, 70, 121),
    (229, 107, 93),
    (248, 148, 65),
    (253, 195, 40),
    (240, 249, 33),
];

/// A discrete colormap.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    colors: Vec<RGBColor>,
}

impl Colormap {
    /// Plasma ramp (dark blue → magenta → yellow) sampled at `levels` points.
    pub fn plasma(levels: usize) -> Self {
        let levels = levels.max(1);
        let colors = (0..levels)
            .map(|i| {
                let t = if levels == 1 {
                    0.0
                } else {
                    i as f64 / (levels - 1) as f64
                };
                ramp(&PLASMA_ANCHORS, t)
            })
            .collect();
        Self { colors }
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed colormap.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a level, clamped to the last one.
    pub fn get(&self, level: usize) -> RGBColor {
        self.colors[level.min(self.colors.len() - 1)]
    }

    /// Color at a position in `[0, 1]`.
    pub fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        self.get((t * (self.colors.len() - 1) as f64).round() as usize)
    }

    /// Uniformly random level.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> RGBColor {
        self.get(rng.gen_range(0..self.colors.len()))
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::plasma(DEFAULT_LEVELS)
    }
}

/// Piecewise-linear interpolation between evenly spaced anchors.
fn ramp(anchors: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let segments = anchors.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * segments as f64;
    let i = (scaled.floor() as usize).min(segments - 1);
    let s = scaled - i as f64;

    let (r0, g0, b0) = anchors[i];
    let (r1, g1, b1) = anchors[i + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * s).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
