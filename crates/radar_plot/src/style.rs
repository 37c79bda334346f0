//! Plot style configuration and named presets.
//!
//! All lengths below are in plot coordinates, where the plot radius is 1 and
//! the visible region spans `[-view_extent, view_extent]` on both axes. Line
//! widths and font sizes are in typographic points and scale with the output
//! DPI.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::PlotError;

const RED: RGBColor = RGBColor(255, 0, 0);
const GREEN: RGBColor = RGBColor(0, 128, 0);
const BLUE: RGBColor = RGBColor(0, 0, 255);
const GRAY: RGBColor = RGBColor(128, 128, 128);
const BLACK: RGBColor = RGBColor(0, 0, 0);

/// Stroke properties for lines and outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineProps {
    /// Stroke color
    pub color: RGBColor,
    /// Width in points
    pub width: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl LineProps {
    fn new(color: RGBColor, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
        }
    }

    fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Text properties. Labels are always centered on their anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextProps {
    /// Text color
    pub color: RGBColor,
    /// Font size in points
    pub font_size: f64,
}

/// Axis arrow properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowProps {
    /// Shaft and head outline
    pub stroke: LineProps,
    /// Head fill
    pub face: RGBColor,
}

/// Colors and stroke widths for every plot element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Plot title
    pub title: TextProps,
    /// Max-value label near each axis end
    pub tick_label: TextProps,
    /// Axis name
    pub axis_label: TextProps,
    /// Axis arrow
    pub axis_arrow: ArrowProps,
    /// Interior tick marks
    pub minor_tick: LineProps,
    /// Tick mark at the axis end
    pub major_tick: LineProps,
    /// Open polylines from `draw_arbitrary_polygon`
    pub polyline: LineProps,
    /// Edges of filled polygons; opacity follows the polygon alpha
    pub polygon_edge: LineProps,
    /// Vertex markers
    pub point_circle: LineProps,
}

/// Named style presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// Red axes, blue ticks, green markers
    #[default]
    Colorful,
    /// Black and gray only
    Monochrome,
}

impl StylePreset {
    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Colorful => "colorful",
            Self::Monochrome => "monochrome",
        }
    }

    /// Palette for this preset.
    pub fn palette(&self) -> Palette {
        let (arrow, tick, marker, polyline) = match self {
            Self::Colorful => (RED, BLUE, GREEN, GREEN),
            Self::Monochrome => (BLACK, BLACK, BLACK, GRAY),
        };
        Palette {
            title: TextProps {
                color: BLACK,
                font_size: 20.0,
            },
            tick_label: TextProps {
                color: tick,
                font_size: 10.0,
            },
            axis_label: TextProps {
                color: arrow,
                font_size: 10.0,
            },
            axis_arrow: ArrowProps {
                stroke: LineProps::new(arrow, 1.0),
                face: arrow,
            },
            minor_tick: LineProps::new(tick, 1.0),
            major_tick: LineProps::new(tick, 2.0),
            polyline: LineProps::new(polyline, 3.0).with_opacity(0.5),
            polygon_edge: LineProps::new(BLACK, 1.0),
            point_circle: LineProps::new(marker, 1.0),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StylePreset {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "colorful" | "color" | "colour" => Ok(Self::Colorful),
            "monochrome" | "mono" | "bw" => Ok(Self::Monochrome),
            other => Err(PlotError::InvalidStyle(format!(
                "unknown preset '{}'. Supported: colorful, monochrome",
                other
            ))),
        }
    }
}

/// Complete renderer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotStyle {
    /// Angle of the first axis against the horizontal, radians
    pub phi0: f64,
    /// Axis length in units of the plot radius
    pub axis_length: f64,
    /// Arrow extension beyond the axis maximum
    pub arrow_head_pad: f64,
    /// Distance from the axis maximum to its name
    pub label_pad: f64,
    /// Divisions per axis
    pub n_tick: usize,
    /// Half-length of the end tick
    pub major_tick_length: f64,
    /// Half-length of interior ticks
    pub minor_tick_length: f64,
    /// Decimal places of the max-value label
    pub tick_label_precision: usize,
    /// Max-value label offset along the axis
    pub tick_label_parallel_pad: f64,
    /// Max-value label offset across the axis
    pub tick_label_perpendicular_pad: f64,
    /// Radius of vertex markers
    pub point_circle_size: f64,
    /// Half-width of the visible region
    pub view_extent: f64,
    /// Hide the frame around the plot region
    pub hide_frame: bool,
    /// Seed for polygon fill colors; `None` draws from entropy
    pub seed: Option<u64>,
    /// Colors and stroke widths
    pub palette: Palette,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::preset(StylePreset::default())
    }
}

impl PlotStyle {
    /// Default geometry with the preset's palette.
    pub fn preset(preset: StylePreset) -> Self {
        Self {
            phi0: 0.0,
            axis_length: 0.8,
            arrow_head_pad: 0.05,
            label_pad: 0.25,
            n_tick: 5,
            major_tick_length: 0.015,
            minor_tick_length: 0.010,
            tick_label_precision: 1,
            tick_label_parallel_pad: 0.0,
            tick_label_perpendicular_pad: 0.08,
            point_circle_size: 0.008,
            view_extent: 1.4,
            hide_frame: true,
            seed: None,
            palette: preset.palette(),
        }
    }

    /// Colorful preset.
    pub fn colorful() -> Self {
        Self::preset(StylePreset::Colorful)
    }

    /// Black-and-white preset.
    pub fn monochrome() -> Self {
        Self::preset(StylePreset::Monochrome)
    }

    /// Fix the polygon color sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set divisions per axis.
    pub fn with_ticks(mut self, n_tick: usize) -> Self {
        self.n_tick = n_tick;
        self
    }

    /// Format an axis maximum for its tick label.
    pub fn format_tick_label(&self, value: f64) -> String {
        format!("{:.*}", self.tick_label_precision, value)
    }

    /// Validate the style.
    pub fn validate(&self) -> Result<(), PlotError> {
        let mut errors = Vec::new();

        let positive = [
            ("axis_length", self.axis_length),
            ("major_tick_length", self.major_tick_length),
            ("minor_tick_length", self.minor_tick_length),
            ("point_circle_size", self.point_circle_size),
            ("view_extent", self.view_extent),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{} must be positive, got {}", name, value));
            }
        }

        let finite = [
            ("phi0", self.phi0),
            ("arrow_head_pad", self.arrow_head_pad),
            ("label_pad", self.label_pad),
            ("tick_label_parallel_pad", self.tick_label_parallel_pad),
            ("tick_label_perpendicular_pad", self.tick_label_perpendicular_pad),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("{} must be finite", name));
            }
        }

        if self.n_tick < 1 {
            errors.push("n_tick must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlotError::InvalidStyle(errors.join("; ")))
        }
    }
}
