//! Retained scene of drawing primitives.
//!
//! `MultipleAxisPlot` records everything it draws as primitives in plot
//! coordinates. The scene is only turned into pixels when saved, so one plot
//! can be written several times at different resolutions and formats.

use plotters::style::RGBColor;

use crate::geometry::Point;
use crate::style::{LineProps, TextProps};

/// A single drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Straight line between two points.
    Segment {
        /// Start
        from: Point,
        /// End
        to: Point,
        /// Stroke
        stroke: LineProps,
    },
    /// Arrow from `from` with its tip at `tip`.
    Arrow {
        /// Tail
        from: Point,
        /// Tip of the head
        tip: Point,
        /// Full width of the head
        head_width: f64,
        /// Length of the head along the shaft
        head_length: f64,
        /// Shaft and head outline
        stroke: LineProps,
        /// Head fill
        face: RGBColor,
    },
    /// Unfilled circle marker.
    Circle {
        /// Center
        center: Point,
        /// Radius in plot units
        radius: f64,
        /// Outline
        stroke: LineProps,
    },
    /// Filled closed polygon.
    Polygon {
        /// Vertices in drawing order
        points: Vec<Point>,
        /// Fill color
        fill: RGBColor,
        /// Fill opacity
        opacity: f64,
    },
    /// Text centered on an anchor.
    Text {
        /// Anchor
        anchor: Point,
        /// Content
        text: String,
        /// Font and color
        props: TextProps,
    },
}

impl Primitive {
    /// Short kind name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Segment { .. } => "segment",
            Self::Arrow { .. } => "arrow",
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::Text { .. } => "text",
        }
    }

    /// Base of the arrow head and the two barb corners, or `None` for other
    /// primitives.
    pub fn arrow_head(&self) -> Option<(Point, Point, Point)> {
        let Self::Arrow {
            from,
            tip,
            head_width,
            head_length,
            ..
        } = self
        else {
            return None;
        };
        let shaft = *tip - *from;
        let length = shaft.norm();
        if length == 0.0 {
            return Some((*tip, *tip, *tip));
        }
        let dir = shaft * (1.0 / length);
        let base = *tip - dir * head_length.min(length);
        let half = dir.perpendicular() * (head_width / 2.0);
        Some((base, base + half, base - half))
    }
}

/// Ordered list of primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Append a line segment.
    pub fn add_segment(&mut self, from: Point, to: Point, stroke: LineProps) {
        self.push(Primitive::Segment { from, to, stroke });
    }

    /// Append a circle marker.
    pub fn add_circle(&mut self, center: Point, radius: f64, stroke: LineProps) {
        self.push(Primitive::Circle {
            center,
            radius,
            stroke,
        });
    }

    /// Append a text label.
    pub fn add_text(&mut self, anchor: Point, text: impl Into<String>, props: TextProps) {
        self.push(Primitive::Text {
            anchor,
            text: text.into(),
            props,
        });
    }

    /// Primitives in drawing order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Iterate in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True when nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of primitives of a kind (see [`Primitive::kind`]).
    pub fn count(&self, kind: &str) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }
}
