//! Axis geometry for the radial plot.
//!
//! Axes radiate from the origin at evenly spaced angles. Every position on
//! the chart is derived from an axis endpoint, its unit direction and the
//! perpendicular `(-dy, dx)`.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

use tracing::debug;

use crate::error::PlotError;
use crate::style::PlotStyle;

/// A point in plot coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, pointing up
    pub y: f64,
}

impl Point {
    /// Shared origin of all axes.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians.
    #[inline]
    pub fn unit(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean distance from the origin.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).norm()
    }

    /// Rotate by a quarter turn counter-clockwise.
    #[inline]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// One spoke of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    /// Position around the circle
    pub index: usize,
    /// Angle against the horizontal, radians
    pub angle: f64,
    /// Value mapped onto the endpoint
    pub max_value: f64,
    /// Axis name
    pub label: String,
    /// Unit vector along the axis
    pub direction: Point,
    /// Position of `max_value`
    pub end: Point,
}

impl Axis {
    /// Position of `value` on this axis.
    #[inline]
    pub fn point_at(&self, value: f64) -> Point {
        Point::ORIGIN + (self.end - Point::ORIGIN) * (value / self.max_value)
    }

    /// Unit vector across the axis.
    #[inline]
    pub fn normal(&self) -> Point {
        self.direction.perpendicular()
    }

    /// Tip of the axis arrow.
    pub fn arrow_tip(&self, style: &PlotStyle) -> Point {
        self.end + self.direction * style.arrow_head_pad
    }

    /// Anchor of the axis name.
    ///
    /// The vertical offset uses two thirds of the label pad so labels above
    /// and below the origin sit closer to the chart.
    pub fn label_position(&self, style: &PlotStyle) -> Point {
        let d = self.direction;
        Point::new(
            self.end.x + d.x * (style.arrow_head_pad + style.label_pad),
            self.end.y + d.y * (style.arrow_head_pad + style.label_pad / 1.5),
        )
    }

    /// Anchor of the max-value label.
    pub fn tick_label_position(&self, style: &PlotStyle) -> Point {
        self.end
            + self.direction * style.tick_label_parallel_pad
            + self.normal() * style.tick_label_perpendicular_pad
    }

    /// Interior tick segments at `i / n_tick` of the axis, `i = 1..n_tick`.
    pub fn minor_ticks(&self, style: &PlotStyle) -> Vec<(Point, Point)> {
        let step = (self.end - Point::ORIGIN) * (1.0 / style.n_tick as f64);
        (1..style.n_tick)
            .map(|i| {
                let at = Point::ORIGIN + step * i as f64;
                self.tick_at(at, style.minor_tick_length)
            })
            .collect()
    }

    /// Tick segment at the axis end.
    pub fn major_tick(&self, style: &PlotStyle) -> (Point, Point) {
        self.tick_at(self.end, style.major_tick_length)
    }

    fn tick_at(&self, at: Point, half_length: f64) -> (Point, Point) {
        let n = self.normal() * half_length;
        (at - n, at + n)
    }
}

/// Axes of a chart, fixed once built.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLayout {
    axes: Vec<Axis>,
}

impl AxisLayout {
    /// Lay out one axis per max value.
    ///
    /// # Errors
    ///
    /// * `PlotError::InvalidAxes` - no axes, names and max values differ in
    ///   length, or a max value is not finite and positive
    pub fn new<S: AsRef<str>>(
        maxvals: &[f64],
        names: &[S],
        style: &PlotStyle,
    ) -> Result<Self, PlotError> {
        if maxvals.is_empty() {
            return Err(PlotError::InvalidAxes("at least one axis is required".to_string()));
        }
        if maxvals.len() != names.len() {
            return Err(PlotError::InvalidAxes(format!(
                "{} max values but {} names",
                maxvals.len(),
                names.len()
            )));
        }
        if let Some((i, v)) = maxvals
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(PlotError::InvalidAxes(format!(
                "max value of axis '{}' must be positive, got {}",
                names[i].as_ref(),
                v
            )));
        }

        let delta_phi = 2.0 * PI / maxvals.len() as f64;
        let axes = maxvals
            .iter()
            .zip(names)
            .enumerate()
            .map(|(index, (&max_value, name))| {
                let angle = style.phi0 + index as f64 * delta_phi;
                let direction = Point::unit(angle);
                Axis {
                    index,
                    angle,
                    max_value,
                    label: name.as_ref().to_string(),
                    direction,
                    end: Point::ORIGIN + direction * style.axis_length,
                }
            })
            .collect();

        Ok(Self { axes })
    }

    /// All axes in drawing order.
    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Number of axes.
    #[inline]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Always false for a constructed layout.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Axis by index.
    pub fn axis(&self, index: usize) -> Result<&Axis, PlotError> {
        self.axes.get(index).ok_or(PlotError::AxisOutOfRange {
            index,
            count: self.axes.len(),
        })
    }

    /// Vertex of `value` on axis `index`.
    pub fn vertex(&self, index: usize, value: f64) -> Result<Point, PlotError> {
        let axis = self.axis(index)?;
        if !value.is_finite() || value < 0.0 {
            return Err(PlotError::InvalidValue(format!(
                "value {} on axis '{}' must be finite and non-negative",
                value, axis.label
            )));
        }
        if value > axis.max_value {
            debug!(
                axis = %axis.label,
                value,
                max = axis.max_value,
                "Value exceeds axis maximum"
            );
        }
        Ok(axis.point_at(value))
    }

    /// One vertex per axis, in axis order.
    pub fn polygon_vertices(&self, values: &[f64]) -> Result<Vec<Point>, PlotError> {
        if values.len() != self.axes.len() {
            return Err(PlotError::ValueCountMismatch {
                expected: self.axes.len(),
                got: values.len(),
            });
        }
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.vertex(i, v))
            .collect()
    }

    /// Vertices over a caller-chosen subset and order of axes.
    pub fn subset_vertices(&self, axes: &[usize], values: &[f64]) -> Result<Vec<Point>, PlotError> {
        if axes.len() != values.len() {
            return Err(PlotError::ValueCountMismatch {
                expected: axes.len(),
                got: values.len(),
            });
        }
        if axes.is_empty() {
            return Err(PlotError::EmptyPolygon);
        }
        axes.iter()
            .zip(values)
            .map(|(&axis, &v)| self.vertex(axis, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout(maxvals: &[f64]) -> AxisLayout {
        let names: Vec<String> = (0..maxvals.len()).map(|i| format!("a{}", i)).collect();
        AxisLayout::new(maxvals, &names, &PlotStyle::default()).unwrap()
    }

    #[test]
    fn test_three_axes_are_evenly_spaced() {
        let layout = layout(&[10.0, 20.0, 30.0]);
        let axes = layout.axes();
        assert_relative_eq!(axes[0].end.x, 0.8, epsilon = 1e-12);
        assert_relative_eq!(axes[0].end.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(axes[1].angle, 2.0 * PI / 3.0, epsilon = 1e-12);
        assert_relative_eq!(axes[1].end.x, -0.4, epsilon = 1e-12);
        assert_relative_eq!(axes[1].end.y, 0.8 * (3.0_f64).sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_scales_with_value() {
        let layout = layout(&[10.0, 20.0, 30.0, 1.0]);
        let v = layout.vertex(1, 5.0).unwrap();
        // a quarter of the way up the vertical axis
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.2, epsilon = 1e-12);

        assert_eq!(layout.vertex(0, 0.0).unwrap(), Point::ORIGIN);
        assert_eq!(layout.vertex(3, 1.0).unwrap(), layout.axes()[3].end);
    }

    #[test]
    fn test_vertex_rejects_bad_values() {
        let layout = layout(&[10.0, 20.0, 30.0]);
        assert!(matches!(
            layout.vertex(0, -1.0),
            Err(PlotError::InvalidValue(_))
        ));
        assert!(matches!(
            layout.vertex(0, f64::NAN),
            Err(PlotError::InvalidValue(_))
        ));
        assert!(matches!(
            layout.vertex(3, 1.0),
            Err(PlotError::AxisOutOfRange { index: 3, count: 3 })
        ));
        // beyond the maximum is placed past the endpoint
        let beyond = layout.vertex(0, 20.0).unwrap();
        assert_relative_eq!(beyond.x, 1.6, epsilon = 1e-12);
    }

    #[test]
    fn test_polygon_vertices_require_one_value_per_axis() {
        let layout = layout(&[10.0, 20.0, 30.0]);
        assert!(matches!(
            layout.polygon_vertices(&[1.0, 2.0]),
            Err(PlotError::ValueCountMismatch {
                expected: 3,
                got: 2
            })
        ));
        assert_eq!(layout.polygon_vertices(&[8.0, 6.0, 3.0]).unwrap().len(), 3);
    }

    #[test]
    fn test_subset_vertices_use_chosen_axis_maximum() {
        let layout = layout(&[10.0, 20.0, 30.0]);
        let pts = layout.subset_vertices(&[2, 0], &[30.0, 5.0]).unwrap();
        assert_eq!(pts[0], layout.axes()[2].end);
        assert_relative_eq!(pts[1].x, 0.4, epsilon = 1e-12);
        assert!(matches!(
            layout.subset_vertices(&[], &[]),
            Err(PlotError::EmptyPolygon)
        ));
    }

    #[test]
    fn test_invalid_axes() {
        let style = PlotStyle::default();
        let empty: [&str; 0] = [];
        assert!(AxisLayout::new(&[], &empty, &style).is_err());
        assert!(AxisLayout::new(&[1.0, 2.0], &["a"], &style).is_err());
        let err = AxisLayout::new(&[1.0, 0.0], &["a", "b"], &style).unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_decorations() {
        let style = PlotStyle::default();
        let layout = layout(&[10.0, 20.0, 30.0, 1.0]);
        let east = &layout.axes()[0];

        let tip = east.arrow_tip(&style);
        assert_relative_eq!(tip.x, 0.85, epsilon = 1e-12);

        let label = east.label_position(&style);
        assert_relative_eq!(label.x, 1.1, epsilon = 1e-12);
        assert_relative_eq!(label.y, 0.0, epsilon = 1e-12);

        let north = &layout.axes()[1];
        let label = north.label_position(&style);
        assert_relative_eq!(label.y, 0.8 + 0.05 + 0.25 / 1.5, epsilon = 1e-12);

        // perpendicular offset of the max-value label
        let tick_label = east.tick_label_position(&style);
        assert_relative_eq!(tick_label.x, 0.8, epsilon = 1e-12);
        assert_relative_eq!(tick_label.y, 0.08, epsilon = 1e-12);

        let minors = east.minor_ticks(&style);
        assert_eq!(minors.len(), 4);
        let (a, b) = minors[0];
        assert_relative_eq!(a.x, 0.16, epsilon = 1e-12);
        assert_relative_eq!(a.distance(b), 2.0 * style.minor_tick_length, epsilon = 1e-12);

        let (a, b) = east.major_tick(&style);
        assert_relative_eq!(a.distance(b), 2.0 * style.major_tick_length, epsilon = 1e-12);
        assert_relative_eq!(((a + b) * 0.5).x, 0.8, epsilon = 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_axes_evenly_spaced_on_radius(n in 3_usize..24) {
                let style = PlotStyle::default();
                let layout = layout(&vec![1.0; n]);
                let step = 2.0 * PI / n as f64;
                for (i, axis) in layout.axes().iter().enumerate() {
                    prop_assert!((axis.end.norm() - style.axis_length).abs() < 1e-12);
                    prop_assert!((axis.angle - i as f64 * step).abs() < 1e-12);
                    let next = &layout.axes()[(i + 1) % n];
                    let cos = (axis.end.x * next.end.x + axis.end.y * next.end.y)
                        / (style.axis_length * style.axis_length);
                    prop_assert!((cos - step.cos()).abs() < 1e-9);
                }
            }

            #[test]
            fn test_max_value_hits_endpoint(
                maxvals in prop::collection::vec(1e-6_f64..1e9, 3..12)
            ) {
                let layout = layout(&maxvals);
                let at_max = layout.polygon_vertices(&maxvals).unwrap();
                let at_zero = layout.polygon_vertices(&vec![0.0; maxvals.len()]).unwrap();
                for (i, axis) in layout.axes().iter().enumerate() {
                    prop_assert!(at_max[i].distance(axis.end) < 1e-12);
                    prop_assert_eq!(at_zero[i], Point::ORIGIN);
                }
            }
        }
    }
}
