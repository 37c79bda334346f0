//! Multi-axis radial plot.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::colormap::Colormap;
use crate::error::PlotError;
use crate::geometry::{Axis, AxisLayout, Point};
use crate::render::{self, Canvas, SaveOptions};
use crate::scene::{Primitive, Scene};
use crate::style::{LineProps, PlotStyle};

/// Default figure width and height in inches.
pub const DEFAULT_FIGURE_SIZE: f64 = 8.0;

/// Radial chart with N axes and overlaid polygons.
///
/// Drawing calls record primitives into a retained [`Scene`]; nothing touches
/// the filesystem until [`save_plot`](Self::save_plot).
///
/// # Example
///
/// ```no_run
/// use radar_plot::{MultipleAxisPlot, SaveOptions};
///
/// let mut plot = MultipleAxisPlot::with_defaults().unwrap();
/// plot.draw_axis(&[10.0, 20.0, 30.0], &["SRMUSD", "BTCUSD", "ETHUSD"]).unwrap();
/// plot.draw_polygon(&[8.0, 6.0, 3.0], 0.4).unwrap();
/// plot.save_plot("plot.png", &SaveOptions::with_dpi(300.0)).unwrap();
/// ```
#[derive(Debug)]
pub struct MultipleAxisPlot {
    canvas: Canvas,
    style: PlotStyle,
    colormap: Colormap,
    rng: StdRng,
    layout: Option<AxisLayout>,
    scene: Scene,
    polygons: usize,
}

impl MultipleAxisPlot {
    /// Create an empty plot of `width × height` inches.
    ///
    /// # Errors
    ///
    /// * `PlotError::InvalidStyle` - non-positive size or invalid style
    pub fn new(width: f64, height: f64, style: PlotStyle) -> Result<Self, PlotError> {
        for (name, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidStyle(format!(
                    "figure {} must be positive, got {}",
                    name, value
                )));
            }
        }
        style.validate()?;

        let rng = match style.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            canvas: Canvas { width, height },
            style,
            colormap: Colormap::default(),
            rng,
            layout: None,
            scene: Scene::new(),
            polygons: 0,
        })
    }

    /// 8 × 8 inch plot with the colorful preset.
    pub fn with_defaults() -> Result<Self, PlotError> {
        Self::new(DEFAULT_FIGURE_SIZE, DEFAULT_FIGURE_SIZE, PlotStyle::default())
    }

    /// Draw one axis per max value, with arrow, name, max-value label and
    /// ticks.
    ///
    /// # Errors
    ///
    /// * `PlotError::AxesAlreadyInitialized` - axes were drawn before
    /// * `PlotError::InvalidAxes` - see [`AxisLayout::new`]
    pub fn draw_axis<S: AsRef<str>>(&mut self, maxvals: &[f64], names: &[S]) -> Result<(), PlotError> {
        if let Some(layout) = &self.layout {
            return Err(PlotError::AxesAlreadyInitialized(layout.len()));
        }
        let layout = AxisLayout::new(maxvals, names, &self.style)?;

        for axis in layout.axes() {
            self.record_axis(axis);
        }

        debug!(axes = layout.len(), n_tick = self.style.n_tick, "Axes drawn");
        self.layout = Some(layout);
        Ok(())
    }

    fn record_axis(&mut self, axis: &Axis) {
        let style = &self.style;
        let palette = style.palette;
        let minor = style.minor_tick_length;

        self.scene.push(Primitive::Arrow {
            from: Point::ORIGIN,
            tip: axis.arrow_tip(style),
            head_width: 3.0 * minor,
            head_length: 4.0 * minor,
            stroke: palette.axis_arrow.stroke,
            face: palette.axis_arrow.face,
        });
        self.scene
            .add_text(axis.label_position(style), axis.label.clone(), palette.axis_label);
        self.scene.add_text(
            axis.tick_label_position(style),
            style.format_tick_label(axis.max_value),
            palette.tick_label,
        );
        for (from, to) in axis.minor_ticks(style) {
            self.scene.add_segment(from, to, palette.minor_tick);
        }
        let (from, to) = axis.major_tick(style);
        self.scene.add_segment(from, to, palette.major_tick);
    }

    /// Draw a closed, filled polygon with one value per axis.
    ///
    /// The fill color is a random plasma level; `alpha` sets both fill and
    /// edge opacity.
    ///
    /// # Errors
    ///
    /// * `PlotError::AxesNotInitialized` - `draw_axis` has not been called
    /// * `PlotError::InvalidAlpha` - `alpha` outside `[0, 1]`
    /// * `PlotError::ValueCountMismatch` - `values.len()` differs from the
    ///   axis count
    /// * `PlotError::InvalidValue` - negative or non-finite value
    pub fn draw_polygon(&mut self, values: &[f64], alpha: f64) -> Result<(), PlotError> {
        let layout = self.layout.as_ref().ok_or(PlotError::AxesNotInitialized)?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(PlotError::InvalidAlpha(alpha));
        }
        let vertices = layout.polygon_vertices(values)?;

        let fill = self.colormap.sample(&mut self.rng);
        self.scene.push(Primitive::Polygon {
            points: vertices.clone(),
            fill,
            opacity: alpha,
        });

        let edge = LineProps {
            opacity: alpha,
            ..self.style.palette.polygon_edge
        };
        let closing = vertices.first().map(|first| (vertices[vertices.len() - 1], *first));
        for pair in vertices.windows(2) {
            self.scene.add_segment(pair[0], pair[1], edge);
        }
        if let Some((last, first)) = closing {
            self.scene.add_segment(last, first, edge);
        }

        self.record_markers(&vertices);
        self.polygons += 1;
        Ok(())
    }

    /// Draw an open polyline over a chosen subset and order of axes.
    ///
    /// Value `k` is placed on axis `axes[k]` and scaled by that axis's max
    /// value. No fill and no closing edge are drawn.
    ///
    /// # Errors
    ///
    /// * `PlotError::AxesNotInitialized` - `draw_axis` has not been called
    /// * `PlotError::ValueCountMismatch` - `axes` and `values` differ in length
    /// * `PlotError::EmptyPolygon` - no axes given
    /// * `PlotError::AxisOutOfRange` - unknown axis index
    /// * `PlotError::InvalidValue` - negative or non-finite value
    pub fn draw_arbitrary_polygon(&mut self, axes: &[usize], values: &[f64]) -> Result<(), PlotError> {
        let layout = self.layout.as_ref().ok_or(PlotError::AxesNotInitialized)?;
        let vertices = layout.subset_vertices(axes, values)?;

        let line = self.style.palette.polyline;
        for pair in vertices.windows(2) {
            self.scene.add_segment(pair[0], pair[1], line);
        }
        self.record_markers(&vertices);
        self.polygons += 1;
        Ok(())
    }

    fn record_markers(&mut self, vertices: &[Point]) {
        let radius = self.style.point_circle_size;
        let stroke = self.style.palette.point_circle;
        for &vertex in vertices {
            self.scene.add_circle(vertex, radius, stroke);
        }
    }

    /// Draw a title near the top of the plot region.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let anchor = Point::new(0.0, self.style.view_extent * 0.9);
        self.scene.add_text(anchor, title, self.style.palette.title);
    }

    /// Render the plot to `path`; the format follows the extension.
    ///
    /// # Errors
    ///
    /// * `PlotError::UnsupportedFormat` - extension other than png or svg
    /// * `PlotError::InvalidStyle` - non-positive dpi
    /// * `PlotError::Render` - backend or file failure
    pub fn save_plot(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<(), PlotError> {
        let path = path.as_ref();
        render::save_scene(&self.scene, &self.style, self.canvas, path, options)?;
        info!(
            path = %path.display(),
            axes = self.axis_count(),
            polygons = self.polygons,
            dpi = options.dpi,
            "Radar plot written"
        );
        Ok(())
    }

    /// Number of axes, zero before `draw_axis`.
    pub fn axis_count(&self) -> usize {
        self.layout.as_ref().map_or(0, AxisLayout::len)
    }

    /// Drawn axes, empty before `draw_axis`.
    pub fn axes(&self) -> &[Axis] {
        self.layout.as_ref().map(AxisLayout::axes).unwrap_or(&[])
    }

    /// Number of polygons and polylines drawn.
    pub fn polygon_count(&self) -> usize {
        self.polygons
    }

    /// Recorded primitives.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Style in use.
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    /// Output size in pixels at `dpi`.
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        self.canvas.pixel_size(dpi)
    }
}
