//! Rendering of a retained scene through plotters backends.
//!
//! The figure is `width × height` inches. The plot region is a centered
//! square whose side is the smaller dimension (90 % of it when the frame is
//! shown), mapped onto `[-view_extent, view_extent]²` in plot coordinates.
//! Line widths and font sizes are given in points and converted with the
//! output DPI.

use std::panic;
use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};
use tracing::{debug, info, warn};

use crate::error::PlotError;
use crate::geometry::Point;
use crate::scene::{Primitive, Scene};
use crate::style::{LineProps, PlotStyle};

/// Resolution used when none is requested.
pub const DEFAULT_DPI: f64 = 100.0;

/// Largest accepted image side, in pixels.
pub const MAX_PIXEL_SIDE: u32 = 32_768;

const POINTS_PER_INCH: f64 = 72.0;

/// Output file format, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image through the bitmap backend
    Png,
    /// Vector image through the SVG backend
    Svg,
}

impl OutputFormat {
    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self, PlotError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(PlotError::UnsupportedFormat(ext)),
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Options forwarded to the save routine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaveOptions {
    /// Pixels per inch
    pub dpi: f64,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}

impl SaveOptions {
    /// Options with the given resolution.
    pub fn with_dpi(dpi: f64) -> Self {
        Self { dpi }
    }
}

/// Figure size in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    /// Width in inches
    pub width: f64,
    /// Height in inches
    pub height: f64,
}

impl Canvas {
    /// Pixel size at a resolution, at least one pixel per side.
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        let px = |inches: f64| ((inches * dpi).round() as u32).max(1);
        (px(self.width), px(self.height))
    }

    /// Pixel size at a resolution, rejecting images with a side above
    /// [`MAX_PIXEL_SIDE`].
    pub fn checked_pixel_size(&self, dpi: f64) -> Result<(u32, u32), PlotError> {
        let limit = MAX_PIXEL_SIDE as f64;
        let (w, h) = ((self.width * dpi).round(), (self.height * dpi).round());
        if !(w <= limit && h <= limit) {
            return Err(PlotError::InvalidStyle(format!(
                "{} × {} in at {} dpi exceeds the {} px image limit",
                self.width, self.height, dpi, MAX_PIXEL_SIDE
            )));
        }
        Ok(self.pixel_size(dpi))
    }

    /// Offset and side length of the square plot region, in pixels.
    pub fn plot_region(&self, dpi: f64, hide_frame: bool) -> ((u32, u32), u32) {
        let (w, h) = self.pixel_size(dpi);
        let min_dim = w.min(h) as f64;
        let side = if hide_frame { min_dim } else { min_dim * 0.9 };
        let side = (side.round() as u32).max(1);
        (((w - side) / 2, (h - side) / 2), side)
    }
}

/// Render `scene` to `path`.
pub(crate) fn save_scene(
    scene: &Scene,
    style: &PlotStyle,
    canvas: Canvas,
    path: &Path,
    options: &SaveOptions,
) -> Result<(), PlotError> {
    if !options.dpi.is_finite() || options.dpi <= 0.0 {
        return Err(PlotError::InvalidStyle(format!(
            "dpi must be positive, got {}",
            options.dpi
        )));
    }

    let format = OutputFormat::from_path(path)?;
    let size = canvas.checked_pixel_size(options.dpi)?;
    let render_err = |message: String| PlotError::Render {
        path: path.display().to_string(),
        message,
    };

    debug!(
        path = %path.display(),
        width = size.0,
        height = size.1,
        primitives = scene.len(),
        "Rendering scene"
    );

    match format {
        OutputFormat::Png => {
            let root = FontSafeBackend::new(BitMapBackend::new(path, size)).into_drawing_area();
            draw_scene(root, scene, style, canvas, options.dpi)
                .map_err(|e| render_err(e.to_string()))?;
        }
        OutputFormat::Svg => {
            let root = FontSafeBackend::new(SVGBackend::new(path, size)).into_drawing_area();
            draw_scene(root, scene, style, canvas, options.dpi)
                .map_err(|e| render_err(e.to_string()))?;
        }
    }

    info!(
        path = %path.display(),
        format = format.extension(),
        width = size.0,
        height = size.1,
        "Plot saved"
    );
    Ok(())
}

fn draw_scene<DB>(
    root: DrawingArea<DB, Shift>,
    scene: &Scene,
    style: &PlotStyle,
    canvas: Canvas,
    dpi: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let ((left, top), side) = canvas.plot_region(dpi, style.hide_frame);
    let region = root.clone().shrink((left, top), (side, side));
    let extent = style.view_extent;
    let area = region.apply_coord_spec(Cartesian2d::<RangedCoordf64, RangedCoordf64>::new(
        -extent..extent,
        -extent..extent,
        region.get_pixel_range(),
    ));

    let pixels_per_unit = side as f64 / (2.0 * extent);
    let line_px = |props: &LineProps| ((props.width * dpi / POINTS_PER_INCH).round() as u32).max(1);
    let stroke =
        |props: &LineProps| Color::stroke_width(&props.color.mix(props.opacity), line_px(props));

    if !style.hide_frame {
        area.draw(&Rectangle::new(
            [(-extent, -extent), (extent, extent)],
            Color::stroke_width(&BLACK, 1),
        ))?;
    }

    for primitive in scene.iter() {
        match primitive {
            Primitive::Segment {
                from,
                to,
                stroke: props,
            } => {
                area.draw(&PathElement::new(
                    vec![xy(*from), xy(*to)],
                    stroke(props),
                ))?;
            }
            Primitive::Arrow {
                from,
                tip,
                stroke: props,
                face,
                ..
            } => {
                if let Some((base, left_barb, right_barb)) = primitive.arrow_head() {
                    area.draw(&PathElement::new(
                        vec![xy(*from), xy(base)],
                        stroke(props),
                    ))?;
                    let head: Vec<(f64, f64)> =
                        vec![xy(*tip), xy(left_barb), xy(right_barb)];
                    area.draw(&Polygon::new(head.clone(), face.mix(props.opacity).filled()))?;
                    let mut outline = head;
                    outline.push(outline[0]);
                    area.draw(&PathElement::new(outline, stroke(props)))?;
                }
            }
            Primitive::Circle {
                center,
                radius,
                stroke: props,
            } => {
                let radius_px = ((radius * pixels_per_unit).round() as i32).max(1);
                area.draw(&Circle::new(xy(*center), radius_px, stroke(props)))?;
            }
            Primitive::Polygon {
                points,
                fill,
                opacity,
            } => {
                let vertices: Vec<(f64, f64)> = points.iter().map(|p| xy(*p)).collect();
                area.draw(&Polygon::new(vertices, fill.mix(*opacity).filled()))?;
            }
            Primitive::Text {
                anchor,
                text,
                props,
            } => {
                let font = ("sans-serif", props.font_size * dpi / POINTS_PER_INCH)
                    .into_font()
                    .color(&props.color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                area.draw(&Text::new(text.clone(), xy(*anchor), font))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn xy(p: Point) -> (f64, f64) {
    p.into()
}

/// Backend wrapper that skips text when no usable font is installed.
///
/// Bitmap text needs a system font; without one the save would fail outright.
/// Geometry is still drawn and the missing labels are reported once.
struct FontSafeBackend<DB> {
    inner: DB,
    text_skipped: bool,
}

impl<DB> FontSafeBackend<DB> {
    fn new(inner: DB) -> Self {
        Self {
            inner,
            text_skipped: false,
        }
    }

    fn skip_text(&mut self, text: &str, reason: &str) {
        if !self.text_skipped {
            warn!(text, reason, "Font unavailable, labels will be omitted");
            self.text_skipped = true;
        }
    }
}

impl<DB: DrawingBackend> DrawingBackend for FontSafeBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            self.inner.draw_text(text, style, pos)
        }));
        match outcome {
            Ok(Err(DrawingErrorKind::FontError(e))) => {
                self.skip_text(text, &e.to_string());
                Ok(())
            }
            Ok(result) => result,
            Err(_) => {
                self.skip_text(text, "font backend panicked");
                Ok(())
            }
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        self.inner.estimate_text_size(text, style)
    }
}
