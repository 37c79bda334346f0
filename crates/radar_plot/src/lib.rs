//! # radar_plot: Radial Multi-Axis Polygon Plots
//!
//! Draws N axes radiating from a shared origin and overlays polygons whose
//! vertices sit at `value / max` along each axis. Overlapping semi-transparent
//! polygons show where scenarios concentrate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            MultipleAxisPlot             │
//! │  draw_axis / draw_polygon / save_plot   │
//! ├─────────────────────────────────────────┤
//! │  style/     - PlotStyle, StylePreset    │
//! │  geometry/  - Point, Axis, AxisLayout   │
//! │  colormap/  - Colormap (plasma)         │
//! │  scene/     - Primitive, Scene          │
//! ├─────────────────────────────────────────┤
//! │  render/    - plotters PNG/SVG backends │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Drawing is recorded in plot coordinates and rendered on save, so one plot
//! can be written at several resolutions or formats.
//!
//! ## Example
//!
//! ```
//! use radar_plot::{MultipleAxisPlot, PlotStyle};
//!
//! let mut plot = MultipleAxisPlot::new(8.0, 8.0, PlotStyle::monochrome().with_seed(1)).unwrap();
//! plot.draw_axis(&[10.0, 20.0, 30.0, 1.0], &["a", "b", "c", "d"]).unwrap();
//! plot.draw_polygon(&[8.0, 6.0, 3.0, 0.5], 0.3).unwrap();
//!
//! assert_eq!(plot.axis_count(), 4);
//! assert_eq!(plot.pixel_size(300.0), (2400, 2400));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod colormap;
pub mod error;
pub mod geometry;
pub mod plot;
pub mod render;
pub mod scene;
pub mod style;

// Re-export commonly used types
pub use colormap::Colormap;
pub use error::PlotError;
pub use geometry::{Axis, AxisLayout, Point};
pub use plot::MultipleAxisPlot;
pub use render::{OutputFormat, SaveOptions};
pub use scene::{Primitive, Scene};
pub use style::{PlotStyle, StylePreset};
