//! Integration tests for writing plots to disk.
//!
//! Image dimensions are read back from the files: the PNG IHDR chunk and the
//! root `<svg>` element attributes.

use std::fs;
use std::path::Path;

use radar_plot::{MultipleAxisPlot, PlotError, PlotStyle, SaveOptions};

fn demo_plot(width: f64, height: f64) -> MultipleAxisPlot {
    let mut plot = MultipleAxisPlot::new(width, height, PlotStyle::default().with_seed(3)).unwrap();
    plot.draw_axis(&[10.0, 20.0, 30.0], &["SRMUSD", "BTCUSD", "ETHUSD"])
        .unwrap();
    plot.draw_polygon(&[8.0, 6.0, 3.0], 0.5).unwrap();
    plot.draw_polygon(&[4.0, 12.0, 10.0], 0.5).unwrap();
    plot
}

/// Width and height from the IHDR chunk of a PNG file.
fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = fs::read(path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(&bytes[12..16], b"IHDR");
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}

fn svg_attribute(svg: &str, name: &str) -> u32 {
    let root = &svg[svg.find("<svg").unwrap()..];
    let key = format!(" {}=\"", name);
    let start = root.find(&key).unwrap() + key.len();
    let end = start + root[start..].find('"').unwrap();
    root[start..end].parse().unwrap()
}

#[test]
fn test_png_dimensions_follow_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(4.0, 3.0);

    let path = dir.path().join("plot.png");
    plot.save_plot(&path, &SaveOptions::default()).unwrap();
    assert_eq!(png_dimensions(&path), (400, 300));
    assert_eq!(png_dimensions(&path), plot.pixel_size(100.0));

    let hd = dir.path().join("plot_hd.png");
    plot.save_plot(&hd, &SaveOptions::with_dpi(150.0)).unwrap();
    assert_eq!(png_dimensions(&hd), (600, 450));
}

#[test]
fn test_svg_dimensions_follow_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(3.0, 2.0);

    let path = dir.path().join("plot.svg");
    plot.save_plot(&path, &SaveOptions::with_dpi(50.0)).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert_eq!(svg_attribute(&svg, "width"), 150);
    assert_eq!(svg_attribute(&svg, "height"), 100);
    assert!(svg.contains("<polygon") || svg.contains("<path"));
}

#[test]
fn test_same_plot_saved_repeatedly() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(2.0, 2.0);
    let primitives = plot.scene().len();

    for name in ["a.png", "b.svg", "c.png"] {
        plot.save_plot(dir.path().join(name), &SaveOptions::with_dpi(40.0))
            .unwrap();
    }
    assert_eq!(plot.scene().len(), primitives);
    assert!(dir.path().join("c.png").exists());
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(2.0, 2.0);
    let path = dir.path().join("plot.pdf");

    let err = plot.save_plot(&path, &SaveOptions::default()).unwrap_err();
    assert!(matches!(err, PlotError::UnsupportedFormat(ref ext) if ext == "pdf"));
    assert!(!path.exists());
}

#[test]
fn test_missing_directory_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(2.0, 2.0);
    let path = dir.path().join("missing").join("plot.svg");

    let err = plot.save_plot(&path, &SaveOptions::with_dpi(20.0)).unwrap_err();
    assert!(matches!(err, PlotError::Render { .. }));
}

#[test]
fn test_invalid_dpi_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(2.0, 2.0);
    let err = plot
        .save_plot(dir.path().join("plot.png"), &SaveOptions::with_dpi(0.0))
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidStyle(_)));
}

#[test]
fn test_oversized_image_rejected_before_allocation() {
    let dir = tempfile::tempdir().unwrap();
    let plot = demo_plot(2.0, 2.0);
    let path = dir.path().join("huge.png");
    let err = plot
        .save_plot(&path, &SaveOptions::with_dpi(1e9))
        .unwrap_err();
    assert!(matches!(err, PlotError::InvalidStyle(ref m) if m.contains("image limit")));
    assert!(!path.exists());
}

#[test]
fn test_frame_shown_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let mut style = PlotStyle::monochrome().with_seed(9);
    style.hide_frame = false;
    let mut plot = MultipleAxisPlot::new(2.0, 2.0, style).unwrap();
    plot.draw_axis(&[1.0, 2.0, 3.0, 4.0, 5.0], &["a", "b", "c", "d", "e"])
        .unwrap();
    plot.draw_arbitrary_polygon(&[4, 1, 2], &[5.0, 1.0, 0.0]).unwrap();
    plot.set_title("Monochrome");

    let path = dir.path().join("framed.png");
    plot.save_plot(&path, &SaveOptions::with_dpi(60.0)).unwrap();
    assert_eq!(png_dimensions(&path), (120, 120));
}
