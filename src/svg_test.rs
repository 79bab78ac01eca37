use std::fs;

use super::*;
use crate::error::ErrorCode;
use crate::render::BACKGROUND;

fn list() -> DisplayList {
    let mut list = DisplayList::new(800.0, 600.0);
    list.push(DrawCmd::Clear { color: BACKGROUND });
    list
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn empty_frame_is_a_sized_document() {
    let svg = to_svg(&list());
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">"#));
    assert!(svg.contains(r##"<rect x="0" y="0" width="800" height="600" fill="#0a0a0a"/>"##));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn line_carries_stroke() {
    let mut list = list();
    list.push(DrawCmd::Line {
        from: Point::new(0.0, 10.5),
        to: Point::new(800.0, 10.5),
        stroke: Stroke::new(Rgb(0x22, 0x22, 0x22), 1.0),
    });
    assert!(to_svg(&list).contains(r##"<line x1="0" y1="10.5" x2="800" y2="10.5" stroke="#222222" stroke-width="1"/>"##));
}

#[test]
fn rect_without_fill_is_outline_only() {
    let mut list = list();
    list.push(DrawCmd::Rect {
        origin: Point::new(395.0, 310.0),
        width: 10.0,
        height: 20.0,
        fill: None,
        stroke: Some(Stroke::new(Rgb::YELLOW, 2.0)),
    });
    assert!(to_svg(&list).contains(r##"<rect x="395" y="310" width="10" height="20" fill="none" stroke="#ffff00" stroke-width="2"/>"##));
}

#[test]
fn polygon_lists_points() {
    let mut list = list();
    list.push(DrawCmd::Polygon {
        points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.666)],
        fill: Some(Rgb::RED),
        stroke: None,
    });
    assert!(to_svg(&list).contains(r##"<polygon points="0,0 10,0 5,8.67" fill="#ff0000"/>"##));
}

#[test]
fn negative_zero_prints_as_zero() {
    assert_eq!(num(-0.001), "0");
    assert_eq!(num(-12.5), "-12.5");
}

// =============================================================
// Surface
// =============================================================

#[test]
fn in_memory_surface_keeps_last_frame() {
    let mut surface = SvgSurface::in_memory();
    assert!(surface.last_svg().is_none());
    surface.present(&list()).unwrap();
    surface.present(&DisplayList::new(10.0, 10.0)).unwrap();
    assert_eq!(surface.presented(), 2);
    assert!(surface.last_svg().unwrap().contains(r#"width="10""#));
}

#[test]
fn file_surface_overwrites_target() {
    let path = std::env::temp_dir().join(format!("siteplan-{}.svg", uuid::Uuid::now_v7()));
    let mut surface = SvgSurface::to_file(&path);
    surface.present(&list()).unwrap();
    surface.present(&DisplayList::new(10.0, 10.0)).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(Some(written.as_str()), surface.last_svg());
    fs::remove_file(&path).unwrap();
}

#[test]
fn unwritable_path_is_an_io_error() {
    let path = std::env::temp_dir().join("siteplan-missing-dir").join("nested").join("frame.svg");
    let mut surface = SvgSurface::to_file(path);
    let err = surface.present(&list()).unwrap_err();
    assert_eq!(err.error_code(), "E_SURFACE_IO");
    assert_eq!(surface.presented(), 0);
}
