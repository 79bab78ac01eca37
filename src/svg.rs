//! SVG surface: serializes display lists to standalone SVG documents.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fs;
use std::path::PathBuf;

use crate::camera::Point;
use crate::color::{Rgb, Stroke};
use crate::frame_loop::{Surface, SurfaceError};
use crate::render::{DisplayList, DrawCmd};

/// Keeps the latest frame as SVG text, optionally mirroring it to a file.
#[derive(Debug, Default)]
pub struct SvgSurface {
    path: Option<PathBuf>,
    last: Option<String>,
    presented: u64,
}

impl SvgSurface {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Overwrite `path` with every presented frame.
    #[must_use]
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), ..Self::default() }
    }

    /// SVG text of the last presented frame.
    #[must_use]
    pub fn last_svg(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for SvgSurface {
    fn present(&mut self, list: &DisplayList) -> Result<(), SurfaceError> {
        let svg = to_svg(list);
        if let Some(path) = &self.path {
            fs::write(path, &svg)?;
        }
        self.last = Some(svg);
        self.presented += 1;
        Ok(())
    }
}

/// Render a display list as an SVG document.
#[must_use]
pub fn to_svg(list: &DisplayList) -> String {
    let (w, h) = (num(list.width), num(list.height));
    let mut lines = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )];
    lines.extend(list.commands().iter().map(|cmd| element(cmd, &w, &h)));
    lines.push("</svg>".to_string());
    lines.join("\n")
}

fn element(cmd: &DrawCmd, w: &str, h: &str) -> String {
    match cmd {
        DrawCmd::Clear { color } => format!(r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{color}"/>"#),
        DrawCmd::Line { from, to, stroke } => format!(
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            paint(None, Some(*stroke)),
        ),
        DrawCmd::Rect { origin, width, height, fill, stroke } => format!(
            r#"  <rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            num(origin.x),
            num(origin.y),
            num(*width),
            num(*height),
            paint(Some(*fill), *stroke),
        ),
        DrawCmd::Polygon { points, fill, stroke } => {
            format!(r#"  <polygon points="{}"{}/>"#, point_list(points), paint(Some(*fill), *stroke))
        }
    }
}

/// Fill and stroke attributes. `fill` is `None` for elements that take no fill.
fn paint(fill: Option<Option<Rgb>>, stroke: Option<Stroke>) -> String {
    let mut attrs = String::new();
    match fill {
        Some(Some(color)) => attrs.push_str(&format!(r#" fill="{color}""#)),
        Some(None) => attrs.push_str(r#" fill="none""#),
        None => {}
    }
    if let Some(s) = stroke {
        attrs.push_str(&format!(r#" stroke="{}" stroke-width="{}""#, s.color, num(s.width)));
    }
    attrs
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Two decimals, without trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
