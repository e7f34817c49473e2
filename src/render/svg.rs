
//! Static SVG output.

use crate::graphics::diagram::{DiagramStyle, FunctionDiagram};
use crate::graphics::interval::Interval;
use crate::graphics::mapper::{CanvasPoint, CoordinateMapper};
use crate::graphics::response::{Marker, MarkerKind};

use html_escape::{encode_double_quoted_attribute, encode_safe};
use itertools::Itertools;

use std::fmt::Write;

/// Renders a [`FunctionDiagram`] as a standalone SVG document. Layers
/// are drawn back to front: grid, frame, axes, curve, markers, label.
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
  _priv: (),
}

/// Approximate number of grid lines across each axis.
const GRID_LINES: f64 = 10.0;

const LABEL_FONT_SIZE: f64 = 12.0;

impl SvgRenderer {
  pub fn new() -> Self {
    Self { _priv: () }
  }

  pub fn render(&self, diagram: &FunctionDiagram) -> String {
    let mapper = diagram.mapper();
    let style = diagram.style();
    let geometry = mapper.geometry();

    let mut out = String::new();
    // unwrap (all writes below): Writing to a String never fails.
    write!(
      out,
      r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
      w = geometry.width(),
      h = geometry.height(),
    ).unwrap();
    if style.show_grid {
      self.write_grid(&mut out, mapper, style);
    }
    if style.show_frame {
      self.write_frame(&mut out, mapper, style);
    }
    if style.show_axes {
      self.write_axes(&mut out, mapper, style);
    }
    for segment in diagram.canvas_segments() {
      self.write_polyline(&mut out, &segment, style);
    }
    for marker in diagram.markers() {
      self.write_marker(&mut out, marker, style);
    }
    if let Some(label) = diagram.label() {
      self.write_label(&mut out, mapper, label, style);
    }
    out.push_str("</svg>");
    out
  }

  fn write_frame(&self, out: &mut String, mapper: &CoordinateMapper, style: &DiagramStyle) {
    let g = mapper.geometry();
    write!(
      out,
      r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
      fmt_coord(g.padding()),
      fmt_coord(g.padding()),
      fmt_coord(g.inner_width()),
      fmt_coord(g.inner_height()),
      encode_double_quoted_attribute(&style.axis_color),
    ).unwrap();
  }

  fn write_grid(&self, out: &mut String, mapper: &CoordinateMapper, style: &DiagramStyle) {
    let color = encode_double_quoted_attribute(&style.grid_color);
    let (top, bottom) = (mapper.canvas_y(mapper.range().max()), mapper.canvas_y(mapper.range().min()));
    let (left, right) = (mapper.canvas_x(mapper.domain().min()), mapper.canvas_x(mapper.domain().max()));
    for x in grid_values(mapper.domain()) {
      write_line(out, "grid", CanvasPoint::new(mapper.canvas_x(x), top), CanvasPoint::new(mapper.canvas_x(x), bottom), &color, 1.0);
    }
    for y in grid_values(mapper.range()) {
      write_line(out, "grid", CanvasPoint::new(left, mapper.canvas_y(y)), CanvasPoint::new(right, mapper.canvas_y(y)), &color, 1.0);
    }
  }

  /// Axes are drawn only where zero is visible.
  fn write_axes(&self, out: &mut String, mapper: &CoordinateMapper, style: &DiagramStyle) {
    let color = encode_double_quoted_attribute(&style.axis_color);
    let domain = mapper.domain();
    let range = mapper.range();
    if domain.contains(0.0) {
      let from = mapper.to_canvas(0.0, range.min());
      let to = mapper.to_canvas(0.0, range.max());
      write_line(out, "axis", from, to, &color, 1.5);
    }
    if range.contains(0.0) {
      let from = mapper.to_canvas(domain.min(), 0.0);
      let to = mapper.to_canvas(domain.max(), 0.0);
      write_line(out, "axis", from, to, &color, 1.5);
    }
  }

  fn write_polyline(&self, out: &mut String, points: &[CanvasPoint], style: &DiagramStyle) {
    if points.is_empty() {
      return;
    }
    let points = points.iter().map(|p| format!("{},{}", fmt_coord(p.x), fmt_coord(p.y))).join(" ");
    write!(
      out,
      r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
      points,
      encode_double_quoted_attribute(&style.curve_color),
      fmt_coord(style.stroke_width),
    ).unwrap();
  }

  fn write_marker(&self, out: &mut String, marker: &Marker, style: &DiagramStyle) {
    let color = marker.color.as_deref().unwrap_or(style.marker_color.as_str());
    let radius = match marker.kind {
      MarkerKind::Optimum => style.marker_radius * 1.5,
      MarkerKind::PointOfInterest | MarkerKind::Marked => style.marker_radius,
    };
    write!(
      out,
      r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
      fmt_coord(marker.position.x),
      fmt_coord(marker.position.y),
      fmt_coord(radius),
      encode_double_quoted_attribute(color),
    ).unwrap();
    if let Some(label) = &marker.label {
      write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
        fmt_coord(marker.position.x + radius + 2.0),
        fmt_coord(marker.position.y - radius - 2.0),
        LABEL_FONT_SIZE,
        encode_double_quoted_attribute(color),
        encode_safe(label),
      ).unwrap();
    }
  }

  /// The function caption, inside the top left corner of the plot area.
  fn write_label(&self, out: &mut String, mapper: &CoordinateMapper, label: &str, style: &DiagramStyle) {
    let g = mapper.geometry();
    write!(
      out,
      r#"<text class="label" x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
      fmt_coord(g.padding() + 4.0),
      fmt_coord(g.padding() + LABEL_FONT_SIZE + 2.0),
      LABEL_FONT_SIZE,
      encode_double_quoted_attribute(&style.curve_color),
      encode_safe(label),
    ).unwrap();
  }
}

fn write_line(out: &mut String, class: &str, from: CanvasPoint, to: CanvasPoint, color: &str, width: f64) {
  write!(
    out,
    r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
    class,
    fmt_coord(from.x),
    fmt_coord(from.y),
    fmt_coord(to.x),
    fmt_coord(to.y),
    color,
    width,
  ).unwrap();
}

/// Formats a canvas coordinate with at most two decimals.
fn fmt_coord(value: f64) -> String {
  let s = format!("{value:.2}");
  let s = s.trim_end_matches('0').trim_end_matches('.');
  if s == "-0" { String::from("0") } else { s.to_owned() }
}

/// A step of 1, 2, or 5 times a power of ten, giving roughly
/// [`GRID_LINES`] lines across `interval`.
fn grid_step(interval: Interval) -> f64 {
  let raw = interval.span() / GRID_LINES;
  let magnitude = 10f64.powf(raw.log10().floor());
  let normalized = raw / magnitude;
  let nice = if normalized < 1.5 { 1.0 } else if normalized < 3.5 { 2.0 } else if normalized < 7.5 { 5.0 } else { 10.0 };
  nice * magnitude
}

/// Multiples of the grid step inside `interval`.
fn grid_values(interval: Interval) -> impl Iterator<Item = f64> {
  let step = grid_step(interval);
  let first = (interval.min() / step).ceil() as i64;
  let last = (interval.max() / step).floor() as i64;
  (first..=last).map(move |i| i as f64 * step)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graphics::diagram::{DiagramParams, MarkedPoint, Optimum};
  use crate::util::point::Point2D;

  use approx::assert_abs_diff_eq;

  fn diagram(expression: &str, x_min: f64, x_max: f64, poi: (f64, f64)) -> DiagramParams {
    DiagramParams {
      x_min: Some(x_min),
      x_max: Some(x_max),
      ..DiagramParams::new(expression, Point2D::from(poi))
    }
  }

  #[test]
  fn test_fmt_coord() {
    assert_eq!(fmt_coord(40.0), "40");
    assert_eq!(fmt_coord(12.5), "12.5");
    assert_eq!(fmt_coord(1.0 / 3.0), "0.33");
    assert_eq!(fmt_coord(-0.001), "0");
  }

  #[test]
  fn test_grid_step() {
    assert_abs_diff_eq!(grid_step(Interval::new(-5.0, 5.0).unwrap()), 1.0);
    assert_abs_diff_eq!(grid_step(Interval::new(0.0, 120.0).unwrap()), 10.0);
    assert_abs_diff_eq!(grid_step(Interval::new(0.0, 3.0).unwrap()), 0.2, epsilon = 1e-12);
    let values: Vec<_> = grid_values(Interval::new(-5.0, 5.0).unwrap()).collect();
    assert_eq!(values.len(), 11);
  }

  #[test]
  fn test_document_structure() {
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&diagram("x^2", -2.0, 2.0, (0.0, 0.0))));
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"width="400" height="300""#));
    assert_eq!(svg.matches("<polyline").count(), 1);
    assert_eq!(svg.matches("<rect").count(), 1);
  }

  #[test]
  fn test_axes_only_where_zero_is_visible() {
    // Domain excludes x = 0, range includes y = 0.
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&diagram("x", 1.0, 5.0, (2.0, 2.0))));
    assert_eq!(svg.matches(r#"class="axis""#).count(), 1);
    // Both visible.
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&diagram("x^2", -2.0, 2.0, (0.0, 0.0))));
    assert_eq!(svg.matches(r#"class="axis""#).count(), 2);
  }

  #[test]
  fn test_segments_render_separately() {
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&diagram("1/x", -2.0, 2.0, (1.0, 1.0))));
    assert_eq!(svg.matches("<polyline").count(), 2);
  }

  #[test]
  fn test_malformed_expression_still_renders_axes() {
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&diagram("x +* 2", -5.0, 5.0, (0.0, 0.0))));
    assert_eq!(svg.matches("<polyline").count(), 0);
    assert_eq!(svg.matches(r#"class="axis""#).count(), 2);
    assert_eq!(svg.matches("<circle").count(), 1);
  }

  #[test]
  fn test_labels_are_escaped() {
    let mut params = diagram("x", 0.0, 4.0, (2.0, 2.0));
    params.marked_points = vec![MarkedPoint {
      x: 1.0,
      y: None,
      label: Some("<b>A & B</b>".to_owned()),
      color: Some("\"red\"".to_owned()),
    }];
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    assert!(svg.contains("&lt;b&gt;A &amp; B&lt;&#x2F;b&gt;"));
    assert!(!svg.contains("<b>"));
    assert!(!svg.contains("\"\"red\"\""));
  }

  #[test]
  fn test_optimum_label() {
    let mut params = diagram("-x^2 + 4x", 0.0, 4.0, (2.0, 4.0));
    params.optimum = Some(Optimum::Minimize);
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    assert!(svg.contains(">min</text>"));
  }

  #[test]
  fn test_grid() {
    let mut params = diagram("x", -5.0, 5.0, (0.0, 0.0));
    params.style.show_axes = false;
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    // 11 vertical lines over [-5, 5], plus horizontal ones over the range.
    assert!(svg.matches(r#"class="grid""#).count() > 11);
    assert_eq!(svg.matches("<line").count(), svg.matches(r#"class="grid""#).count());

    params.style.show_grid = false;
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    assert_eq!(svg.matches("<line").count(), 0);
  }

  #[test]
  fn test_function_label() {
    let mut params = diagram("x^2", -2.0, 2.0, (0.0, 0.0));
    params.label = Some("f(x) = x^2 < 5".to_owned());
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    assert!(svg.contains(r#"<text class="label" x="44" y="54""#));
    assert!(svg.contains(">f(x) = x^2 &lt; 5</text>"));

    params.label = None;
    let svg = SvgRenderer::new().render(&FunctionDiagram::build(&params));
    assert!(!svg.contains(r#"class="label""#));
  }
}
