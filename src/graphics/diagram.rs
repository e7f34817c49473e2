
//! The plotting pipeline: parameters in, a fully resolved diagram out.
//!
//! [`FunctionDiagram::build`] never fails. Every problem with the
//! parameters is logged and recovered from, so that a broken
//! expression still renders axes and annotations.
//! [`FunctionDiagram::try_build`] reports the same problems as errors
//! instead, for callers that validate authored content.

use super::interval::{Interval, IntervalError};
use super::mapper::{CanvasGeometry, CanvasPoint, CanvasSpec, CoordinateMapper};
use super::range::RangeEstimator;
use super::response::{Marker, MarkerKind, PlotResponse};
use super::sampler::{CurveSampler, SampledCurve};
use super::settings::PlotSettings;
use crate::error::Error;
use crate::expr::compiled::{self, CompiledFunction, RealFunction};
use crate::util::point::Point2D;

use serde::{Serialize, Deserialize};

/// Inputs of a function diagram, as supplied by the UI shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramParams {
  pub expression: String,
  /// Caption shown next to the curve, such as `f(x)`.
  pub label: Option<String>,
  pub x_min: Option<f64>,
  pub x_max: Option<f64>,
  /// Overrides the lower bound of the estimated range.
  pub y_min: Option<f64>,
  /// Overrides the upper bound of the estimated range.
  pub y_max: Option<f64>,
  pub point_of_interest: Point2D,
  #[serde(default)]
  pub canvas: CanvasSpec,
  #[serde(default)]
  pub settings: PlotSettings,
  #[serde(default, alias = "showPoints")]
  pub marked_points: Vec<MarkedPoint>,
  pub optimum: Option<Optimum>,
  #[serde(default)]
  pub style: DiagramStyle,
}

/// A point to annotate. When `y` is absent, it is computed from the
/// function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedPoint {
  pub x: f64,
  pub y: Option<f64>,
  pub label: Option<String>,
  pub color: Option<String>,
}

/// Which extremum the point of interest represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimum {
  Maximize,
  Minimize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramStyle {
  pub curve_color: String,
  pub axis_color: String,
  pub grid_color: String,
  pub marker_color: String,
  pub stroke_width: f64,
  pub marker_radius: f64,
  pub show_grid: bool,
  pub show_axes: bool,
  pub show_frame: bool,
}

/// A fully resolved diagram. Everything a renderer needs is computed
/// up front.
#[derive(Debug, Clone)]
pub struct FunctionDiagram {
  function: CompiledFunction,
  mapper: CoordinateMapper,
  curve: SampledCurve,
  markers: Vec<Marker>,
  label: Option<String>,
  style: DiagramStyle,
}

/// Half-width of the default domain when the point of interest is
/// close to the origin.
pub const DEFAULT_DOMAIN_HALF_WIDTH: f64 = 5.0;

impl DiagramParams {
  pub fn from_json(json: &str) -> Result<Self, Error> {
    Ok(serde_json::from_str(json)?)
  }

  /// Parameters with every optional field at its default.
  pub fn new(expression: impl Into<String>, point_of_interest: Point2D) -> Self {
    Self {
      expression: expression.into(),
      label: None,
      x_min: None,
      x_max: None,
      y_min: None,
      y_max: None,
      point_of_interest,
      canvas: CanvasSpec::default(),
      settings: PlotSettings::default(),
      marked_points: Vec::new(),
      optimum: None,
      style: DiagramStyle::default(),
    }
  }

  /// The domain used when `xMin` and `xMax` are both absent:
  /// `[p.x - h, p.x + h]` with `h = max(|p.x|, 5)`.
  pub fn default_domain(&self) -> Interval {
    let center = finite_or_zero(self.point_of_interest.x);
    let half_width = f64::max(center.abs(), DEFAULT_DOMAIN_HALF_WIDTH);
    // Only fails on overflow, for points near f64::MAX.
    Interval::centered(center, half_width).unwrap_or_else(|_| Interval::centered(0.0, DEFAULT_DOMAIN_HALF_WIDTH).unwrap_or(Interval::UNIT))
  }

  /// The domain implied by `xMin` and `xMax`. A single bound keeps its
  /// value and the other comes from the default domain, moved out if
  /// needed so that the result is never empty.
  pub fn explicit_domain(&self) -> Result<Interval, IntervalError> {
    let default = self.default_domain();
    let width = default.span();
    match (self.x_min, self.x_max) {
      (None, None) => Ok(default),
      (Some(min), None) => {
        let max = if default.max() > min { default.max() } else { min + width };
        Interval::new(min, max)
      }
      (None, Some(max)) => {
        let min = if default.min() < max { default.min() } else { max - width };
        Interval::new(min, max)
      }
      (Some(min), Some(max)) => Interval::new(min, max),
    }
  }

  fn resolve_domain(&self) -> Interval {
    self.explicit_domain().unwrap_or_else(|err| {
      let default = self.default_domain();
      log::warn!("Ignoring xMin/xMax ({err}); using default domain {default}");
      default
    })
  }

  fn resolve_range(&self, estimated: Interval) -> Interval {
    if self.y_min.is_none() && self.y_max.is_none() {
      return estimated;
    }
    let min = self.y_min.unwrap_or(estimated.min());
    let max = self.y_max.unwrap_or(estimated.max());
    Interval::new(min, max).unwrap_or_else(|err| {
      log::warn!("Ignoring yMin/yMax ({err}); using estimated range {estimated}");
      estimated
    })
  }

  fn resolve_geometry(&self) -> CanvasGeometry {
    CanvasGeometry::try_from(self.canvas).unwrap_or_else(|err| {
      debug_assert!(false, "{err}");
      log::warn!("{err}; dropping canvas padding");
      CanvasGeometry::new(self.canvas.width, self.canvas.height, 0.0).unwrap_or_default()
    })
  }
}

impl FunctionDiagram {
  /// Runs the whole pipeline. Never fails; see the module
  /// documentation.
  pub fn build(params: &DiagramParams) -> Self {
    let settings = params.settings.sanitized();
    let function = compiled::compile(&params.expression, settings.eval_context());
    let domain = params.resolve_domain();
    let geometry = params.resolve_geometry();
    Self::assemble(params, &settings, function, domain, geometry)
  }

  /// Runs the whole pipeline, failing on an expression that does not
  /// parse, an invalid explicit domain or range, or a canvas without
  /// room for its padding.
  pub fn try_build(params: &DiagramParams) -> Result<Self, Error> {
    let settings = params.settings.sanitized();
    let function = compiled::try_compile(&params.expression, settings.eval_context())?;
    let domain = params.explicit_domain()?;
    let geometry = CanvasGeometry::try_from(params.canvas)?;
    if params.y_min.is_some() || params.y_max.is_some() {
      let estimated = RangeEstimator::new(&settings).estimate(&function, domain, params.point_of_interest);
      Interval::new(params.y_min.unwrap_or(estimated.min()), params.y_max.unwrap_or(estimated.max()))?;
    }
    Ok(Self::assemble(params, &settings, function, domain, geometry))
  }

  fn assemble(
    params: &DiagramParams,
    settings: &PlotSettings,
    function: CompiledFunction,
    domain: Interval,
    geometry: CanvasGeometry,
  ) -> Self {
    log::debug!("Plotting {:?} over domain {domain}", params.expression);
    let estimated = RangeEstimator::new(settings).estimate(&function, domain, params.point_of_interest);
    let range = params.resolve_range(estimated);
    let mapper = CoordinateMapper::new(geometry, domain, range);

    let curve = CurveSampler::new(settings).sample(&function, domain, range).into_curve();
    log::debug!(
      "Sampled {} visible points in {} segments ({} undefined, {} out of band)",
      curve.point_count(),
      curve.segments.len(),
      curve.errors.len(),
      curve.out_of_band,
    );

    let markers = build_markers(params, &function, &mapper);
    Self { function, mapper, curve, markers, label: params.label.clone(), style: params.style.clone() }
  }

  pub fn function(&self) -> &CompiledFunction {
    &self.function
  }

  pub fn mapper(&self) -> &CoordinateMapper {
    &self.mapper
  }

  pub fn domain(&self) -> Interval {
    self.mapper.domain()
  }

  pub fn range(&self) -> Interval {
    self.mapper.range()
  }

  /// The sampled curve, in math space.
  pub fn curve(&self) -> &SampledCurve {
    &self.curve
  }

  pub fn markers(&self) -> &[Marker] {
    &self.markers
  }

  pub fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }

  pub fn style(&self) -> &DiagramStyle {
    &self.style
  }

  /// The curve mapped into canvas space, one polyline per segment.
  pub fn canvas_segments(&self) -> Vec<Vec<CanvasPoint>> {
    self.curve.segments.iter()
      .map(|segment| segment.iter().map(|p| self.mapper.point_to_canvas(*p)).collect())
      .collect()
  }

  pub fn response(&self) -> PlotResponse {
    PlotResponse {
      segments: self.canvas_segments(),
      domain: self.domain(),
      range: self.range(),
      canvas: CanvasSpec::from(*self.mapper.geometry()),
      markers: self.markers.clone(),
      label: self.label.clone(),
      valid_expression: self.function.is_valid(),
    }
  }
}

impl Optimum {
  pub fn label(self) -> &'static str {
    match self {
      Optimum::Maximize => "max",
      Optimum::Minimize => "min",
    }
  }
}

impl Default for DiagramStyle {
  fn default() -> Self {
    Self {
      curve_color: String::from("#2563eb"),
      axis_color: String::from("#374151"),
      grid_color: String::from("#e5e7eb"),
      marker_color: String::from("#dc2626"),
      stroke_width: 2.0,
      marker_radius: 4.0,
      show_grid: true,
      show_axes: true,
      show_frame: true,
    }
  }
}

fn build_markers(params: &DiagramParams, function: &CompiledFunction, mapper: &CoordinateMapper) -> Vec<Marker> {
  let mut markers = Vec::with_capacity(params.marked_points.len() + 1);

  let poi = params.point_of_interest;
  let (kind, label) = match params.optimum {
    Some(optimum) => (MarkerKind::Optimum, Some(optimum.label().to_owned())),
    None => (MarkerKind::PointOfInterest, None),
  };
  push_if_visible(&mut markers, mapper, poi, label, None, kind);

  for marked in &params.marked_points {
    let Some(y) = marked.y.or_else(|| function.eval_at(marked.x)) else {
      log::debug!("Dropping marked point at x = {}: function is undefined there", marked.x);
      continue;
    };
    let point = Point2D::new(marked.x, y);
    push_if_visible(&mut markers, mapper, point, marked.label.clone(), marked.color.clone(), MarkerKind::Marked);
  }
  markers
}

fn push_if_visible(
  markers: &mut Vec<Marker>,
  mapper: &CoordinateMapper,
  point: Point2D,
  label: Option<String>,
  color: Option<String>,
  kind: MarkerKind,
) {
  if !mapper.is_visible(point) {
    log::debug!("Dropping marker at {point}: outside the visible area");
    return;
  }
  let position = mapper.point_to_canvas(point);
  markers.push(Marker { point, position, label, color, kind });
}

fn finite_or_zero(value: f64) -> f64 {
  if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::eval::AngleMode;

  use approx::assert_abs_diff_eq;

  fn params(expression: &str, x_min: f64, x_max: f64, poi: (f64, f64)) -> DiagramParams {
    DiagramParams {
      x_min: Some(x_min),
      x_max: Some(x_max),
      ..DiagramParams::new(expression, Point2D::from(poi))
    }
  }

  #[test]
  fn test_from_json() {
    let json = r#"{
      "expression": "-x^2 + 4x",
      "xMin": 0,
      "xMax": 4,
      "pointOfInterest": {"x": 2, "y": 4},
      "optimum": "maximize",
      "settings": {"curveSamples": 50},
      "markedPoints": [{"x": 1, "label": "A"}]
    }"#;
    let params = DiagramParams::from_json(json).unwrap();
    assert_eq!(params.expression, "-x^2 + 4x");
    assert_eq!(params.x_min, Some(0.0));
    assert_eq!(params.y_min, None);
    assert_eq!(params.optimum, Some(Optimum::Maximize));
    assert_eq!(params.settings.curve_samples, 50);
    assert_eq!(params.canvas, CanvasSpec::default());
    assert_eq!(params.marked_points[0].label.as_deref(), Some("A"));
    assert_eq!(params.marked_points[0].y, None);
    assert_eq!(params.label, None);
    assert!(params.style.show_grid);
  }

  #[test]
  fn test_from_json_show_points_and_label() {
    let json = r#"{
      "expression": "x^2",
      "label": "f(x) = x^2",
      "pointOfInterest": {"x": 0, "y": 0},
      "showPoints": [{"x": 1}, {"x": -1, "label": "P"}]
    }"#;
    let params = DiagramParams::from_json(json).unwrap();
    assert_eq!(params.label.as_deref(), Some("f(x) = x^2"));
    assert_eq!(params.marked_points.len(), 2);
    let diagram = FunctionDiagram::build(&params);
    assert_eq!(diagram.label(), Some("f(x) = x^2"));
    assert_eq!(diagram.response().label.as_deref(), Some("f(x) = x^2"));
    assert_eq!(diagram.markers().iter().filter(|m| m.kind == MarkerKind::Marked).count(), 2);
  }

  #[test]
  fn test_from_json_malformed() {
    assert!(matches!(DiagramParams::from_json("{"), Err(Error::ParamsError(_))));
    assert!(matches!(DiagramParams::from_json(r#"{"expression": "x"}"#), Err(Error::ParamsError(_))));
  }

  #[test]
  fn test_default_domain() {
    let params = DiagramParams::new("x", Point2D::ORIGIN);
    assert_eq!(params.default_domain(), Interval::new(-5.0, 5.0).unwrap());
    let params = DiagramParams::new("x", Point2D::new(5.0, 0.0));
    assert_eq!(params.default_domain(), Interval::new(0.0, 10.0).unwrap());
    let params = DiagramParams::new("x", Point2D::new(-20.0, 0.0));
    assert_eq!(params.default_domain(), Interval::new(-40.0, 0.0).unwrap());
    let params = DiagramParams::new("x", Point2D::new(f64::NAN, 0.0));
    assert_eq!(params.default_domain(), Interval::new(-5.0, 5.0).unwrap());
  }

  #[test]
  fn test_single_bound() {
    let params = DiagramParams { x_min: Some(-1.0), ..DiagramParams::new("x", Point2D::ORIGIN) };
    assert_eq!(params.explicit_domain().unwrap(), Interval::new(-1.0, 5.0).unwrap());
    let params = DiagramParams { x_min: Some(8.0), ..DiagramParams::new("x", Point2D::ORIGIN) };
    assert_eq!(params.explicit_domain().unwrap(), Interval::new(8.0, 18.0).unwrap());
    let params = DiagramParams { x_max: Some(-7.0), ..DiagramParams::new("x", Point2D::ORIGIN) };
    assert_eq!(params.explicit_domain().unwrap(), Interval::new(-17.0, -7.0).unwrap());
  }

  #[test]
  fn test_invalid_domain_falls_back() {
    let params = params("x", 3.0, 3.0, (0.0, 0.0));
    assert!(params.explicit_domain().is_err());
    let diagram = FunctionDiagram::build(&params);
    assert_eq!(diagram.domain(), Interval::new(-5.0, 5.0).unwrap());
    assert!(matches!(FunctionDiagram::try_build(&params), Err(Error::IntervalError(_))));
  }

  #[test]
  fn test_scenario_parabola_is_symmetric() {
    let diagram = FunctionDiagram::build(&params("x^2", -3.0, 3.0, (0.0, 0.0)));
    assert_abs_diff_eq!(diagram.range().min(), 0.0);
    assert_abs_diff_eq!(diagram.range().max(), 11.0);
    let points: Vec<_> = diagram.curve().points().copied().collect();
    assert_eq!(points.len(), 300);
    assert_eq!(diagram.curve().segments.len(), 1);
    let n = points.len();
    for i in 0..n / 2 {
      assert_abs_diff_eq!(points[i].x, -points[n - 1 - i].x, epsilon = 1e-9);
      assert_abs_diff_eq!(points[i].y, points[n - 1 - i].y, epsilon = 1e-9);
    }
  }

  #[test]
  fn test_scenario_reciprocal_has_gap() {
    let diagram = FunctionDiagram::build(&params("1/x", -2.0, 2.0, (1.0, 1.0)));
    let response = diagram.response();
    assert_eq!(response.segments.len(), 2);
    let zero_px = diagram.mapper().canvas_x(0.0);
    assert!(response.segments[0].iter().all(|p| p.x < zero_px));
    assert!(response.segments[1].iter().all(|p| p.x > zero_px));
  }

  #[test]
  fn test_scenario_sqrt_domain() {
    let diagram = FunctionDiagram::build(&params("sqrt(x)", -2.0, 2.0, (1.0, 1.0)));
    assert!(diagram.curve().point_count() > 0);
    assert!(diagram.curve().points().all(|p| p.x >= 0.0));
  }

  #[test]
  fn test_scenario_constant() {
    let diagram = FunctionDiagram::build(&params("5", -1.0, 1.0, (0.0, 5.0)));
    assert!(diagram.range().span() >= 2.0);
    assert!(diagram.range().contains(5.0));
    assert_eq!(diagram.curve().point_count(), 300);
  }

  #[test]
  fn test_scenario_malformed_expression() {
    let diagram = FunctionDiagram::build(&params("x +* 2", -5.0, 5.0, (0.0, 0.0)));
    let response = diagram.response();
    assert!(response.segments.is_empty());
    assert!(!response.valid_expression);
    // The point of interest is still annotated.
    assert_eq!(response.markers.len(), 1);
    assert!(matches!(FunctionDiagram::try_build(&params("x +* 2", -5.0, 5.0, (0.0, 0.0))), Err(Error::ParseError(_))));
  }

  #[test]
  fn test_hostile_expressions_build() {
    let deep_calls = format!("{}x{}", "sqrt(".repeat(10_000), ")".repeat(10_000));
    let unclosed_calls = "sqrt(".repeat(10_000);
    let deep_negation = format!("{}x", "-".repeat(100_000));
    for expression in ["", ")", "sin(", &deep_calls, &unclosed_calls, &deep_negation] {
      let params = params(expression, -5.0, 5.0, (0.0, 0.0));
      let diagram = FunctionDiagram::build(&params);
      let response = diagram.response();
      assert!(!response.valid_expression);
      assert!(response.segments.is_empty());
      assert_eq!(diagram.range(), Interval::new(0.0, 2.0).unwrap());
      assert!(matches!(FunctionDiagram::try_build(&params), Err(Error::ParseError(_))));
    }
  }

  #[test]
  fn test_overflowing_literal_is_undefined() {
    // 1e400 reads as infinity, which never evaluates.
    let diagram = FunctionDiagram::build(&params("1e400", -5.0, 5.0, (0.0, 0.0)));
    assert!(diagram.function().is_valid());
    assert_eq!(diagram.curve().point_count(), 0);
    assert_eq!(diagram.curve().errors.len(), 300);
    assert_eq!(diagram.range(), Interval::new(0.0, 2.0).unwrap());
  }

  #[test]
  fn test_huge_exponent() {
    let diagram = FunctionDiagram::build(&params("x^1e308", -5.0, 5.0, (0.0, 0.0)));
    let range = diagram.range();
    assert!(range.min().is_finite() && range.max().is_finite());
    assert!(range.max() <= 3.0);
    assert!(diagram.curve().point_count() > 0);
    assert!(diagram.curve().points().all(|p| p.x.abs() <= 1.0 && range.contains(p.y)));
  }

  #[test]
  fn test_pipeline_is_idempotent() {
    let params = params("-x^2 + 4x", 0.0, 4.0, (2.0, 4.0));
    assert_eq!(FunctionDiagram::build(&params).response(), FunctionDiagram::build(&params).response());
  }

  #[test]
  fn test_canvas_points_within_plot_area() {
    let diagram = FunctionDiagram::build(&params("sin(x) + 1", -6.0, 6.0, (0.0, 1.0)));
    for segment in diagram.canvas_segments() {
      for p in segment {
        assert!((40.0..=360.0).contains(&p.x));
        assert!((40.0..=260.0).contains(&p.y));
      }
    }
  }

  #[test]
  fn test_range_overrides() {
    let mut params = params("x^2", -2.0, 2.0, (0.0, 0.0));
    params.y_max = Some(2.0);
    let diagram = FunctionDiagram::build(&params);
    assert_abs_diff_eq!(diagram.range().min(), 0.0);
    assert_abs_diff_eq!(diagram.range().max(), 2.0);

    params.y_min = Some(-1.0);
    params.y_max = Some(-2.0);
    let diagram = FunctionDiagram::build(&params);
    assert!(diagram.range().max() > 2.0);
    assert!(matches!(FunctionDiagram::try_build(&params), Err(Error::IntervalError(_))));
  }

  #[test]
  fn test_optimum_marker() {
    let mut params = params("-x^2 + 4x", 0.0, 4.0, (2.0, 4.0));
    params.optimum = Some(Optimum::Maximize);
    let diagram = FunctionDiagram::build(&params);
    let marker = &diagram.markers()[0];
    assert_eq!(marker.kind, MarkerKind::Optimum);
    assert_eq!(marker.label.as_deref(), Some("max"));
    assert_abs_diff_eq!(marker.position, diagram.mapper().to_canvas(2.0, 4.0));
  }

  #[test]
  fn test_marked_points() {
    let mut params = params("sqrt(x)", -4.0, 4.0, (0.0, 0.0));
    params.marked_points = vec![
      MarkedPoint { x: 4.0, y: None, label: Some("B".to_owned()), color: None },
      MarkedPoint { x: -1.0, y: None, label: Some("undefined".to_owned()), color: None },
      MarkedPoint { x: 1.0, y: Some(0.5), label: None, color: Some("green".to_owned()) },
      MarkedPoint { x: 10.0, y: Some(0.5), label: Some("offscreen".to_owned()), color: None },
    ];
    let diagram = FunctionDiagram::build(&params);
    let marked: Vec<_> = diagram.markers().iter().filter(|m| m.kind == MarkerKind::Marked).collect();
    assert_eq!(marked.len(), 2);
    assert_abs_diff_eq!(marked[0].point, Point2D::new(4.0, 2.0));
    assert_eq!(marked[0].label.as_deref(), Some("B"));
    assert_eq!(marked[1].color.as_deref(), Some("green"));
  }

  #[test]
  fn test_degrees_mode() {
    let mut params = params("sin(x)", 0.0, 360.0, (90.0, 1.0));
    params.settings.angle_mode = AngleMode::Degrees;
    params.settings.nonnegative_outputs = false;
    let diagram = FunctionDiagram::build(&params);
    assert!(diagram.range().min() < -0.9);
    assert!(diagram.range().max() > 0.9);
    assert_eq!(diagram.curve().segments.len(), 1);
  }

  #[test]
  fn test_try_build_rejects_cramped_canvas() {
    let mut params = params("x", -1.0, 1.0, (0.0, 0.0));
    params.canvas = CanvasSpec { width: 60.0, height: 300.0, padding: 40.0 };
    assert!(matches!(FunctionDiagram::try_build(&params), Err(Error::GeometryError(_))));
  }

  #[test]
  fn test_response_json() {
    let diagram = FunctionDiagram::build(&params("x", 0.0, 1.0, (0.5, 0.5)));
    let json = diagram.response().to_json().unwrap();
    assert!(json.contains("\"validExpression\":true"));
    assert!(json.contains("\"kind\":\"pointOfInterest\""));
  }
}
