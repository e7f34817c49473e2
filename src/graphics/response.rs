
//! Serializable output of the plotting pipeline.

use super::interval::Interval;
use super::mapper::{CanvasPoint, CanvasSpec};
use crate::util::point::Point2D;

use serde::{Serialize, Deserialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotResponse {
  /// The curve in canvas space, one polyline per segment.
  pub segments: Vec<Vec<CanvasPoint>>,
  pub domain: Interval,
  pub range: Interval,
  pub canvas: CanvasSpec,
  pub markers: Vec<Marker>,
  pub label: Option<String>,
  /// False when the expression failed to compile. The curve is then
  /// empty, but the axes and markers are still meaningful.
  pub valid_expression: bool,
}

/// An annotated point, in both math and canvas space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
  pub point: Point2D,
  pub position: CanvasPoint,
  pub label: Option<String>,
  pub color: Option<String>,
  pub kind: MarkerKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
  PointOfInterest,
  Optimum,
  Marked,
}

impl PlotResponse {
  pub fn point_count(&self) -> usize {
    self.segments.iter().map(Vec::len).sum()
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}
