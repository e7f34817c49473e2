
//! Affine mapping between math space and canvas (pixel) space.

use super::interval::Interval;
use crate::util::point::Point2D;

use approx::AbsDiffEq;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Size of the drawing surface, in pixels, and the padding kept free
/// on every side of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CanvasSpec")]
pub struct CanvasGeometry {
  width: f64,
  height: f64,
  padding: f64,
}

/// Unchecked canvas dimensions, as they appear in diagram parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
  pub width: f64,
  pub height: f64,
  pub padding: f64,
}

/// A point in canvas space. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum GeometryError {
  #[error("Canvas dimensions must be finite and non-negative, got {width}x{height} with padding {padding}")]
  InvalidDimensions { width: f64, height: f64, padding: f64 },
  #[error("Canvas {width}x{height} leaves no room for padding {padding}")]
  NoDrawableArea { width: f64, height: f64, padding: f64 },
}

/// Maps math coordinates in `domain` x `range` onto the padded plot
/// area of a canvas, and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateMapper {
  geometry: CanvasGeometry,
  domain: Interval,
  range: Interval,
}

impl CanvasGeometry {
  pub const DEFAULT_WIDTH: f64 = 400.0;
  pub const DEFAULT_HEIGHT: f64 = 300.0;
  pub const DEFAULT_PADDING: f64 = 40.0;

  pub fn new(width: f64, height: f64, padding: f64) -> Result<Self, GeometryError> {
    let all_valid = [width, height, padding].iter().all(|v| v.is_finite() && *v >= 0.0);
    if !all_valid {
      return Err(GeometryError::InvalidDimensions { width, height, padding });
    }
    if width <= 2.0 * padding || height <= 2.0 * padding {
      return Err(GeometryError::NoDrawableArea { width, height, padding });
    }
    Ok(Self { width, height, padding })
  }

  pub fn width(&self) -> f64 {
    self.width
  }

  pub fn height(&self) -> f64 {
    self.height
  }

  pub fn padding(&self) -> f64 {
    self.padding
  }

  /// Width of the plot area inside the padding. Always positive.
  pub fn inner_width(&self) -> f64 {
    self.width - 2.0 * self.padding
  }

  /// Height of the plot area inside the padding. Always positive.
  pub fn inner_height(&self) -> f64 {
    self.height - 2.0 * self.padding
  }
}

impl Default for CanvasGeometry {
  fn default() -> Self {
    Self {
      width: Self::DEFAULT_WIDTH,
      height: Self::DEFAULT_HEIGHT,
      padding: Self::DEFAULT_PADDING,
    }
  }
}

impl Default for CanvasSpec {
  fn default() -> Self {
    Self {
      width: CanvasGeometry::DEFAULT_WIDTH,
      height: CanvasGeometry::DEFAULT_HEIGHT,
      padding: CanvasGeometry::DEFAULT_PADDING,
    }
  }
}

impl TryFrom<CanvasSpec> for CanvasGeometry {
  type Error = GeometryError;

  fn try_from(spec: CanvasSpec) -> Result<Self, Self::Error> {
    CanvasGeometry::new(spec.width, spec.height, spec.padding)
  }
}

impl From<CanvasGeometry> for CanvasSpec {
  fn from(geometry: CanvasGeometry) -> Self {
    Self { width: geometry.width, height: geometry.height, padding: geometry.padding }
  }
}

impl CanvasPoint {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

impl AbsDiffEq for CanvasPoint {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    f64::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
    self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
  }
}

impl CoordinateMapper {
  pub fn new(geometry: CanvasGeometry, domain: Interval, range: Interval) -> Self {
    Self { geometry, domain, range }
  }

  pub fn geometry(&self) -> &CanvasGeometry {
    &self.geometry
  }

  pub fn domain(&self) -> Interval {
    self.domain
  }

  pub fn range(&self) -> Interval {
    self.range
  }

  pub fn to_canvas(&self, x: f64, y: f64) -> CanvasPoint {
    let g = &self.geometry;
    CanvasPoint {
      x: g.padding + (x - self.domain.min()) * g.inner_width() / self.domain.span(),
      y: g.height - g.padding - (y - self.range.min()) * g.inner_height() / self.range.span(),
    }
  }

  pub fn point_to_canvas(&self, point: Point2D) -> CanvasPoint {
    self.to_canvas(point.x, point.y)
  }

  /// Inverse of [`CoordinateMapper::to_canvas`].
  pub fn to_math(&self, point: CanvasPoint) -> Point2D {
    let g = &self.geometry;
    Point2D {
      x: self.domain.min() + (point.x - g.padding) * self.domain.span() / g.inner_width(),
      y: self.range.min() + (g.height - g.padding - point.y) * self.range.span() / g.inner_height(),
    }
  }

  /// Canvas x coordinate of the vertical line `x = value`.
  pub fn canvas_x(&self, value: f64) -> f64 {
    self.to_canvas(value, self.range.min()).x
  }

  /// Canvas y coordinate of the horizontal line `y = value`.
  pub fn canvas_y(&self, value: f64) -> f64 {
    self.to_canvas(self.domain.min(), value).y
  }

  /// Whether a math-space point lies in the visible rectangle.
  pub fn is_visible(&self, point: Point2D) -> bool {
    self.domain.contains(point.x) && self.range.contains(point.y)
  }
}
