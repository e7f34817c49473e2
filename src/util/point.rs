
//! Structs for manipulating points in 2D space.

use approx::AbsDiffEq;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// A point in math space.
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
  pub x: f64,
  pub y: f64,
}

impl Point2D {
  pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

impl Display for Point2D {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

impl From<(f64, f64)> for Point2D {
  fn from((x, y): (f64, f64)) -> Self {
    Self { x, y }
  }
}

impl AbsDiffEq for Point2D {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    f64::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
    self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  #[test]
  fn test_display() {
    assert_eq!(Point2D::new(1.5, -2.0).to_string(), "(1.5, -2)");
  }

  #[test]
  fn test_abs_diff_eq() {
    assert_abs_diff_eq!(Point2D::new(1.0, 2.0), Point2D::new(1.0 + 1e-12, 2.0), epsilon = 1e-9);
    assert!(!Point2D::new(1.0, 2.0).abs_diff_eq(&Point2D::new(1.1, 2.0), 1e-9));
  }
}
