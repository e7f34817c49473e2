
//! Non-degenerate closed intervals of real numbers, used for the
//! visible domain and range of a plot.

use crate::util::clamp;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A closed interval `[min, max]` with finite bounds and `min < max`.
/// The invariant is checked on construction, so the span of an
/// `Interval` is always positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
  min: f64,
  max: f64,
}

/// An unchecked interval, as it appears in serialized input.
#[derive(Clone, Copy, Debug, Deserialize)]
struct RawInterval {
  min: f64,
  max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum IntervalError {
  #[error("Interval bounds must be finite, got [{min}, {max}]")]
  NonFinite { min: f64, max: f64 },
  #[error("Interval must have positive width, got [{min}, {max}]")]
  Empty { min: f64, max: f64 },
}

impl Interval {
  /// The interval `[0, 1]`.
  pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

  pub fn new(min: f64, max: f64) -> Result<Self, IntervalError> {
    if !min.is_finite() || !max.is_finite() {
      Err(IntervalError::NonFinite { min, max })
    } else if min >= max {
      Err(IntervalError::Empty { min, max })
    } else {
      Ok(Self { min, max })
    }
  }

  /// The interval `[center - half_width, center + half_width]`.
  pub fn centered(center: f64, half_width: f64) -> Result<Self, IntervalError> {
    Self::new(center - half_width, center + half_width)
  }

  pub fn min(&self) -> f64 {
    self.min
  }

  pub fn max(&self) -> f64 {
    self.max
  }

  /// `max - min`. Always positive.
  pub fn span(&self) -> f64 {
    self.max - self.min
  }

  pub fn contains(&self, value: f64) -> bool {
    self.min <= value && value <= self.max
  }

  /// The nearest value to `value` inside the interval.
  pub fn clamp(&self, value: f64) -> f64 {
    clamp(value, self.min, self.max)
  }
}

impl TryFrom<RawInterval> for Interval {
  type Error = IntervalError;

  fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
    Interval::new(raw.min, raw.max)
  }
}

impl Display for Interval {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {}]", self.min, self.max)
  }
}
