
//! Estimation of the visible y-range of a function.

use super::dataset::XPoints;
use super::interval::Interval;
use super::settings::PlotSettings;
use crate::expr::compiled::RealFunction;
use crate::util::point::Point2D;

use itertools::{Itertools, MinMaxResult};

/// Derives a padded, non-degenerate y-range from samples of a
/// function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEstimator {
  samples: usize,
  padding_fraction: f64,
  min_padding: f64,
  nonnegative_outputs: bool,
}

impl RangeEstimator {
  pub fn new(settings: &PlotSettings) -> Self {
    Self {
      samples: settings.range_samples,
      padding_fraction: settings.padding_fraction,
      min_padding: settings.min_padding,
      nonnegative_outputs: settings.nonnegative_outputs,
    }
  }

  /// Estimates the range of `f` over `domain`. The point of interest
  /// and zero are always inside the result (zero only when it
  /// survives the non-negative filter, which it always does).
  ///
  /// The result always has positive span, whatever `f` does.
  pub fn estimate<F>(&self, f: &F, domain: Interval, point_of_interest: Point2D) -> Interval
  where F: RealFunction + ?Sized {
    let samples = XPoints::over_interval(domain, self.samples).filter_map(|x| f.eval_at(x));
    let extremes = samples
      .chain([point_of_interest.y, 0.0])
      .filter(|y| y.is_finite())
      .filter(|y| !self.nonnegative_outputs || *y >= 0.0)
      .minmax_by(f64::total_cmp);
    let (min, max) = match extremes {
      MinMaxResult::MinMax(min, max) => (min, max),
      MinMaxResult::OneElement(y) => (y, y),
      MinMaxResult::NoElements => {
        let center = if point_of_interest.y.is_finite() { point_of_interest.y } else { 0.0 };
        (center - 0.5, center + 0.5)
      }
    };

    let padding = f64::max(self.padding_fraction * (max - min), self.min_padding);
    let mut y_min = min - padding / 2.0;
    if self.nonnegative_outputs {
      y_min = y_min.max(0.0);
    }
    let y_max = max + padding;

    let range = Interval::new(y_min, y_max).unwrap_or_else(|err| {
      log::warn!("Could not estimate range ({err}); using {}", Interval::UNIT);
      Interval::UNIT
    });
    log::debug!("Estimated range {range} over domain {domain}");
    range
  }
}

impl Default for RangeEstimator {
  fn default() -> Self {
    Self::new(&PlotSettings::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::compiled::compile;
  use crate::expr::eval::EvalContext;

  use approx::assert_abs_diff_eq;

  fn domain(min: f64, max: f64) -> Interval {
    Interval::new(min, max).unwrap()
  }

  #[test]
  fn test_constant_function() {
    let estimator = RangeEstimator::default();
    let range = estimator.estimate(&|_: f64| 5.0, domain(-1.0, 1.0), Point2D::new(0.0, 5.0));
    // min 0 (always included), max 5, padding max(1, 2) = 2.
    assert_abs_diff_eq!(range.min(), 0.0);
    assert_abs_diff_eq!(range.max(), 7.0);
    assert!(range.span() >= 2.0);
  }

  #[test]
  fn test_constant_zero_function() {
    let estimator = RangeEstimator::default();
    let range = estimator.estimate(&|_: f64| 0.0, domain(-1.0, 1.0), Point2D::ORIGIN);
    assert!(range.span() > 0.0);
    assert_abs_diff_eq!(range.min(), 0.0);
    assert_abs_diff_eq!(range.max(), 2.0);
  }

  #[test]
  fn test_downward_parabola() {
    let estimator = RangeEstimator::default();
    let f = compile("-x^2 + 4x", EvalContext::default());
    let range = estimator.estimate(&f, domain(0.0, 4.0), Point2D::new(2.0, 4.0));
    // Survivors span [0, 4]; padding = max(0.8, 2).
    assert_abs_diff_eq!(range.min(), 0.0);
    assert_abs_diff_eq!(range.max(), 6.0);
  }

  #[test]
  fn test_large_range_uses_fractional_padding() {
    let estimator = RangeEstimator::default();
    let range = estimator.estimate(&|x: f64| x * x, domain(-10.0, 10.0), Point2D::ORIGIN);
    // Survivors span [0, 100]; padding = 20.
    assert_abs_diff_eq!(range.min(), 0.0);
    assert_abs_diff_eq!(range.max(), 120.0);
  }

  #[test]
  fn test_negative_values_are_ignored_by_default() {
    let estimator = RangeEstimator::default();
    let range = estimator.estimate(&|x: f64| x, domain(-10.0, 10.0), Point2D::ORIGIN);
    assert!(range.min() >= 0.0);
    assert_abs_diff_eq!(range.max(), 12.0);
  }

  #[test]
  fn test_signed_outputs() {
    let settings = PlotSettings { nonnegative_outputs: false, ..PlotSettings::default() };
    let estimator = RangeEstimator::new(&settings);
    let range = estimator.estimate(&|x: f64| x, domain(-10.0, 10.0), Point2D::ORIGIN);
    // Survivors span [-10, 10]; padding = 4.
    assert_abs_diff_eq!(range.min(), -12.0);
    assert_abs_diff_eq!(range.max(), 14.0);
  }

  #[test]
  fn test_undefined_everywhere() {
    let estimator = RangeEstimator::default();
    let f = compile("x +* 2", EvalContext::default());
    let range = estimator.estimate(&f, domain(-5.0, 5.0), Point2D::new(1.0, 3.0));
    // Only the point of interest and zero survive.
    assert_abs_diff_eq!(range.min(), 0.0);
    assert_abs_diff_eq!(range.max(), 5.0);
  }

  #[test]
  fn test_non_finite_point_of_interest() {
    let estimator = RangeEstimator::default();
    let range = estimator.estimate(&|_: f64| f64::NAN, domain(-5.0, 5.0), Point2D::new(0.0, f64::NAN));
    assert!(range.span() > 0.0);
  }

  #[test]
  fn test_all_negative_with_signed_outputs() {
    let settings = PlotSettings { nonnegative_outputs: false, ..PlotSettings::default() };
    let estimator = RangeEstimator::new(&settings);
    let range = estimator.estimate(&|_: f64| -3.0, domain(0.0, 1.0), Point2D::new(0.5, -3.0));
    assert!(range.contains(-3.0));
    assert!(range.contains(0.0));
    assert!(range.span() > 0.0);
  }
}
