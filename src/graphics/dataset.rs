
//! Input points for a graph.

use super::interval::Interval;

/// `size` evenly spaced points across an interval, both bounds
/// included. Owns its state, so a fresh pass is just another call to
/// [`XPoints::over_interval`].
#[derive(Debug, Clone)]
pub struct XPoints {
  interval: Interval,
  step: f64,
  index: usize,
  size: usize,
}

impl XPoints {
  pub fn over_interval(interval: Interval, size: usize) -> Self {
    let step = if size > 1 { interval.span() / (size - 1) as f64 } else { 0.0 };
    XPoints { interval, step, index: 0, size }
  }
}

impl Iterator for XPoints {
  type Item = f64;

  fn next(&mut self) -> Option<f64> {
    if self.index >= self.size {
      return None;
    }
    let i = self.index;
    self.index += 1;
    // Pin the last point, so accumulated rounding never pushes it past
    // the upper bound.
    if i + 1 == self.size && self.size > 1 {
      Some(self.interval.max())
    } else {
      Some(self.interval.min() + self.step * i as f64)
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.size.saturating_sub(self.index);
    (remaining, Some(remaining))
  }
}

impl ExactSizeIterator for XPoints {}
