
//! Dense sampling of a function across the visible domain.

use super::dataset::XPoints;
use super::interval::Interval;
use super::settings::PlotSettings;
use crate::errorlist::ErrorList;
use crate::expr::compiled::RealFunction;
use crate::expr::eval::EvalError;
use crate::util::point::Point2D;

/// Samples a function into visible points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampler {
  samples: usize,
  tolerance_margin: f64,
}

/// Lazy sequence of the visible points of a function, in increasing x
/// order. Created by [`CurveSampler::sample`].
pub struct Samples<'f, F: ?Sized> {
  function: &'f F,
  xs: XPoints,
  range: Interval,
  band: (f64, f64),
  /// Set when a sample has been dropped since the last visible point.
  pending_gap: bool,
  errors: ErrorList<EvalError>,
  out_of_band: usize,
}

/// A visible point, together with whether any samples were dropped
/// between it and the previous visible point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPoint {
  pub point: Point2D,
  pub after_gap: bool,
}

/// The fully evaluated result of a [`Samples`] iterator.
#[derive(Debug, Clone)]
pub struct SampledCurve {
  /// Runs of visible points with no dropped samples between them.
  pub segments: Vec<Vec<Point2D>>,
  /// Why each undefined sample was dropped.
  pub errors: ErrorList<EvalError>,
  /// Number of defined samples dropped for lying outside the
  /// tolerance band.
  pub out_of_band: usize,
}

impl CurveSampler {
  pub fn new(settings: &PlotSettings) -> Self {
    Self {
      samples: settings.curve_samples,
      tolerance_margin: settings.tolerance_margin,
    }
  }

  /// Samples `f` at evenly spaced points across `domain`, keeping the
  /// points whose value lies within the tolerance band around
  /// `range`. Kept values outside `range` itself are clamped to it.
  ///
  /// Nothing is evaluated until the result is iterated. Each call
  /// starts a fresh pass.
  pub fn sample<'f, F>(&self, f: &'f F, domain: Interval, range: Interval) -> Samples<'f, F>
  where F: RealFunction + ?Sized {
    let margin = self.tolerance_margin * range.span();
    Samples {
      function: f,
      xs: XPoints::over_interval(domain, self.samples),
      range,
      band: (range.min() - margin, range.max() + margin),
      pending_gap: false,
      errors: ErrorList::new(),
      out_of_band: 0,
    }
  }
}

impl Default for CurveSampler {
  fn default() -> Self {
    Self::new(&PlotSettings::default())
  }
}

impl<'f, F> Samples<'f, F>
where F: RealFunction + ?Sized {
  /// Like [`Iterator::next`], but reports whether samples were
  /// dropped before the returned point.
  pub fn next_sampled(&mut self) -> Option<SampledPoint> {
    for x in self.xs.by_ref() {
      let Some(y) = self.errors.ok(self.function.try_eval_at(x)) else {
        self.pending_gap = true;
        continue;
      };
      if self.band.0 <= y && y <= self.band.1 {
        let after_gap = std::mem::take(&mut self.pending_gap);
        let point = Point2D::new(x, self.range.clamp(y));
        return Some(SampledPoint { point, after_gap });
      }
      self.out_of_band += 1;
      self.pending_gap = true;
    }
    None
  }

  /// Runs the remaining samples, splitting the visible points into
  /// segments wherever samples were dropped.
  pub fn into_curve(mut self) -> SampledCurve {
    let mut segments: Vec<Vec<Point2D>> = Vec::new();
    while let Some(sampled) = self.next_sampled() {
      match segments.last_mut() {
        Some(segment) if !sampled.after_gap => segment.push(sampled.point),
        _ => segments.push(vec![sampled.point]),
      }
    }
    SampledCurve {
      segments,
      errors: self.errors,
      out_of_band: self.out_of_band,
    }
  }
}

impl<'f, F> Iterator for Samples<'f, F>
where F: RealFunction + ?Sized {
  type Item = Point2D;

  fn next(&mut self) -> Option<Point2D> {
    self.next_sampled().map(|sampled| sampled.point)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, self.xs.size_hint().1)
  }
}

impl SampledCurve {
  /// Total number of visible points across all segments.
  pub fn point_count(&self) -> usize {
    self.segments.iter().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  pub fn points(&self) -> impl Iterator<Item = &Point2D> {
    self.segments.iter().flatten()
  }
}
