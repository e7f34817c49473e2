
//! Tunable constants of the plotting engine.

use crate::expr::eval::{AngleMode, EvalContext, LogBase};

use serde::{Serialize, Deserialize};

/// Plot settings, usually embedded in the diagram parameters. Every
/// field is optional in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotSettings {
  /// Number of samples used to estimate the visible range.
  pub range_samples: usize,
  /// Number of samples used to draw the curve.
  pub curve_samples: usize,
  /// Padding added to the range, as a fraction of its span.
  pub padding_fraction: f64,
  /// Lower bound for the range padding, in math units.
  pub min_padding: f64,
  /// Width of the band around the visible range in which points are
  /// still drawn (clamped to the boundary), as a fraction of the range
  /// span.
  pub tolerance_margin: f64,
  /// Whether negative values are ignored by range estimation, and the
  /// range kept at or above zero.
  pub nonnegative_outputs: bool,
  pub angle_mode: AngleMode,
  pub log_base: LogBase,
}

impl PlotSettings {
  /// Default number of points used to estimate the visible range.
  pub const DEFAULT_RANGE_SAMPLES: usize = 100;
  /// Default number of points used to draw a curve.
  pub const DEFAULT_CURVE_SAMPLES: usize = 300;
  /// Upper bound on either sample count.
  pub const MAX_SAMPLES: usize = 10_000;
  pub const DEFAULT_PADDING_FRACTION: f64 = 0.2;
  pub const DEFAULT_MIN_PADDING: f64 = 2.0;
  pub const DEFAULT_TOLERANCE_MARGIN: f64 = 0.1;

  /// The evaluation settings these plot settings imply.
  pub fn eval_context(&self) -> EvalContext {
    EvalContext {
      angle_mode: self.angle_mode,
      log_base: self.log_base,
    }
  }

  /// Replaces out-of-range values with their defaults, logging a
  /// warning for each.
  pub fn sanitized(self) -> Self {
    let defaults = PlotSettings::default();
    let mut settings = self;
    if settings.range_samples < 2 {
      log::warn!("rangeSamples must be at least 2, got {}; using {}", settings.range_samples, defaults.range_samples);
      settings.range_samples = defaults.range_samples;
    } else if settings.range_samples > Self::MAX_SAMPLES {
      log::warn!("rangeSamples must be at most {}, got {}; capping", Self::MAX_SAMPLES, settings.range_samples);
      settings.range_samples = Self::MAX_SAMPLES;
    }
    if settings.curve_samples < 2 {
      log::warn!("curveSamples must be at least 2, got {}; using {}", settings.curve_samples, defaults.curve_samples);
      settings.curve_samples = defaults.curve_samples;
    } else if settings.curve_samples > Self::MAX_SAMPLES {
      log::warn!("curveSamples must be at most {}, got {}; capping", Self::MAX_SAMPLES, settings.curve_samples);
      settings.curve_samples = Self::MAX_SAMPLES;
    }
    if !(settings.padding_fraction.is_finite() && settings.padding_fraction >= 0.0) {
      log::warn!("paddingFraction must be non-negative, got {}; using {}", settings.padding_fraction, defaults.padding_fraction);
      settings.padding_fraction = defaults.padding_fraction;
    }
    if !(settings.min_padding.is_finite() && settings.min_padding > 0.0) {
      log::warn!("minPadding must be positive, got {}; using {}", settings.min_padding, defaults.min_padding);
      settings.min_padding = defaults.min_padding;
    }
    if !(settings.tolerance_margin.is_finite() && settings.tolerance_margin >= 0.0) {
      log::warn!("toleranceMargin must be non-negative, got {}; using {}", settings.tolerance_margin, defaults.tolerance_margin);
      settings.tolerance_margin = defaults.tolerance_margin;
    }
    settings
  }
}

impl Default for PlotSettings {
  fn default() -> Self {
    Self {
      range_samples: Self::DEFAULT_RANGE_SAMPLES,
      curve_samples: Self::DEFAULT_CURVE_SAMPLES,
      padding_fraction: Self::DEFAULT_PADDING_FRACTION,
      min_padding: Self::DEFAULT_MIN_PADDING,
      tolerance_margin: Self::DEFAULT_TOLERANCE_MARGIN,
      nonnegative_outputs: true,
      angle_mode: AngleMode::Radians,
      log_base: LogBase::Ten,
    }
  }
}
