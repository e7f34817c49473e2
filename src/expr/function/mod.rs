
//! The whitelist of named functions an expression may call.

pub mod flags;

use flags::FunctionFlags;
use super::eval::{EvalContext, EvalError, AngleMode, LogBase};
use crate::util::angles::{Degrees, Radians};

use std::fmt::{self, Display, Formatter};

/// A function known to the evaluator. Every variant is bound to one
/// real primitive. Names are resolved to variants at parse time, so
/// an unknown name never reaches evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
  Sin,
  Cos,
  Tan,
  Sqrt,
  Abs,
  /// Natural logarithm.
  Ln,
  /// Logarithm in the base selected by [`LogBase`].
  Log,
  Exp,
}

impl MathFunction {
  pub const ALL: [MathFunction; 8] = [
    MathFunction::Sin,
    MathFunction::Cos,
    MathFunction::Tan,
    MathFunction::Sqrt,
    MathFunction::Abs,
    MathFunction::Ln,
    MathFunction::Log,
    MathFunction::Exp,
  ];

  pub fn name(self) -> &'static str {
    match self {
      MathFunction::Sin => "sin",
      MathFunction::Cos => "cos",
      MathFunction::Tan => "tan",
      MathFunction::Sqrt => "sqrt",
      MathFunction::Abs => "abs",
      MathFunction::Ln => "ln",
      MathFunction::Log => "log",
      MathFunction::Exp => "exp",
    }
  }

  pub fn from_name(name: &str) -> Option<MathFunction> {
    MathFunction::ALL.into_iter().find(|f| f.name() == name)
  }

  /// The number of arguments the function accepts.
  pub fn arity(self) -> usize {
    1
  }

  pub fn flags(self) -> FunctionFlags {
    match self {
      MathFunction::Sin | MathFunction::Cos | MathFunction::Tan => FunctionFlags::TAKES_ANGLE,
      MathFunction::Sqrt => FunctionFlags::NONNEGATIVE_DOMAIN,
      MathFunction::Ln | MathFunction::Log => FunctionFlags::POSITIVE_DOMAIN,
      MathFunction::Abs | MathFunction::Exp => FunctionFlags::empty(),
    }
  }

  /// Applies the function to a single argument.
  ///
  /// Arguments outside the function's domain produce
  /// [`EvalError::DomainError`]. Overflow is left to the caller, which
  /// checks every intermediate result for finiteness.
  pub fn apply(self, arg: f64, context: &EvalContext) -> Result<f64, EvalError> {
    let flags = self.flags();
    if !flags.admits(arg) {
      return Err(EvalError::DomainError { function: self, arg });
    }
    let angle = if flags.contains(FunctionFlags::TAKES_ANGLE) {
      match context.angle_mode {
        AngleMode::Radians => Radians(arg),
        AngleMode::Degrees => Degrees(arg).into_radians(),
      }
    } else {
      Radians(arg)
    };
    let value = match self {
      MathFunction::Sin => angle.sin(),
      MathFunction::Cos => angle.cos(),
      MathFunction::Tan => angle.tan(),
      MathFunction::Sqrt => arg.sqrt(),
      MathFunction::Abs => arg.abs(),
      MathFunction::Ln => arg.ln(),
      MathFunction::Log => match context.log_base {
        LogBase::Ten => arg.log10(),
        LogBase::Natural => arg.ln(),
      },
      MathFunction::Exp => arg.exp(),
    };
    Ok(value)
  }
}

impl Display for MathFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_abs_diff_eq;

  use std::f64::consts::{E, PI};

  #[test]
  fn test_name_round_trip() {
    for f in MathFunction::ALL {
      assert_eq!(MathFunction::from_name(f.name()), Some(f));
    }
    assert_eq!(MathFunction::from_name("eval"), None);
    assert_eq!(MathFunction::from_name("Sin"), None);
  }

  #[test]
  fn test_apply_radians() {
    let context = EvalContext::default();
    assert_abs_diff_eq!(MathFunction::Sin.apply(PI / 2.0, &context).unwrap(), 1.0);
    assert_abs_diff_eq!(MathFunction::Cos.apply(PI, &context).unwrap(), -1.0);
    assert_abs_diff_eq!(MathFunction::Exp.apply(1.0, &context).unwrap(), E);
    assert_abs_diff_eq!(MathFunction::Abs.apply(-3.0, &context).unwrap(), 3.0);
  }

  #[test]
  fn test_apply_degrees() {
    let context = EvalContext { angle_mode: AngleMode::Degrees, ..EvalContext::default() };
    assert_abs_diff_eq!(MathFunction::Sin.apply(90.0, &context).unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(MathFunction::Cos.apply(180.0, &context).unwrap(), -1.0, epsilon = 1e-12);
    // Non-trigonometric functions ignore the angle mode.
    assert_abs_diff_eq!(MathFunction::Sqrt.apply(16.0, &context).unwrap(), 4.0);
  }

  #[test]
  fn test_log_base() {
    let context = EvalContext::default();
    assert_abs_diff_eq!(MathFunction::Log.apply(1000.0, &context).unwrap(), 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(MathFunction::Ln.apply(E, &context).unwrap(), 1.0, epsilon = 1e-12);

    let context = EvalContext { log_base: LogBase::Natural, ..EvalContext::default() };
    assert_abs_diff_eq!(MathFunction::Log.apply(E, &context).unwrap(), 1.0, epsilon = 1e-12);
  }

  #[test]
  fn test_domain_errors() {
    let context = EvalContext::default();
    assert!(matches!(MathFunction::Sqrt.apply(-1.0, &context), Err(EvalError::DomainError { function: MathFunction::Sqrt, .. })));
    assert!(matches!(MathFunction::Ln.apply(0.0, &context), Err(EvalError::DomainError { .. })));
    assert!(matches!(MathFunction::Log.apply(-2.0, &context), Err(EvalError::DomainError { .. })));
    assert_abs_diff_eq!(MathFunction::Sqrt.apply(0.0, &context).unwrap(), 0.0);
  }
}
