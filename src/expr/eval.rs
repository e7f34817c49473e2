
//! Tree-walking evaluation of [`Expr`] at a point.

use super::{Expr, BinaryOp};
use super::function::MathFunction;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Unit in which trigonometric functions read their argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
  #[default]
  Radians,
  Degrees,
}

/// Base of the `log` function. `ln` is always the natural logarithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogBase {
  #[default]
  Ten,
  Natural,
}

/// Settings which change the meaning of an expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalContext {
  pub angle_mode: AngleMode,
  pub log_base: LogBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum EvalError {
  #[error("{function} is undefined at {arg}")]
  DomainError { function: MathFunction, arg: f64 },
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Result is not a finite number")]
  NonFinite,
  #[error("Expected {expected} argument(s) to {function}, got {actual}")]
  WrongArity { function: MathFunction, expected: usize, actual: usize },
  #[error("Expression did not compile")]
  NotCompiled,
}

impl Expr {
  /// Evaluates the expression with `x` bound to the given value.
  ///
  /// Every intermediate result is checked, so the `Ok` value is
  /// always finite.
  pub fn eval(&self, x: f64, context: &EvalContext) -> Result<f64, EvalError> {
    let value = match self {
      Expr::Number(n) => *n,
      Expr::Var => x,
      Expr::Constant(c) => c.value(),
      Expr::Negate(inner) => -(inner.eval(x, context)?),
      Expr::BinaryOp(op, left, right) => {
        let left = left.eval(x, context)?;
        let right = right.eval(x, context)?;
        apply_binary_op(*op, left, right)?
      }
      Expr::Call(function, args) => {
        let [arg] = args.as_slice() else {
          return Err(EvalError::WrongArity { function: *function, expected: function.arity(), actual: args.len() });
        };
        function.apply(arg.eval(x, context)?, context)?
      }
    };
    check_finite(value)
  }
}

fn apply_binary_op(op: BinaryOp, left: f64, right: f64) -> Result<f64, EvalError> {
  match op {
    BinaryOp::Add => Ok(left + right),
    BinaryOp::Sub => Ok(left - right),
    BinaryOp::Mul => Ok(left * right),
    BinaryOp::Div => {
      if right == 0.0 {
        Err(EvalError::DivisionByZero)
      } else {
        Ok(left / right)
      }
    }
    BinaryOp::Pow => Ok(left.powf(right)),
  }
}

fn check_finite(value: f64) -> Result<f64, EvalError> {
  if value.is_finite() {
    Ok(value)
  } else {
    Err(EvalError::NonFinite)
  }
}
