
//! Expressions compiled once and evaluated at many points.

use super::Expr;
use super::eval::{EvalContext, EvalError};
use super::parser::{ExprParser, ParseError};
use crate::parsing::operator::OperatorTable;

use once_cell::sync::Lazy;

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

static OPERATOR_TABLE: Lazy<OperatorTable> = Lazy::new(OperatorTable::common_operators);

/// A real function of one real variable, possibly undefined at some
/// points.
pub trait RealFunction {
  /// Evaluates the function at `x`. An `Ok` result is always finite.
  fn try_eval_at(&self, x: f64) -> Result<f64, EvalError>;

  /// The value at `x`, or `None` where the function is undefined.
  fn eval_at(&self, x: f64) -> Option<f64> {
    self.try_eval_at(x).ok()
  }
}

/// A compiled expression. Immutable and cheap to clone; clones share
/// the same parse result.
///
/// An expression which failed to parse still compiles, to a function
/// which is undefined everywhere.
#[derive(Clone)]
pub struct CompiledFunction {
  inner: Arc<CompiledInner>,
}

struct CompiledInner {
  source: String,
  body: Result<Expr, ParseError>,
  context: EvalContext,
}

/// Compiles an expression, logging (and swallowing) any parse error.
pub fn compile(source: &str, context: EvalContext) -> CompiledFunction {
  let body = ExprParser::new(&OPERATOR_TABLE).parse(source);
  if let Err(err) = &body {
    log::warn!("Could not compile expression {:?}: {}", source, err);
  }
  CompiledFunction::from_parts(source, body, context)
}

/// Compiles an expression, reporting parse errors to the caller.
pub fn try_compile(source: &str, context: EvalContext) -> Result<CompiledFunction, ParseError> {
  let body = ExprParser::new(&OPERATOR_TABLE).parse(source)?;
  Ok(CompiledFunction::from_parts(source, Ok(body), context))
}

impl CompiledFunction {
  fn from_parts(source: &str, body: Result<Expr, ParseError>, context: EvalContext) -> Self {
    Self {
      inner: Arc::new(CompiledInner { source: source.to_owned(), body, context }),
    }
  }

  /// The expression string this function was compiled from.
  pub fn source(&self) -> &str {
    &self.inner.source
  }

  pub fn context(&self) -> &EvalContext {
    &self.inner.context
  }

  pub fn expr(&self) -> Option<&Expr> {
    self.inner.body.as_ref().ok()
  }

  pub fn parse_error(&self) -> Option<&ParseError> {
    self.inner.body.as_ref().err()
  }

  pub fn is_valid(&self) -> bool {
    self.inner.body.is_ok()
  }
}

impl RealFunction for CompiledFunction {
  fn try_eval_at(&self, x: f64) -> Result<f64, EvalError> {
    match &self.inner.body {
      Ok(expr) => expr.eval(x, &self.inner.context),
      Err(_) => Err(EvalError::NotCompiled),
    }
  }
}

impl<F> RealFunction for F
where F: Fn(f64) -> f64 {
  fn try_eval_at(&self, x: f64) -> Result<f64, EvalError> {
    let y = self(x);
    if y.is_finite() { Ok(y) } else { Err(EvalError::NonFinite) }
  }
}

impl Debug for CompiledFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompiledFunction")
      .field("source", &self.inner.source)
      .field("valid", &self.is_valid())
      .finish()
  }
}
