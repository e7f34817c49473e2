
use crate::expr::parser::ParseError;
use crate::graphics::interval::IntervalError;
use crate::graphics::mapper::GeometryError;

use thiserror::Error;

/// Errors surfaced by the fallible entry points: parameter loading and
/// strict diagram building. The lenient pipeline recovers from all of
/// these instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("Invalid diagram parameters: {0}")]
  ParamsError(#[from] serde_json::Error),
  #[error("Invalid expression: {0}")]
  ParseError(#[from] ParseError),
  #[error("Invalid domain or range: {0}")]
  IntervalError(#[from] IntervalError),
  #[error("Invalid canvas: {0}")]
  GeometryError(#[from] GeometryError),
}
