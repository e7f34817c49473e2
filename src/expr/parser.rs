
//! Parser for the school-algebra dialect.

use super::{Expr, BinaryOp, Constant};
use super::function::MathFunction;
use super::normalizer::ExpressionNormalizer;
use super::tokenizer::{TokenData, TokenizerError};
use crate::parsing::shunting_yard::{self, ShuntingYardDriver, ShuntingYardError, Token};
use crate::parsing::operator::{OperatorTable, InfixProperties, PrefixProperties};
use crate::parsing::source::Span;

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug)]
pub struct ExprParser<'a> {
  normalizer: ExpressionNormalizer<'a>,
}

/// Driver which builds [`Expr`] values, resolving every name against
/// the whitelist as it goes.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ExprShuntingYardDriver {}

/// The operands handed to the shunting yard algorithm. Names are
/// resolved by the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarToken {
  Number(f64),
  Identifier(String),
}

/// A name or operator the evaluator does not support.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum ResolveError {
  #[error("Unknown identifier '{name}' at {span}")]
  UnknownIdentifier { name: String, span: Span },
  #[error("Unknown function '{name}' at {span}")]
  UnknownFunction { name: String, span: Span },
  #[error("Expected {expected} argument(s) to {function} at {span}, got {actual}")]
  WrongArity { function: MathFunction, expected: usize, actual: usize, span: Span },
  #[error("Unsupported operator '{0}'")]
  UnsupportedOperator(String),
}

#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
  #[error("{0}")]
  TokenizerError(#[from] TokenizerError),
  #[error("{0}")]
  SyntaxError(ShuntingYardError<ScalarToken, ResolveError>),
  #[error("{0}")]
  ResolveError(#[from] ResolveError),
}

impl<'a> ExprParser<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    Self {
      normalizer: ExpressionNormalizer::new(operator_table),
    }
  }

  pub fn normalizer(&self) -> &ExpressionNormalizer<'a> {
    &self.normalizer
  }

  pub fn parse(&self, source: &str) -> Result<Expr, ParseError> {
    let normalized = self.normalizer.normalize(source)?;
    let tokens = normalized.into_tokens().into_iter().map(|token| {
      let span = token.span;
      match token.data {
        TokenData::Number(n) => Token::scalar(ScalarToken::Number(n), span),
        TokenData::Identifier(name) => Token::scalar(ScalarToken::Identifier(name), span),
        TokenData::Operator(op) => Token::operator(op, span),
        TokenData::FunctionCallStart(name) => Token::function_call_start(name, span),
        TokenData::LeftParen => Token::left_paren(span),
        TokenData::RightParen => Token::right_paren(span),
        TokenData::Comma => Token::comma(span),
      }
    });
    let mut driver = ExprShuntingYardDriver::new();
    shunting_yard::parse(&mut driver, tokens).map_err(|err| match err {
      ShuntingYardError::CustomError(err) => ParseError::ResolveError(err),
      err => ParseError::SyntaxError(err),
    })
  }
}

impl ExprShuntingYardDriver {
  pub fn new() -> Self {
    Self {}
  }
}

impl ShuntingYardDriver<ScalarToken> for ExprShuntingYardDriver {
  type Output = Expr;
  type Error = ResolveError;

  fn compile_scalar(&mut self, scalar: ScalarToken, span: Span) -> Result<Expr, ResolveError> {
    match scalar {
      ScalarToken::Number(n) => Ok(Expr::Number(n)),
      ScalarToken::Identifier(name) => {
        if name == "x" {
          Ok(Expr::Var)
        } else if let Some(constant) = Constant::from_name(&name) {
          Ok(Expr::Constant(constant))
        } else {
          Err(ResolveError::UnknownIdentifier { name, span })
        }
      }
    }
  }

  fn compile_infix_op(&mut self, left: Expr, infix: &InfixProperties, right: Expr) -> Result<Expr, ResolveError> {
    let op = BinaryOp::from_infix_name(infix.function_name())
      .ok_or_else(|| ResolveError::UnsupportedOperator(infix.function_name().to_owned()))?;
    Ok(Expr::binary(op, left, right))
  }

  fn compile_prefix_op(&mut self, prefix: &PrefixProperties, right: Expr) -> Result<Expr, ResolveError> {
    match prefix.function_name() {
      "negate" => Ok(Expr::negate(right)),
      "identity" => Ok(right),
      name => Err(ResolveError::UnsupportedOperator(name.to_owned())),
    }
  }

  fn compile_function_call(&mut self, name: &str, args: Vec<Expr>, span: Span) -> Result<Expr, ResolveError> {
    let function = MathFunction::from_name(name)
      .ok_or_else(|| ResolveError::UnknownFunction { name: name.to_owned(), span })?;
    if args.len() != function.arity() {
      return Err(ResolveError::WrongArity { function, expected: function.arity(), actual: args.len(), span });
    }
    Ok(Expr::call(function, args))
  }
}

impl Display for ScalarToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ScalarToken::Number(n) => write!(f, "{n}"),
      ScalarToken::Identifier(name) => write!(f, "{name}"),
    }
  }
}
