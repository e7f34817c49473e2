
use crate::parsing::operator::{Operator, OperatorTable};
use crate::parsing::source::{Span, SourceOffset};
use crate::parsing::tokenizer::TokenizerState;
use crate::util::regex_opt_with;

use regex::Regex;
use once_cell::sync::Lazy;
use thiserror::Error;

use std::num::ParseFloatError;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug)]
pub struct ExprTokenizer<'a> {
  operator_table: &'a OperatorTable,
  operator_regex: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub data: TokenData,
  pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenData {
  Number(f64),
  Identifier(String),
  Operator(Operator),
  FunctionCallStart(String),
  LeftParen,
  Comma,
  RightParen,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum TokenizerError {
  #[error("Expected token, but found EOF at {0}")]
  UnexpectedEOF(SourceOffset),
  #[error("Expected token, but found '{0}' at {1}")]
  UnexpectedChar(char, SourceOffset),
  #[error("Failed to parse number")]
  ParseNumberError(#[from] ParseFloatError),
}

impl<'a> ExprTokenizer<'a> {
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    let operator_names = operator_table.iter().map(|op| op.operator_name());
    let operator_regex = regex_opt_with(operator_names, |s| format!("^{s}"));
    Self { operator_table, operator_regex }
  }

  pub fn read_tokens(&self, state: &mut TokenizerState<'_>) -> Result<Vec<Token>, TokenizerError> {
    let start_pos = state.current_pos();
    let mut tokens = Vec::new();
    loop {
      state.consume_spaces();
      match self.read_one_token(state) {
        Ok(token) => {
          tokens.push(token);
        }
        Err(TokenizerError::UnexpectedEOF(_)) => {
          return Ok(tokens);
        }
        Err(err) => {
          state.seek(start_pos);
          return Err(err);
        }
      }
    }
  }

  pub fn read_one_token(&self, state: &mut TokenizerState<'_>) -> Result<Token, TokenizerError> {
    if let Some(tok) = self.read_char_token(state) {
      Ok(tok)
    } else if let Some(tok) = self.read_function_call_token(state) {
      Ok(tok)
    } else if let Some(tok) = self.read_identifier(state) {
      Ok(tok)
    } else if let Some(res) = self.read_number_literal(state) {
      res
    } else if let Some(tok) = self.read_operator(state) {
      Ok(tok)
    } else {
      match state.peek() {
        None => {
          let pos = state.current_pos();
          Err(TokenizerError::UnexpectedEOF(pos))
        }
        Some(ch) => {
          let pos = state.current_pos();
          Err(TokenizerError::UnexpectedChar(ch, pos))
        }
      }
    }
  }

  fn read_char_token(&self, state: &mut TokenizerState<'_>) -> Option<Token> {
    #[allow(clippy::manual_map)] // Cleaner in an if-else chain
    if let Some(m) = state.read_literal("(") {
      Some(Token::new(TokenData::LeftParen, m.span()))
    } else if let Some(m) = state.read_literal(")") {
      Some(Token::new(TokenData::RightParen, m.span()))
    } else if let Some(m) = state.read_literal(",") {
      Some(Token::new(TokenData::Comma, m.span()))
    } else {
      None
    }
  }

  /// A name directly followed by an opening parenthesis. Whether the
  /// name is really a function is decided later; `x(x+1)` is a
  /// product.
  fn read_function_call_token(&self, state: &mut TokenizerState<'_>) -> Option<Token> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-zA-Z]+)\s*\(").unwrap());
    state.read_regex_with_captures(&RE).and_then(|m| {
      let function_name = m.get(1)?;
      Some(Token::new(TokenData::FunctionCallStart(function_name.to_owned()), m.span()))
    })
  }

  /// Identifiers are letters only, so that `x2` reads as `x` followed
  /// by `2`.
  fn read_identifier(&self, state: &mut TokenizerState<'_>) -> Option<Token> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+").unwrap());
    state.read_regex(&RE).map(|m| {
      Token::new(TokenData::Identifier(m.as_str().to_owned()), m.span())
    })
  }

  fn read_operator(&self, state: &mut TokenizerState<'_>) -> Option<Token> {
    let reset_pos = state.current_pos();
    let m = state.read_regex(&self.operator_regex)?;
    match self.operator_table.get_by_display_name(m.as_str()) {
      Some(operator) => Some(Token::new(TokenData::Operator(operator.clone()), m.span())),
      None => {
        state.seek(reset_pos);
        None
      }
    }
  }

  /// Unsigned decimal literals. Signs are prefix operators, so that
  /// `x-2` is a difference rather than `x` next to `-2`.
  fn read_number_literal(&self, state: &mut TokenizerState<'_>) -> Option<Result<Token, TokenizerError>> {
    static RE: Lazy<Regex> = Lazy::new(|| {
      Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
    });
    let reset_pos = state.current_pos();
    let m = state.read_regex(&RE)?;
    match m.as_str().parse::<f64>() {
      Err(err) => {
        state.seek(reset_pos);
        Some(Err(err.into()))
      }
      Ok(number) => {
        Some(Ok(Token::new(TokenData::Number(number), m.span())))
      }
    }
  }
}

impl Token {
  pub fn new(data: TokenData, span: Span) -> Self {
    Self { data, span }
  }
}

impl TokenData {
  /// Whether a token of this kind can end an operand. Used to detect
  /// juxtaposition.
  pub fn ends_operand(&self) -> bool {
    matches!(self, TokenData::Number(_) | TokenData::Identifier(_) | TokenData::RightParen)
  }

  /// Whether a token of this kind can begin an operand.
  pub fn begins_operand(&self) -> bool {
    matches!(
      self,
      TokenData::Number(_) | TokenData::Identifier(_) | TokenData::FunctionCallStart(_) | TokenData::LeftParen,
    )
  }
}

impl Display for TokenData {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Number(n) => write!(f, "{n}"),
      TokenData::Identifier(name) => write!(f, "{name}"),
      TokenData::Operator(op) => write!(f, "{}", op.operator_name()),
      TokenData::FunctionCallStart(name) => write!(f, "{name}("),
      TokenData::LeftParen => write!(f, "("),
      TokenData::Comma => write!(f, ","),
      TokenData::RightParen => write!(f, ")"),
    }
  }
}
