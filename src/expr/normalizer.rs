
//! Rewrites the human-friendly algebra dialect into an explicit token
//! sequence: typographic aliases become ASCII, juxtaposition becomes
//! multiplication, and names that are not functions stop looking like
//! calls.
//!
//! The normalizer does not validate. Unbalanced parentheses and
//! unknown names pass through and are rejected by the parser.

use super::function::MathFunction;
use super::tokenizer::{ExprTokenizer, Token, TokenData, TokenizerError};
use crate::parsing::operator::{Operator, OperatorTable};
use crate::parsing::source::{Span, SourceOffset};
use crate::parsing::tokenizer::TokenizerState;

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// Typographic glyphs and their ASCII spellings.
const UNICODE_ALIASES: [(char, &str); 8] = [
  ('\u{2212}', "-"),  // minus sign
  ('\u{00D7}', "*"),  // multiplication sign
  ('\u{00B7}', "*"),  // middle dot
  ('\u{00F7}', "/"),  // division sign
  ('\u{00B2}', "^2"), // superscript two
  ('\u{00B3}', "^3"), // superscript three
  ('\u{03C0}', " pi "), // greek small letter pi, kept apart from adjacent letters
  ('\u{2009}', " "),  // thin space
];

#[derive(Clone, Debug)]
pub struct ExpressionNormalizer<'a> {
  tokenizer: ExprTokenizer<'a>,
  implicit_times: Option<Operator>,
}

/// The canonical token form of an expression. Displays as a string
/// in which every implicit construct has been made explicit.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedExpr {
  source: String,
  tokens: Vec<Token>,
}

impl<'a> ExpressionNormalizer<'a> {
  /// A normalizer for the given operator table. Juxtaposition is read
  /// as the table's `times` operator; if the table has none, adjacent
  /// operands are left alone.
  pub fn new(operator_table: &'a OperatorTable) -> Self {
    Self {
      tokenizer: ExprTokenizer::new(operator_table),
      implicit_times: operator_table.get_by_infix_name("times").cloned(),
    }
  }

  pub fn normalize(&self, source: &str) -> Result<NormalizedExpr, TokenizerError> {
    let source = replace_aliases(source);
    let mut state = TokenizerState::new(&source);
    let raw_tokens = self.tokenizer.read_tokens(&mut state)?;

    let mut tokens: Vec<Token> = Vec::with_capacity(raw_tokens.len() * 2);
    for token in raw_tokens.into_iter().flat_map(split_non_function_call) {
      let juxtaposed = tokens.last().is_some_and(|prev| prev.data.ends_operand()) && token.data.begins_operand();
      if let (true, Some(times)) = (juxtaposed, &self.implicit_times) {
        tokens.push(Token::new(TokenData::Operator(times.clone()), Span::empty_at(token.span.start)));
      }
      tokens.push(token);
    }
    Ok(NormalizedExpr { source: source.into_owned(), tokens })
  }
}

impl NormalizedExpr {
  /// The input after the alias pass. Token spans index into this
  /// string.
  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  pub fn into_tokens(self) -> Vec<Token> {
    self.tokens
  }
}

impl Display for NormalizedExpr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    for token in &self.tokens {
      write!(f, "{}", token.data)?;
    }
    Ok(())
  }
}

fn replace_aliases(source: &str) -> Cow<'_, str> {
  if source.is_ascii() {
    return Cow::Borrowed(source);
  }
  let mut result = String::with_capacity(source.len());
  for ch in source.chars() {
    match UNICODE_ALIASES.iter().find(|(glyph, _)| *glyph == ch) {
      Some((_, replacement)) => result.push_str(replacement),
      None => result.push(ch),
    }
  }
  Cow::Owned(result)
}

/// A name followed by `(` is only a call if the name is a known
/// function. Otherwise it is an operand followed by a group, as in
/// `x(x+1)`, and is split into two tokens.
fn split_non_function_call(token: Token) -> Vec<Token> {
  match token.data {
    TokenData::FunctionCallStart(name) if MathFunction::from_name(&name).is_none() => {
      let name_end = token.span.start + name.len();
      let paren_start = SourceOffset(token.span.end.0.saturating_sub(1));
      vec![
        Token::new(TokenData::Identifier(name), Span::new(token.span.start, name_end)),
        Token::new(TokenData::LeftParen, Span::new(paren_start, token.span.end)),
      ]
    }
    data => vec![Token::new(data, token.span)],
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn normalized(source: &str) -> String {
    let table = OperatorTable::common_operators();
    let normalizer = ExpressionNormalizer::new(&table);
    normalizer.normalize(source).unwrap().to_string()
  }

  #[test]
  fn test_explicit_input_is_unchanged() {
    assert_eq!(normalized("x^2+1"), "x^2+1");
    assert_eq!(normalized("3 * x - 2"), "3*x-2");
    assert_eq!(normalized("x**2"), "x**2");
  }

  #[test]
  fn test_number_then_letter() {
    assert_eq!(normalized("3x"), "3*x");
    assert_eq!(normalized("-x^2 + 4x"), "-x^2+4*x");
    assert_eq!(normalized("2pi"), "2*pi");
  }

  #[test]
  fn test_letter_then_number() {
    assert_eq!(normalized("x3"), "x*3");
  }

  #[test]
  fn test_groups() {
    assert_eq!(normalized("2(x+1)"), "2*(x+1)");
    assert_eq!(normalized("(x+1)(x-1)"), "(x+1)*(x-1)");
    assert_eq!(normalized("(x)2"), "(x)*2");
    assert_eq!(normalized("x(x+1)"), "x*(x+1)");
    assert_eq!(normalized("x (x+1)"), "x*(x+1)");
  }

  #[test]
  fn test_function_calls() {
    assert_eq!(normalized("2sin(x)"), "2*sin(x)");
    assert_eq!(normalized("sin(x)cos(x)"), "sin(x)*cos(x)");
    assert_eq!(normalized("sqrt (x)"), "sqrt(x)");
  }

  #[test]
  fn test_unicode_aliases() {
    assert_eq!(normalized("x\u{00B2} \u{2212} 1"), "x^2-1");
    assert_eq!(normalized("2\u{03C0}x"), "2*pi*x");
    assert_eq!(normalized("6 \u{00F7} 2 \u{00D7} x"), "6/2*x");
    assert_eq!(normalized("x\u{00B3}"), "x^3");
    assert_eq!(normalized("\u{03C0}x\u{00B2}"), "pi*x^2");
  }

  #[test]
  fn test_implicit_times_has_empty_span() {
    let table = OperatorTable::common_operators();
    let normalizer = ExpressionNormalizer::new(&table);
    let expr = normalizer.normalize("3x").unwrap();
    let tokens = expr.tokens();
    assert_eq!(tokens.len(), 3);
    assert!(tokens[1].span.is_empty());
    assert_eq!(tokens[1].span.start, SourceOffset(1));
  }

  #[test]
  fn test_split_call_spans() {
    let table = OperatorTable::common_operators();
    let normalizer = ExpressionNormalizer::new(&table);
    let expr = normalizer.normalize("x (1)").unwrap();
    let tokens = expr.tokens();
    assert_eq!(tokens[0], Token::new(TokenData::Identifier("x".to_owned()), Span::new(SourceOffset(0), SourceOffset(1))));
    assert_eq!(tokens[2], Token::new(TokenData::LeftParen, Span::new(SourceOffset(2), SourceOffset(3))));
  }

  #[test]
  fn test_malformed_input_passes_through() {
    assert_eq!(normalized("x +* 2"), "x+*2");
    assert_eq!(normalized("(x"), "(x");
    assert_eq!(normalized("foo"), "foo");
  }

  #[test]
  fn test_tokenizer_errors_surface() {
    let table = OperatorTable::common_operators();
    let normalizer = ExpressionNormalizer::new(&table);
    assert!(normalizer.normalize("x # 2").is_err());
  }
}
