
//! Operator-precedence parsing, via Dijkstra's shunting yard
//! algorithm, extended with prefix operators, parenthesized groups,
//! and function calls.

use super::operator::{Operator, PrefixProperties, InfixProperties, FixityType};
use super::source::Span;

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// Deepest output tree `parse` will build. Consumers walk the output
/// recursively, so unbounded nesting would exhaust the stack.
pub const MAX_DEPTH: usize = 256;

/// A token, for the purposes of the shunting yard algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
  data: TokenData<T>,
  span: Span,
}

/// Internal type which tracks an output value together with the first
/// token that produced it. Used to produce better error messages.
#[derive(Debug, Clone)]
struct OutputWithToken<T, O> {
  output: O,
  token: Token<T>,
  depth: usize,
}

#[derive(Clone, Debug)]
struct OpStackValue {
  operator: Operator,
  resolved: ResolvedOperator,
  span: Span,
}

#[derive(Clone, Debug)]
enum ResolvedOperator {
  Prefix(PrefixProperties),
  Infix(InfixProperties),
}

#[derive(Clone, Debug)]
enum StackEntry {
  Operator(OpStackValue),
  LeftParen(Span),
  /// An open function call. `first_arg` is the height of the output
  /// stack when the call was opened; everything above it is an
  /// argument.
  FunctionCall { name: String, span: Span, first_arg: usize },
}

/// The contents of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenData<T> {
  /// A value in the target language.
  Scalar(T),
  /// An operator. Whether it is used as a prefix or an infix operator
  /// is decided by its position.
  Operator(Operator),
  /// A function name immediately followed by an opening parenthesis.
  FunctionCallStart(String),
  LeftParen,
  RightParen,
  Comma,
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ShuntingYardError<T, E: StdError> {
  CustomError(E),
  UnexpectedEOF,
  UnexpectedToken(Token<T>),
  UnclosedParen(Span),
  TooDeep(Span),
}

/// A type implementing this trait is capable of driving the shunting
/// yard algorithm and compiling tokens to a given target language.
pub trait ShuntingYardDriver<T> {
  type Output;
  type Error: StdError;

  fn compile_scalar(&mut self, scalar: T, span: Span) -> Result<Self::Output, Self::Error>;
  fn compile_infix_op(
    &mut self,
    left: Self::Output,
    infix: &InfixProperties,
    right: Self::Output,
  ) -> Result<Self::Output, Self::Error>;
  fn compile_prefix_op(
    &mut self,
    prefix: &PrefixProperties,
    right: Self::Output,
  ) -> Result<Self::Output, Self::Error>;
  fn compile_function_call(
    &mut self,
    name: &str,
    args: Vec<Self::Output>,
    span: Span,
  ) -> Result<Self::Output, Self::Error>;
}

impl<T> Token<T> {
  pub fn scalar(data: T, span: Span) -> Self {
    Self { data: TokenData::Scalar(data), span }
  }

  pub fn operator(op: Operator, span: Span) -> Self {
    Self { data: TokenData::Operator(op), span }
  }

  pub fn function_call_start(name: impl Into<String>, span: Span) -> Self {
    Self { data: TokenData::FunctionCallStart(name.into()), span }
  }

  pub fn left_paren(span: Span) -> Self {
    Self { data: TokenData::LeftParen, span }
  }

  pub fn right_paren(span: Span) -> Self {
    Self { data: TokenData::RightParen, span }
  }

  pub fn comma(span: Span) -> Self {
    Self { data: TokenData::Comma, span }
  }

  pub fn span(&self) -> Span {
    self.span
  }
}

impl ResolvedOperator {
  fn precedence(&self) -> super::operator::Precedence {
    match self {
      ResolvedOperator::Prefix(p) => p.precedence(),
      ResolvedOperator::Infix(i) => i.precedence(),
    }
  }

  fn fixity_type(&self) -> FixityType {
    match self {
      ResolvedOperator::Prefix(_) => FixityType::Prefix,
      ResolvedOperator::Infix(_) => FixityType::Infix,
    }
  }
}

impl<T: Display> Display for TokenData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    match self {
      TokenData::Scalar(s) => s.fmt(f),
      TokenData::Operator(op) => op.operator_name().fmt(f),
      TokenData::FunctionCallStart(name) => write!(f, "{name}("),
      TokenData::LeftParen => write!(f, "("),
      TokenData::RightParen => write!(f, ")"),
      TokenData::Comma => write!(f, ","),
    }
  }
}

impl<T: Display> Display for Token<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    write!(f, "{}", self.data)
  }
}

impl<T: Display, E: StdError> Display for ShuntingYardError<T, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    match self {
      ShuntingYardError::CustomError(e) =>
        write!(f, "{}", e),
      ShuntingYardError::UnexpectedEOF =>
        write!(f, "unexpected end of expression"),
      ShuntingYardError::UnexpectedToken(t) =>
        write!(f, "unexpected token {} at position {}", t.data, t.span),
      ShuntingYardError::UnclosedParen(span) =>
        write!(f, "unclosed parenthesis at position {}", span),
      ShuntingYardError::TooDeep(span) =>
        write!(f, "expression nested too deeply at position {}", span),
    }
  }
}

impl<T, E> StdError for ShuntingYardError<T, E>
where T: Display + fmt::Debug,
      E: StdError + 'static {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match self {
      ShuntingYardError::CustomError(e) => Some(e),
      ShuntingYardError::UnexpectedEOF => None,
      ShuntingYardError::UnexpectedToken(_) => None,
      ShuntingYardError::UnclosedParen(_) => None,
      ShuntingYardError::TooDeep(_) => None,
    }
  }
}

impl<T, E: StdError> From<E> for ShuntingYardError<T, E> {
  fn from(e: E) -> Self {
    Self::CustomError(e)
  }
}

pub fn parse<T, D, I>(
  driver: &mut D,
  input: I
) -> Result<D::Output, ShuntingYardError<T, D::Error>>
where T: Clone,
      D: ShuntingYardDriver<T>,
      I: IntoIterator<Item = Token<T>> {
  let mut operator_stack: Vec<StackEntry> = Vec::new();
  let mut output_stack: Vec<OutputWithToken<T, D::Output>> = Vec::new();
  // True at the start of the input and after any operator, opening
  // parenthesis, or comma.
  let mut expecting_operand = true;

  for token in input {
    let span = token.span;
    match token.data {
      TokenData::Scalar(t) => {
        if !expecting_operand {
          return Err(ShuntingYardError::UnexpectedToken(Token::scalar(t, span)));
        }
        let output = driver.compile_scalar(t.clone(), span)?;
        output_stack.push(OutputWithToken { output, token: Token::scalar(t, span), depth: 1 });
        expecting_operand = false;
      }
      TokenData::Operator(op) => {
        if expecting_operand {
          let Some(prefix) = op.fixity().as_prefix().cloned() else {
            return Err(ShuntingYardError::UnexpectedToken(Token::operator(op, span)));
          };
          // Prefix operators have no left operand, so nothing on the
          // stack can be reduced yet.
          operator_stack.push(StackEntry::Operator(OpStackValue {
            operator: op,
            resolved: ResolvedOperator::Prefix(prefix),
            span,
          }));
        } else {
          let Some(infix) = op.fixity().as_infix().cloned() else {
            return Err(ShuntingYardError::UnexpectedToken(Token::operator(op, span)));
          };
          // Pop operators until we hit one which binds less tightly.
          while let Some(StackEntry::Operator(top)) = operator_stack.last() {
            if !should_reduce(&top.resolved, &infix) {
              break;
            }
            if let Some(StackEntry::Operator(top)) = operator_stack.pop() {
              simplify_operator(driver, &mut output_stack, top)?;
            }
          }
          operator_stack.push(StackEntry::Operator(OpStackValue {
            operator: op,
            resolved: ResolvedOperator::Infix(infix),
            span,
          }));
          expecting_operand = true;
        }
      }
      TokenData::LeftParen => {
        if !expecting_operand {
          return Err(ShuntingYardError::UnexpectedToken(Token::left_paren(span)));
        }
        operator_stack.push(StackEntry::LeftParen(span));
      }
      TokenData::FunctionCallStart(name) => {
        if !expecting_operand {
          return Err(ShuntingYardError::UnexpectedToken(Token::function_call_start(name, span)));
        }
        operator_stack.push(StackEntry::FunctionCall { name, span, first_arg: output_stack.len() });
      }
      TokenData::Comma => {
        if expecting_operand {
          return Err(ShuntingYardError::UnexpectedToken(Token::comma(span)));
        }
        reduce_to_group(driver, &mut output_stack, &mut operator_stack)?;
        if !matches!(operator_stack.last(), Some(StackEntry::FunctionCall { .. })) {
          return Err(ShuntingYardError::UnexpectedToken(Token::comma(span)));
        }
        expecting_operand = true;
      }
      TokenData::RightParen => {
        if expecting_operand {
          // Only legal as the end of an empty argument list, as in `f()`.
          let is_empty_call = matches!(
            operator_stack.last(),
            Some(StackEntry::FunctionCall { first_arg, .. }) if *first_arg == output_stack.len()
          );
          if !is_empty_call {
            return Err(ShuntingYardError::UnexpectedToken(Token::right_paren(span)));
          }
        } else {
          reduce_to_group(driver, &mut output_stack, &mut operator_stack)?;
        }
        match operator_stack.pop() {
          Some(StackEntry::LeftParen(_)) => {}
          Some(StackEntry::FunctionCall { name, span: call_span, first_arg }) => {
            let args = output_stack.split_off(first_arg);
            let depth = nested_depth(args.iter().map(|arg| arg.depth).max().unwrap_or(0), call_span)?;
            let args = args.into_iter().map(|arg| arg.output).collect();
            let output = driver.compile_function_call(&name, args, call_span.merge(span))?;
            output_stack.push(OutputWithToken { output, token: Token::function_call_start(name, call_span), depth });
          }
          _ => {
            return Err(ShuntingYardError::UnexpectedToken(Token::right_paren(span)));
          }
        }
        expecting_operand = false;
      }
    }
  }

  if expecting_operand {
    return Err(ShuntingYardError::UnexpectedEOF);
  }

  // Pop and resolve remaining operators.
  while let Some(entry) = operator_stack.pop() {
    match entry {
      StackEntry::Operator(stack_value) => simplify_operator(driver, &mut output_stack, stack_value)?,
      StackEntry::LeftParen(span) | StackEntry::FunctionCall { span, .. } =>
        return Err(ShuntingYardError::UnclosedParen(span)),
    }
  }

  let final_result = output_stack.pop().ok_or(ShuntingYardError::UnexpectedEOF)?;
  if let Some(remaining_value) = output_stack.pop() {
    return Err(ShuntingYardError::UnexpectedToken(remaining_value.token));
  }
  Ok(final_result.output)
}

/// Depth of a node whose deepest child has depth `child_depth`.
fn nested_depth<T, E: StdError>(child_depth: usize, span: Span) -> Result<usize, ShuntingYardError<T, E>> {
  let depth = child_depth + 1;
  if depth > MAX_DEPTH {
    return Err(ShuntingYardError::TooDeep(span));
  }
  Ok(depth)
}

/// Whether the operator on top of the stack should be applied before
/// pushing the incoming infix operator `current`.
fn should_reduce(stack_op: &ResolvedOperator, current: &InfixProperties) -> bool {
  let stack_prec = stack_op.precedence();
  let current_prec = current.precedence();
  match stack_op.fixity_type() {
    FixityType::Prefix => stack_prec >= current_prec,
    FixityType::Infix =>
      stack_prec > current_prec ||
        (stack_prec == current_prec && current.associativity().is_left_assoc()),
  }
}

/// Reduces operators until the innermost open parenthesis or function
/// call is on top of the stack. The group itself is left in place.
fn reduce_to_group<T, D>(
  driver: &mut D,
  output_stack: &mut Vec<OutputWithToken<T, D::Output>>,
  operator_stack: &mut Vec<StackEntry>,
) -> Result<(), ShuntingYardError<T, D::Error>>
where T: Clone,
      D: ShuntingYardDriver<T> {
  while let Some(StackEntry::Operator(_)) = operator_stack.last() {
    if let Some(StackEntry::Operator(stack_value)) = operator_stack.pop() {
      simplify_operator(driver, output_stack, stack_value)?;
    }
  }
  Ok(())
}

fn simplify_operator<T, D>(
  driver: &mut D,
  output_stack: &mut Vec<OutputWithToken<T, D::Output>>,
  stack_value: OpStackValue,
) -> Result<(), ShuntingYardError<T, D::Error>>
where T: Clone,
      D: ShuntingYardDriver<T> {
  let missing_operand = || ShuntingYardError::UnexpectedToken(Token::operator(stack_value.operator.clone(), stack_value.span));
  match &stack_value.resolved {
    ResolvedOperator::Infix(infix) => {
      let (arg1, arg2) = output_stack.pop()
        .and_then(|arg2| output_stack.pop().map(|arg1| (arg1, arg2)))
        .ok_or_else(missing_operand)?;
      let depth = nested_depth(arg1.depth.max(arg2.depth), stack_value.span)?;
      let output = driver.compile_infix_op(arg1.output, infix, arg2.output)?;
      output_stack.push(OutputWithToken { output, token: arg1.token, depth });
    }
    ResolvedOperator::Prefix(prefix) => {
      let arg = output_stack.pop().ok_or_else(missing_operand)?;
      let depth = nested_depth(arg.depth, stack_value.span)?;
      let output = driver.compile_prefix_op(prefix, arg.output)?;
      let token = Token::operator(stack_value.operator.clone(), stack_value.span);
      output_stack.push(OutputWithToken { output, token, depth });
    }
  }
  Ok(())
}
