
//! Expressions in the school-algebra dialect: tokenizing,
//! normalization, parsing, and evaluation.

pub mod compiled;
pub mod eval;
pub mod function;
pub mod normalizer;
pub mod parser;
pub mod tokenizer;

use function::MathFunction;

use std::fmt::{self, Display, Formatter};

/// An expression in the single variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  /// The free variable `x`.
  Var,
  Constant(Constant),
  Negate(Box<Expr>),
  BinaryOp(BinaryOp, Box<Expr>, Box<Expr>),
  Call(MathFunction, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
  Pi,
  E,
}

impl Expr {
  /// Convenience constructor for [`Expr::BinaryOp`].
  pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp(op, Box::new(left), Box::new(right))
  }

  /// Convenience constructor for [`Expr::Negate`].
  pub fn negate(inner: Expr) -> Expr {
    Expr::Negate(Box::new(inner))
  }

  /// Convenience constructor for [`Expr::Call`].
  pub fn call(function: MathFunction, args: Vec<Expr>) -> Expr {
    Expr::Call(function, args)
  }
}

impl BinaryOp {
  /// Looks up the operator bound to the given infix function name in
  /// the operator table.
  pub fn from_infix_name(name: &str) -> Option<BinaryOp> {
    match name {
      "plus" => Some(BinaryOp::Add),
      "minus" => Some(BinaryOp::Sub),
      "times" => Some(BinaryOp::Mul),
      "divide" => Some(BinaryOp::Div),
      "power" => Some(BinaryOp::Pow),
      _ => None,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Pow => "^",
    }
  }
}

impl Constant {
  pub fn from_name(name: &str) -> Option<Constant> {
    match name {
      "pi" => Some(Constant::Pi),
      "e" => Some(Constant::E),
      _ => None,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Constant::Pi => "pi",
      Constant::E => "e",
    }
  }

  pub fn value(self) -> f64 {
    match self {
      Constant::Pi => std::f64::consts::PI,
      Constant::E => std::f64::consts::E,
    }
  }
}

impl From<f64> for Expr {
  fn from(n: f64) -> Expr {
    Expr::Number(n)
  }
}

impl From<Constant> for Expr {
  fn from(c: Constant) -> Expr {
    Expr::Constant(c)
  }
}

/// Fully parenthesized output, so that the tree structure is visible.
impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(n) => write!(f, "{n}"),
      Expr::Var => write!(f, "x"),
      Expr::Constant(c) => write!(f, "{}", c.name()),
      Expr::Negate(inner) => write!(f, "-({inner})"),
      Expr::BinaryOp(op, left, right) => write!(f, "({left} {} {right})", op.symbol()),
      Expr::Call(function, args) => {
        write!(f, "{function}(")?;
        for (i, arg) in args.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{arg}")?;
        }
        write!(f, ")")
      }
    }
  }
}
