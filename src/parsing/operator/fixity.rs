//! Fixity declarations for operators.

use super::associativity::Associativity;
use super::precedence::Precedence;

/// An operator can be infix, prefix, or both (`-` is the usual
/// example). An operator will always be at least one of the two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixity {
  as_prefix: Option<PrefixProperties>,
  as_infix: Option<InfixProperties>,
}

/// Properties of an operator in prefix position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixProperties {
  function_name: String,
  prec: Precedence,
}

/// Unlike prefix operators, infix operators have both associativity
/// and precedence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfixProperties {
  function_name: String,
  assoc: Associativity,
  prec: Precedence,
}

/// Which role an operator token was resolved to during parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixityType {
  Prefix,
  Infix,
}

/// The type of an "empty" fixity structure. This is an intermediate
/// type which is only used during building of a [`Fixity`]. It
/// guarantees that a `Fixity` always has at least one valid fixity
/// type.
#[derive(Debug)]
pub struct EmptyFixity {
  data: Fixity,
}

impl Fixity {
  // allow: EmptyFixity is conceptually a Fixity, just with some
  // typechecks. It's intended to be used in a fluent builder style.
  #[allow(clippy::new_ret_no_self)]
  pub fn new() -> EmptyFixity {
    EmptyFixity {
      data: Fixity {
        as_prefix: None,
        as_infix: None,
      },
    }
  }

  pub fn with_prefix(mut self, function_name: impl Into<String>, prec: Precedence) -> Fixity {
    self.as_prefix = Some(PrefixProperties { function_name: function_name.into(), prec });
    self
  }

  pub fn with_infix(mut self, function_name: impl Into<String>, assoc: Associativity, prec: Precedence) -> Fixity {
    self.as_infix = Some(InfixProperties { function_name: function_name.into(), assoc, prec });
    self
  }

  pub fn as_prefix(&self) -> Option<&PrefixProperties> {
    self.as_prefix.as_ref()
  }

  pub fn as_infix(&self) -> Option<&InfixProperties> {
    self.as_infix.as_ref()
  }

  pub fn is_prefix(&self) -> bool {
    self.as_prefix.is_some()
  }

  pub fn is_infix(&self) -> bool {
    self.as_infix.is_some()
  }
}

impl EmptyFixity {
  pub fn with_prefix(self, function_name: impl Into<String>, prec: Precedence) -> Fixity {
    self.data.with_prefix(function_name, prec)
  }

  pub fn with_infix(self, function_name: impl Into<String>, assoc: Associativity, prec: Precedence) -> Fixity {
    self.data.with_infix(function_name, assoc, prec)
  }
}

impl PrefixProperties {
  pub fn function_name(&self) -> &str {
    &self.function_name
  }

  pub fn precedence(&self) -> Precedence {
    self.prec
  }
}

impl InfixProperties {
  pub fn function_name(&self) -> &str {
    &self.function_name
  }

  pub fn associativity(&self) -> Associativity {
    self.assoc
  }

  pub fn precedence(&self) -> Precedence {
    self.prec
  }
}
