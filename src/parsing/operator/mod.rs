
mod precedence;
mod associativity;
mod fixity;
pub mod table;

pub use precedence::Precedence;
pub use associativity::Associativity;
pub use fixity::{Fixity, FixityType, EmptyFixity, InfixProperties, PrefixProperties};
pub use table::OperatorTable;

/// An operator, as spelled in the input, together with the roles it
/// can play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
  operator_name: String,
  fixity: Fixity,
}

impl Operator {
  /// Constructs a new operator with the given properties.
  pub fn new(name: impl Into<String>, fixity: Fixity) -> Self {
    Operator {
      operator_name: name.into(),
      fixity,
    }
  }

  /// The name of the operator, as typed by the user.
  pub fn operator_name(&self) -> &str {
    &self.operator_name
  }

  pub fn fixity(&self) -> &Fixity {
    &self.fixity
  }
}
