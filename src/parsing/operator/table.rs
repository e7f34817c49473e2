
use super::Operator;
use super::fixity::Fixity;
use super::precedence::Precedence;
use super::associativity::Associativity;

use std::collections::{hash_map, HashMap};

pub const POWER_PRECEDENCE: Precedence = Precedence::new(20);
pub const PREFIX_PRECEDENCE: Precedence = Precedence::new(19);
pub const PRODUCT_PRECEDENCE: Precedence = Precedence::new(18);
pub const SUM_PRECEDENCE: Precedence = Precedence::new(17);

/// A table of operators, indexed by their display name and by their
/// infix function name.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
  by_display_name: HashMap<String, Operator>,
  by_infix_name: HashMap<String, Operator>,
}

impl OperatorTable {
  pub fn new() -> OperatorTable {
    OperatorTable::default()
  }

  pub fn with_capacity(capacity: usize) -> OperatorTable {
    OperatorTable {
      by_display_name: HashMap::with_capacity(capacity),
      by_infix_name: HashMap::with_capacity(capacity),
    }
  }

  pub fn get_by_display_name(&self, name: &str) -> Option<&Operator> {
    self.by_display_name.get(name)
  }

  /// Looks up an operator by the function name of its infix form.
  pub fn get_by_infix_name(&self, name: &str) -> Option<&Operator> {
    self.by_infix_name.get(name)
  }

  pub fn insert(&mut self, op: Operator) {
    if let Some(infix) = op.fixity().as_infix() {
      // First come, first served: `^` wins over `**` as the canonical
      // spelling of "power".
      self.by_infix_name.entry(infix.function_name().to_owned()).or_insert_with(|| op.clone());
    }
    self.by_display_name.insert(op.operator_name().to_owned(), op);
  }

  /// The operators of the school-algebra dialect.
  ///
  /// Prefix minus sits between products and powers, so `-x^2` is
  /// `-(x^2)` while `-x + 1` is `(-x) + 1`.
  pub fn common_operators() -> OperatorTable {
    vec![
      Operator::new("^", Fixity::new().with_infix("power", Associativity::RIGHT, POWER_PRECEDENCE)),
      Operator::new("**", Fixity::new().with_infix("power", Associativity::RIGHT, POWER_PRECEDENCE)),
      Operator::new("*", Fixity::new().with_infix("times", Associativity::LEFT, PRODUCT_PRECEDENCE)),
      Operator::new("/", Fixity::new().with_infix("divide", Associativity::LEFT, PRODUCT_PRECEDENCE)),
      Operator::new(
        "+",
        Fixity::new()
          .with_infix("plus", Associativity::LEFT, SUM_PRECEDENCE)
          .with_prefix("identity", PREFIX_PRECEDENCE),
      ),
      Operator::new(
        "-",
        Fixity::new()
          .with_infix("minus", Associativity::LEFT, SUM_PRECEDENCE)
          .with_prefix("negate", PREFIX_PRECEDENCE),
      ),
    ].into_iter().collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Operator> {
    self.by_display_name.values()
  }
}

impl IntoIterator for OperatorTable {
  type Item = Operator;
  type IntoIter = hash_map::IntoValues<String, Operator>;

  fn into_iter(self) -> Self::IntoIter {
    self.by_display_name.into_values()
  }
}

impl FromIterator<Operator> for OperatorTable {
  fn from_iter<I>(iter: I) -> Self
  where I : IntoIterator<Item = Operator> {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = OperatorTable::with_capacity(len_bound);
    for op in iter {
      table.insert(op);
    }
    table
  }
}
