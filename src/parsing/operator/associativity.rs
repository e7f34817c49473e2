
/// The associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Associativity {
  left_assoc: bool,
}

impl Associativity {
  /// Indicates an operator which associates to the left, so that
  /// `a - b - c` means `(a - b) - c`.
  pub const LEFT: Associativity = Associativity { left_assoc: true };
  /// Indicates an operator which associates to the right, so that
  /// `a ^ b ^ c` means `a ^ (b ^ c)`.
  pub const RIGHT: Associativity = Associativity { left_assoc: false };

  pub const fn is_left_assoc(self) -> bool {
    self.left_assoc
  }

  pub const fn is_right_assoc(self) -> bool {
    !self.left_assoc
  }
}
