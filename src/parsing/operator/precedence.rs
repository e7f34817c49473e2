
/// The precedence of an operator. Higher values bind more tightly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(u64);

impl Precedence {
  /// Stored as ten times the input value.
  ///
  /// Use [`from_raw`](Precedence::from_raw) to bypass the
  /// multiplication and construct a `Precedence` value directly.
  pub const fn new(n: u64) -> Precedence {
    Precedence(n * 10)
  }

  pub const fn from_raw(n: u64) -> Precedence {
    Precedence(n)
  }
}

impl From<u64> for Precedence {
  fn from(n: u64) -> Precedence {
    Precedence::new(n)
  }
}
