
use bitflags::bitflags;

bitflags! {
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
  pub struct FunctionFlags: u32 {
    /// Functions with this flag take an angle as their argument. In
    /// degrees mode, the argument is converted to radians before the
    /// function is applied.
    const TAKES_ANGLE = 0b0001;
    /// Functions with this flag are undefined for negative arguments.
    const NONNEGATIVE_DOMAIN = 0b0010;
    /// Functions with this flag are undefined for arguments less than
    /// or equal to zero.
    const POSITIVE_DOMAIN = 0b0100;
  }
}

impl FunctionFlags {
  /// Whether `arg` lies in the domain described by these flags.
  pub fn admits(self, arg: f64) -> bool {
    if self.contains(FunctionFlags::POSITIVE_DOMAIN) && arg <= 0.0 {
      return false;
    }
    if self.contains(FunctionFlags::NONNEGATIVE_DOMAIN) && arg < 0.0 {
      return false;
    }
    true
  }
}
