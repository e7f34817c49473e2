
//! Degree and radian newtypes, for trigonometric functions whose
//! input unit is chosen by the plot settings.

use num::{FromPrimitive, Float};
use num::traits::FloatConst;

use std::ops::{Mul, Div};

/// A number representing degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees<T>(pub T);

/// A number representing radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians<T>(pub T);

impl<T> Degrees<T> {
  pub fn into_radians(self) -> Radians<T>
  where T: FloatConst + Mul<Output=T> + Div<Output=T> + FromPrimitive {
    // unwrap: 180 is representable in every float type.
    Radians(self.0 * T::PI() / T::from_i32(180).unwrap())
  }
}

impl<T: Float> Radians<T> {
  pub fn cos(self) -> T {
    self.0.cos()
  }

  pub fn sin(self) -> T {
    self.0.sin()
  }

  pub fn tan(self) -> T {
    self.0.tan()
  }
}
