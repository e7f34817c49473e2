
/// An `ErrorList<E>` collects recoverable errors, such as the samples a
/// curve could not be evaluated at, so that the caller can inspect
/// what went wrong after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorList<E> {
  errors: Vec<E>,
}

impl<E> ErrorList<E> {
  /// A new, empty error list.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, error: E) {
    self.errors.push(error)
  }

  /// Records the error of `result`, if any, and converts it into an
  /// `Option`.
  pub fn ok<T, E1>(&mut self, result: Result<T, E1>) -> Option<T>
  where E: From<E1> {
    match result {
      Ok(x) => Some(x),
      Err(err) => {
        self.push(err.into());
        None
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, E> {
    self.errors.iter()
  }

  pub fn into_vec(self) -> Vec<E> {
    self.errors
  }
}

impl<E> IntoIterator for ErrorList<E> {
  type Item = E;
  type IntoIter = ::std::vec::IntoIter<E>;

  fn into_iter(self) -> Self::IntoIter {
    self.errors.into_iter()
  }
}

impl<'a, E> IntoIterator for &'a ErrorList<E> {
  type Item = &'a E;
  type IntoIter = std::slice::Iter<'a, E>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<E> Default for ErrorList<E> {
  fn default() -> Self {
    Self { errors: Vec::new() }
  }
}

impl<E> FromIterator<E> for ErrorList<E> {
  fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
    Self { errors: iter.into_iter().collect() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::eval::EvalError;

  #[test]
  fn test_ok_records_errors() {
    let mut errors: ErrorList<EvalError> = ErrorList::new();
    assert_eq!(errors.ok(Ok::<f64, EvalError>(1.0)), Some(1.0));
    assert!(errors.is_empty());
    assert_eq!(errors.ok(Err::<f64, _>(EvalError::DivisionByZero)), None);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.into_vec(), vec![EvalError::DivisionByZero]);
  }

  #[test]
  fn test_iteration_order() {
    let errors: ErrorList<i32> = vec![3, 1, 2].into_iter().collect();
    assert_eq!(errors.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    assert_eq!((&errors).into_iter().count(), 3);
    assert_eq!(errors.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
  }
}
