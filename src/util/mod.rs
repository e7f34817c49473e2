
//! Various utility functions.

pub mod angles;
pub mod point;

use regex::{Regex, escape};

use std::cmp::Reverse;

/// Constructs a regex which matches any string in `options`. Applies
/// the function `helper` to the resulting regex string before
/// compilation. If the result of `helper` is not a valid regular
/// expression, this function will panic.
pub fn regex_opt_with<'a, I, F>(options: I, helper: F) -> Regex
where I : IntoIterator<Item = &'a str>,
      F : FnOnce(String) -> String {
  // Put longer elements first, so we always match the longest thing
  // we can.
  let mut options: Vec<_> = options.into_iter().collect();
  options.sort_by_key(|a| Reverse(a.len()));

  let regex_str = options.into_iter().map(escape).collect::<Vec<_>>().join("|");
  let regex_str = helper(format!("(?:{regex_str})"));
  Regex::new(&regex_str).unwrap_or_else(|_| {
    panic!("Invalid regular expression: {}", regex_str);
  })
}

pub fn clamp<T: PartialOrd>(val: T, min: T, max: T) -> T {
  if val < min { min } else if val > max { max } else { val }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_regex_opt_with_longest_match() {
    let re = regex_opt_with(["*", "**", "+"], |s| format!("^{s}"));
    assert_eq!(re.find("**2").unwrap().as_str(), "**");
    assert_eq!(re.find("*2").unwrap().as_str(), "*");
    assert!(re.find("x*2").is_none());
  }

  #[test]
  fn test_clamp() {
    assert_eq!(clamp(5, 0, 10), 5);
    assert_eq!(clamp(-5, 0, 10), 0);
    assert_eq!(clamp(15, 0, 10), 10);
    assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
  }
}
