use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Half-open byte range into the source text.
///
/// A location is best-effort: synthesized nodes (e.g. the implicit alias in
/// `export {a}`) reuse the range of the syntax they were derived from.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn extend(self, other: Loc) -> Loc {
    Loc(self.0.min(other.0), self.1.max(other.1))
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}

impl Display for Loc {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.0, self.1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extend_covers_both_ranges() {
    assert_eq!(Loc(3, 5).extend(Loc(10, 12)), Loc(3, 12));
    assert_eq!(Loc(10, 12).extend(Loc(3, 5)), Loc(3, 12));
  }

  #[test]
  fn len_is_zero_for_empty() {
    assert!(Loc(4, 4).is_empty());
    assert_eq!(Loc(4, 4).len(), 0);
    assert_eq!(Loc(4, 9).len(), 5);
  }
}
