use crate::loc::Loc;
use crate::token::TT;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

/// Stable classification of syntax errors produced by the parser.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedNotFound,
  ExpectedSyntax(&'static str),
  JsxClosingTagMismatch,
  MalformedLiteral,
  RequiredTokenNotFound(TT),
  UnexpectedEnd,
  UnterminatedComment,
  UnterminatedString,
}

impl SyntaxErrorType {
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedNotFound => "expected token not found".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {expected}"),
      SyntaxErrorType::JsxClosingTagMismatch => {
        "JSX closing tag does not match opening tag".into()
      }
      SyntaxErrorType::MalformedLiteral => "malformed literal".into(),
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {token:?}"),
      SyntaxErrorType::UnexpectedEnd => actual_token
        .map(|tok| format!("unexpected end before {tok:?}"))
        .unwrap_or_else(|| "unexpected end of input".into()),
      SyntaxErrorType::UnterminatedComment => "unterminated comment".into(),
      SyntaxErrorType::UnterminatedString => "unterminated string literal".into(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} [token={:?}]",
      self.typ.message(self.actual_token),
      self.actual_token
    )
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
