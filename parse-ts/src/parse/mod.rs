use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod class;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod jsx;
pub mod stmt;
pub mod ts_decl;
pub mod type_expr;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    self.matched.then_some(self.loc)
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

/// Buffering parser over the lexer. Tokens are lexed on demand and kept so
/// checkpoints can rewind cheaply; a mode mismatch on re-read discards the
/// stale suffix and re-lexes.
pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
}

impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    self.lexer.str(loc)
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = self
      .buf
      .get(checkpoint.next_tok_i)
      .map(|t| t.token.loc.0)
      .unwrap_or(self.lexer.next());
    let end = if self.next_tok_i == 0 {
      start
    } else {
      self.buf[self.next_tok_i - 1].token.loc.1
    };
    Loc(start, end.max(start))
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    if self
      .buf
      .get(self.next_tok_i)
      .is_some_and(|t| t.lex_mode != mode)
    {
      self.reset_to(self.next_tok_i);
    }
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    }
    let t = self.buf[self.next_tok_i].token;
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    }
    (k, t)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  /// Consumes the next token regardless of type and returns its raw source.
  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_n<const N: usize>(&mut self) -> [Token; N] {
    let cp = self.checkpoint();
    let mut tokens = [self.peek(); N];
    for slot in tokens.iter_mut() {
      *slot = self.forward(LexMode::Standard, |_| true).1;
    }
    self.restore_checkpoint(cp);
    tokens
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.forward(LexMode::Standard, |t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn consume_if_pred<F: FnOnce(&Token) -> bool>(&mut self, pred: F) -> MaybeToken {
    let (matched, t) = self.forward(LexMode::Standard, pred);
    MaybeToken {
      typ: t.typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// Require and consume an identifier (or contextual keyword usable as one),
  /// returning its string value.
  pub fn require_binding_name(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    if t.typ == TT::Identifier || t.typ.is_unreserved_keyword() {
      return Ok(self.string(t.loc));
    }
    Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")))
  }

  /// Require any name-like token (identifier or keyword), for member-name
  /// positions where every keyword is legal.
  pub fn require_name(&mut self) -> SyntaxResult<String> {
    let t = self.consume();
    if t.typ.is_name_like() {
      return Ok(self.string(t.loc));
    }
    Err(t.error(SyntaxErrorType::ExpectedSyntax("name")))
  }

  /// Consume a `;` if present. The grammar this parser accepts treats
  /// semicolons as optional wherever automatic semicolon insertion could
  /// apply.
  pub fn semi(&mut self) {
    let _ = self.consume_if(TT::Semicolon);
  }

  /// Decoded value of a string literal token.
  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    Ok(decode_str_literal(self.str(t.loc)))
  }

  /// Raw text of a doc comment attached to a token, if any.
  pub fn doc_text(&self, token: &Token) -> Option<String> {
    token.doc_comment.map(|loc| self.string(loc))
  }

  /// Require a `>`, splitting `>>`, `>>>`, `>=` etc. so nested generics like
  /// `Map<string, Array<T>>` close correctly.
  pub fn require_chevron_right(&mut self) -> SyntaxResult<Token> {
    let t = self.peek();
    let (split, remainder_typ): (bool, TT) = match t.typ {
      TT::ChevronRight => {
        return Ok(self.consume());
      }
      TT::ChevronRightEquals => (true, TT::Equals),
      TT::ChevronRightChevronRight => (true, TT::ChevronRight),
      TT::ChevronRightChevronRightEquals => (true, TT::ChevronRightEquals),
      TT::ChevronRightChevronRightChevronRight => (true, TT::ChevronRightChevronRight),
      TT::ChevronRightChevronRightChevronRightEquals => {
        (true, TT::ChevronRightChevronRightEquals)
      }
      _ => (false, TT::ChevronRight),
    };
    if !split {
      return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::ChevronRight)));
    }
    self.consume();
    let remainder = Token {
      typ: remainder_typ,
      loc: Loc(t.loc.0 + 1, t.loc.1),
      preceded_by_line_terminator: false,
      doc_comment: None,
    };
    self.buf.insert(self.next_tok_i, BufferedToken {
      token: remainder,
      lex_mode: LexMode::Standard,
    });
    Ok(Token {
      typ: TT::ChevronRight,
      loc: Loc(t.loc.0, t.loc.0 + 1),
      preceded_by_line_terminator: t.preceded_by_line_terminator,
      doc_comment: t.doc_comment,
    })
  }

  /// Best-effort range from `start` to the current position, ending before
  /// the next unconsumed token.
  pub(crate) fn wrap_loc(&mut self, start: Loc) -> Loc {
    let end = self.peek().loc.0;
    Loc(start.0, end.max(start.1))
  }

  /// Runs the closure, restoring the pre-call position if it returns `None`.
  pub fn rewindable<S, F>(&mut self, f: F) -> SyntaxResult<Option<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Option<S>>,
  {
    let checkpoint = self.checkpoint();
    let stx = f(self)?;
    if stx.is_none() {
      self.restore_checkpoint(checkpoint);
    }
    Ok(stx)
  }

  /// Runs the closure, turning any syntax error into a rewind.
  pub fn try_parse<S, F>(&mut self, f: F) -> Option<S>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let checkpoint = self.checkpoint();
    match f(self) {
      Ok(stx) => Some(stx),
      Err(_) => {
        self.restore_checkpoint(checkpoint);
        None
      }
    }
  }
}

/// Strips quotes and resolves the common escape sequences of a string
/// literal.
pub fn decode_str_literal(raw: &str) -> String {
  let inner = if raw.len() >= 2 {
    &raw[1..raw.len() - 1]
  } else {
    raw
  };
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some('r') => out.push('\r'),
      Some('0') => out.push('\0'),
      Some('b') => out.push('\u{8}'),
      Some('f') => out.push('\u{c}'),
      Some('v') => out.push('\u{b}'),
      Some('x') => {
        let hex: String = chars.by_ref().take(2).collect();
        if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          out.push(c);
        }
      }
      Some('u') => {
        let mut rest = chars.clone();
        if rest.next() == Some('{') {
          let hex: String = rest.by_ref().take_while(|&c| c != '}').collect();
          if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            out.push(c);
          }
          chars = rest;
        } else {
          let hex: String = chars.by_ref().take(4).collect();
          if let Some(c) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            out.push(c);
          }
        }
      }
      Some('\n') => {}
      Some(other) => out.push(other),
      None => {}
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parser(source: &str) -> Parser<'_> {
    Parser::new(Lexer::new(source))
  }

  #[test]
  fn consume_if_only_advances_on_match() {
    let mut p = parser("a b");
    assert!(!p.consume_if(TT::Comma).is_match());
    assert_eq!(p.consume().typ, TT::Identifier);
  }

  #[test]
  fn checkpoints_rewind() {
    let mut p = parser("a b c");
    let cp = p.checkpoint();
    p.consume();
    p.consume();
    p.restore_checkpoint(cp);
    let loc = p.consume().loc;
    assert_eq!(p.string(loc), "a");
  }

  #[test]
  fn chevron_splitting() {
    let mut p = parser("A<B<C>> x");
    assert_eq!(p.consume().typ, TT::Identifier);
    assert_eq!(p.consume().typ, TT::ChevronLeft);
    assert_eq!(p.consume().typ, TT::Identifier);
    assert_eq!(p.consume().typ, TT::ChevronLeft);
    assert_eq!(p.consume().typ, TT::Identifier);
    assert!(p.require_chevron_right().is_ok());
    assert!(p.require_chevron_right().is_ok());
    assert_eq!(p.consume().typ, TT::Identifier);
  }

  #[test]
  fn decodes_string_literals() {
    assert_eq!(decode_str_literal(r#""a\nb""#), "a\nb");
    assert_eq!(decode_str_literal(r"'A'"), "A");
    assert_eq!(decode_str_literal(r"'\u{1F600}'"), "\u{1F600}");
    assert_eq!(decode_str_literal(r"'\q'"), "q");
  }
}
