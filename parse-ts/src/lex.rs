use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use memchr::memchr;
use memchr::memchr2;
use once_cell::sync::Lazy;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  JsxTextContent,
  SlashIsRegex,
  Standard,
  TemplateStrContinue,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

pub static KEYWORDS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, TT>::new();
  map.insert("abstract", TT::KeywordAbstract);
  map.insert("any", TT::KeywordAny);
  map.insert("as", TT::KeywordAs);
  map.insert("asserts", TT::KeywordAsserts);
  map.insert("async", TT::KeywordAsync);
  map.insert("await", TT::KeywordAwait);
  map.insert("bigint", TT::KeywordBigIntType);
  map.insert("boolean", TT::KeywordBooleanType);
  map.insert("break", TT::KeywordBreak);
  map.insert("case", TT::KeywordCase);
  map.insert("catch", TT::KeywordCatch);
  map.insert("class", TT::KeywordClass);
  map.insert("const", TT::KeywordConst);
  map.insert("constructor", TT::KeywordConstructor);
  map.insert("continue", TT::KeywordContinue);
  map.insert("debugger", TT::KeywordDebugger);
  map.insert("declare", TT::KeywordDeclare);
  map.insert("default", TT::KeywordDefault);
  map.insert("delete", TT::KeywordDelete);
  map.insert("do", TT::KeywordDo);
  map.insert("else", TT::KeywordElse);
  map.insert("enum", TT::KeywordEnum);
  map.insert("export", TT::KeywordExport);
  map.insert("extends", TT::KeywordExtends);
  map.insert("false", TT::LiteralFalse);
  map.insert("finally", TT::KeywordFinally);
  map.insert("for", TT::KeywordFor);
  map.insert("from", TT::KeywordFrom);
  map.insert("function", TT::KeywordFunction);
  map.insert("get", TT::KeywordGet);
  map.insert("if", TT::KeywordIf);
  map.insert("implements", TT::KeywordImplements);
  map.insert("import", TT::KeywordImport);
  map.insert("in", TT::KeywordIn);
  map.insert("infer", TT::KeywordInfer);
  map.insert("instanceof", TT::KeywordInstanceof);
  map.insert("interface", TT::KeywordInterface);
  map.insert("is", TT::KeywordIs);
  map.insert("keyof", TT::KeywordKeyof);
  map.insert("let", TT::KeywordLet);
  map.insert("module", TT::KeywordModule);
  map.insert("namespace", TT::KeywordNamespace);
  map.insert("never", TT::KeywordNever);
  map.insert("new", TT::KeywordNew);
  map.insert("null", TT::LiteralNull);
  map.insert("number", TT::KeywordNumberType);
  map.insert("object", TT::KeywordObjectType);
  map.insert("of", TT::KeywordOf);
  map.insert("out", TT::KeywordOut);
  map.insert("override", TT::KeywordOverride);
  map.insert("private", TT::KeywordPrivate);
  map.insert("protected", TT::KeywordProtected);
  map.insert("public", TT::KeywordPublic);
  map.insert("readonly", TT::KeywordReadonly);
  map.insert("return", TT::KeywordReturn);
  map.insert("satisfies", TT::KeywordSatisfies);
  map.insert("set", TT::KeywordSet);
  map.insert("static", TT::KeywordStatic);
  map.insert("string", TT::KeywordStringType);
  map.insert("super", TT::KeywordSuper);
  map.insert("switch", TT::KeywordSwitch);
  map.insert("symbol", TT::KeywordSymbolType);
  map.insert("this", TT::KeywordThis);
  map.insert("throw", TT::KeywordThrow);
  map.insert("true", TT::LiteralTrue);
  map.insert("try", TT::KeywordTry);
  map.insert("type", TT::KeywordType);
  map.insert("typeof", TT::KeywordTypeof);
  map.insert("undefined", TT::KeywordUndefinedType);
  map.insert("unique", TT::KeywordUnique);
  map.insert("unknown", TT::KeywordUnknown);
  map.insert("var", TT::KeywordVar);
  map.insert("void", TT::KeywordVoid);
  map.insert("while", TT::KeywordWhile);
  map.insert("yield", TT::KeywordYield);
  map
});

fn is_id_start(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_' || c == '$' || !c.is_ascii()
}

fn is_id_continue(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.source[loc.0..loc.1]
  }

  fn at_end(&self) -> bool {
    self.next >= self.source.len()
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn peek_char(&self, n: usize) -> Option<char> {
    self.rest().chars().nth(n)
  }

  fn starts_with(&self, s: &str) -> bool {
    self.rest().starts_with(s)
  }

  fn skip(&mut self, n: usize) {
    self.next += n;
  }

  fn skip_char(&mut self) -> Option<char> {
    let c = self.peek_char(0)?;
    self.next += c.len_utf8();
    Some(c)
  }

  fn skip_while(&mut self, f: impl Fn(char) -> bool) {
    for c in self.source[self.next..].chars() {
      if !f(c) {
        break;
      }
      self.next += c.len_utf8();
    }
  }

  /// Advance past a byte for `b` or to the end of source.
  fn skip_through_byte_or_end(&mut self, b: u8) {
    match memchr(b, self.rest().as_bytes()) {
      Some(pos) => self.next += pos + 1,
      None => self.next = self.source.len(),
    }
  }
}

/// Skips whitespace and comments. Returns `(preceded_by_line_terminator,
/// doc_comment)` where `doc_comment` is the range of the last `/** */` block
/// seen, if any.
fn skip_insignificant(lexer: &mut Lexer<'_>) -> (bool, Option<Loc>) {
  let mut preceded_by_line_terminator = false;
  let mut doc_comment = None;
  loop {
    match lexer.peek_char(0) {
      Some(c) if c.is_whitespace() => {
        if c == '\n' || c == '\r' || c == '\u{2028}' || c == '\u{2029}' {
          preceded_by_line_terminator = true;
        }
        lexer.skip(c.len_utf8());
      }
      Some('/') if lexer.starts_with("//") => {
        lexer.skip_through_byte_or_end(b'\n');
        preceded_by_line_terminator = true;
      }
      Some('/') if lexer.starts_with("/*") => {
        let start = lexer.next();
        let is_doc = lexer.starts_with("/**") && !lexer.starts_with("/**/");
        lexer.skip(2);
        loop {
          match memchr2(b'*', b'\n', lexer.rest().as_bytes()) {
            Some(pos) => {
              if lexer.rest().as_bytes()[pos] == b'\n' {
                preceded_by_line_terminator = true;
                lexer.skip(pos + 1);
              } else if lexer.rest().as_bytes().get(pos + 1) == Some(&b'/') {
                lexer.skip(pos + 2);
                break;
              } else {
                lexer.skip(pos + 1);
              }
            }
            None => {
              // Unterminated comment: consume the rest of the source.
              lexer.next = lexer.source.len();
              break;
            }
          }
        }
        if is_doc {
          doc_comment = Some(Loc(start, lexer.next()));
        }
      }
      _ => break,
    }
  }
  (preceded_by_line_terminator, doc_comment)
}

fn lex_identifier_or_keyword(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next();
  lexer.skip_char();
  lexer.skip_while(is_id_continue);
  let text = lexer.str(Loc(start, lexer.next()));
  KEYWORDS.get(text).copied().unwrap_or(TT::Identifier)
}

fn lex_number(lexer: &mut Lexer<'_>) -> TT {
  if lexer.starts_with("0x") || lexer.starts_with("0X") {
    lexer.skip(2);
    lexer.skip_while(|c| c.is_ascii_hexdigit() || c == '_');
  } else if lexer.starts_with("0b") || lexer.starts_with("0B") {
    lexer.skip(2);
    lexer.skip_while(|c| c == '0' || c == '1' || c == '_');
  } else if lexer.starts_with("0o") || lexer.starts_with("0O") {
    lexer.skip(2);
    lexer.skip_while(|c| ('0'..='7').contains(&c) || c == '_');
  } else {
    lexer.skip_while(|c| c.is_ascii_digit() || c == '_');
    if lexer.peek_char(0) == Some('.') && lexer.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
      lexer.skip(1);
      lexer.skip_while(|c| c.is_ascii_digit() || c == '_');
    }
    if matches!(lexer.peek_char(0), Some('e') | Some('E')) {
      let mut ahead = 1;
      if matches!(lexer.peek_char(1), Some('+') | Some('-')) {
        ahead = 2;
      }
      if lexer.peek_char(ahead).is_some_and(|c| c.is_ascii_digit()) {
        lexer.skip(ahead);
        lexer.skip_while(|c| c.is_ascii_digit());
      }
    }
  }
  if lexer.peek_char(0) == Some('n') {
    lexer.skip(1);
    return TT::LiteralBigInt;
  }
  TT::LiteralNumber
}

fn lex_string(lexer: &mut Lexer<'_>) -> TT {
  let quote = lexer.skip_char().unwrap();
  loop {
    match lexer.skip_char() {
      None => return TT::Invalid,
      Some('\\') => {
        lexer.skip_char();
      }
      Some(c) if c == quote => return TT::LiteralString,
      Some('\n') => return TT::Invalid,
      Some(_) => {}
    }
  }
}

/// Lexes a template string part up to `${` or the closing backtick. The
/// opening backtick (or the `}` closing a substitution) must already have
/// been consumed.
fn lex_template_continue(lexer: &mut Lexer<'_>) -> TT {
  loop {
    match lexer.skip_char() {
      None => return TT::Invalid,
      Some('\\') => {
        lexer.skip_char();
      }
      Some('`') => return TT::LiteralTemplatePartStringEnd,
      Some('$') if lexer.peek_char(0) == Some('{') => {
        lexer.skip(1);
        return TT::LiteralTemplatePartString;
      }
      Some(_) => {}
    }
  }
}

fn lex_regex(lexer: &mut Lexer<'_>) -> TT {
  // Consume the leading slash.
  lexer.skip(1);
  let mut in_charset = false;
  loop {
    match lexer.skip_char() {
      None | Some('\n') => return TT::Invalid,
      Some('\\') => {
        lexer.skip_char();
      }
      Some('[') => in_charset = true,
      Some(']') if in_charset => in_charset = false,
      Some('/') if !in_charset => break,
      Some(_) => {}
    }
  }
  lexer.skip_while(is_id_continue);
  TT::LiteralRegex
}

fn lex_operator(lexer: &mut Lexer<'_>) -> TT {
  // Ordered longest-first within each leading character.
  static TABLE: &[(&str, TT)] = &[
    (">>>=", TT::ChevronRightChevronRightChevronRightEquals),
    (">>>", TT::ChevronRightChevronRightChevronRight),
    (">>=", TT::ChevronRightChevronRightEquals),
    ("<<=", TT::ChevronLeftChevronLeftEquals),
    ("===", TT::EqualsEqualsEquals),
    ("!==", TT::ExclamationEqualsEquals),
    ("**=", TT::AsteriskAsteriskEquals),
    ("&&=", TT::AmpersandAmpersandEquals),
    ("||=", TT::BarBarEquals),
    ("??=", TT::QuestionQuestionEquals),
    ("...", TT::DotDotDot),
    (">>", TT::ChevronRightChevronRight),
    ("<<", TT::ChevronLeftChevronLeft),
    (">=", TT::ChevronRightEquals),
    ("<=", TT::ChevronLeftEquals),
    ("==", TT::EqualsEquals),
    ("!=", TT::ExclamationEquals),
    ("=>", TT::EqualsChevronRight),
    ("**", TT::AsteriskAsterisk),
    ("*=", TT::AsteriskEquals),
    ("/=", TT::SlashEquals),
    ("%=", TT::PercentEquals),
    ("+=", TT::PlusEquals),
    ("-=", TT::HyphenEquals),
    ("&=", TT::AmpersandEquals),
    ("|=", TT::BarEquals),
    ("^=", TT::CaretEquals),
    ("&&", TT::AmpersandAmpersand),
    ("||", TT::BarBar),
    ("??", TT::QuestionQuestion),
    ("?.", TT::QuestionDot),
    ("++", TT::PlusPlus),
    ("--", TT::HyphenHyphen),
    ("</", TT::ChevronLeftSlash),
    ("&", TT::Ampersand),
    ("*", TT::Asterisk),
    ("@", TT::At),
    ("|", TT::Bar),
    ("}", TT::BraceClose),
    ("{", TT::BraceOpen),
    ("]", TT::BracketClose),
    ("[", TT::BracketOpen),
    ("^", TT::Caret),
    ("<", TT::ChevronLeft),
    (">", TT::ChevronRight),
    (":", TT::Colon),
    (",", TT::Comma),
    (".", TT::Dot),
    ("=", TT::Equals),
    ("!", TT::Exclamation),
    ("-", TT::Hyphen),
    (")", TT::ParenthesisClose),
    ("(", TT::ParenthesisOpen),
    ("%", TT::Percent),
    ("+", TT::Plus),
    ("?", TT::Question),
    (";", TT::Semicolon),
    ("/", TT::Slash),
    ("~", TT::Tilde),
  ];
  for (pat, tt) in TABLE {
    if lexer.starts_with(pat) {
      // `?.3` is a conditional followed by a number literal, not `?.`.
      if *tt == TT::QuestionDot && lexer.peek_char(2).is_some_and(|c| c.is_ascii_digit()) {
        lexer.skip(1);
        return TT::Question;
      }
      lexer.skip(pat.len());
      return *tt;
    }
  }
  lexer.skip_char();
  TT::Invalid
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  if mode == LexMode::JsxTextContent {
    let start = lexer.next();
    lexer.skip_while(|c| c != '{' && c != '<');
    return Token {
      loc: Loc(start, lexer.next()),
      typ: TT::JsxTextContent,
      preceded_by_line_terminator: false,
      doc_comment: None,
    };
  }

  if mode == LexMode::TemplateStrContinue {
    let start = lexer.next();
    let typ = lex_template_continue(lexer);
    return Token {
      loc: Loc(start, lexer.next()),
      typ,
      preceded_by_line_terminator: false,
      doc_comment: None,
    };
  }

  let (preceded_by_line_terminator, doc_comment) = skip_insignificant(lexer);

  if lexer.at_end() {
    let end = lexer.source_range().1;
    return Token {
      loc: Loc(end, end),
      typ: TT::EOF,
      preceded_by_line_terminator,
      doc_comment,
    };
  }

  let start = lexer.next();
  let c = lexer.peek_char(0).unwrap();
  let typ = if is_id_start(c) {
    lex_identifier_or_keyword(lexer)
  } else if c.is_ascii_digit()
    || (c == '.' && lexer.peek_char(1).is_some_and(|c| c.is_ascii_digit()))
  {
    lex_number(lexer)
  } else if c == '"' || c == '\'' {
    lex_string(lexer)
  } else if c == '`' {
    lexer.skip(1);
    lex_template_continue(lexer)
  } else if c == '#' {
    // Private member: `#name`. The `#` is part of the identifier token.
    lexer.skip(1);
    lexer.skip_while(is_id_continue);
    TT::PrivateMember
  } else if c == '/' && mode == LexMode::SlashIsRegex && !lexer.starts_with("//") {
    lex_regex(lexer)
  } else {
    lex_operator(lexer)
  };

  Token {
    loc: Loc(start, lexer.next()),
    typ,
    preceded_by_line_terminator,
    doc_comment,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn toks(source: &str) -> Vec<(TT, &str)> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
      let t = lex_next(&mut lexer, LexMode::Standard);
      if t.typ == TT::EOF {
        break;
      }
      out.push((t.typ, &source[t.loc.0..t.loc.1]));
    }
    out
  }

  #[test]
  fn lexes_keywords_and_identifiers() {
    assert_eq!(toks("interface Foo"), vec![
      (TT::KeywordInterface, "interface"),
      (TT::Identifier, "Foo"),
    ]);
  }

  #[test]
  fn contextual_keywords_are_distinct_tokens() {
    assert_eq!(toks("type as from")[0].0, TT::KeywordType);
    assert_eq!(toks("type as from")[1].0, TT::KeywordAs);
    assert_eq!(toks("type as from")[2].0, TT::KeywordFrom);
  }

  #[test]
  fn lexes_numbers() {
    assert_eq!(toks("1 2.5 0x1F 10n 1e3"), vec![
      (TT::LiteralNumber, "1"),
      (TT::LiteralNumber, "2.5"),
      (TT::LiteralNumber, "0x1F"),
      (TT::LiteralBigInt, "10n"),
      (TT::LiteralNumber, "1e3"),
    ]);
  }

  #[test]
  fn lexes_strings_with_escapes() {
    assert_eq!(toks(r#"'a\'b' "c""#), vec![
      (TT::LiteralString, r"'a\'b'"),
      (TT::LiteralString, "\"c\""),
    ]);
  }

  #[test]
  fn longest_operator_wins() {
    assert_eq!(
      toks("=> === >= ...").iter().map(|t| t.0).collect::<Vec<_>>(),
      vec![
        TT::EqualsChevronRight,
        TT::EqualsEqualsEquals,
        TT::ChevronRightEquals,
        TT::DotDotDot
      ]
    );
  }

  #[test]
  fn template_parts() {
    let mut lexer = Lexer::new("`a${x}b`");
    let head = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(head.typ, TT::LiteralTemplatePartString);
    let x = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(x.typ, TT::Identifier);
    let close = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(close.typ, TT::BraceClose);
    let tail = lex_next(&mut lexer, LexMode::TemplateStrContinue);
    assert_eq!(tail.typ, TT::LiteralTemplatePartStringEnd);
  }

  #[test]
  fn doc_comment_attaches_to_next_token() {
    let source = "/** Doc. */\ninterface A {}";
    let mut lexer = Lexer::new(source);
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, TT::KeywordInterface);
    let doc = t.doc_comment.expect("doc comment");
    assert_eq!(&source[doc.0..doc.1], "/** Doc. */");
    assert!(t.preceded_by_line_terminator);
  }

  #[test]
  fn plain_block_comment_is_not_doc() {
    let mut lexer = Lexer::new("/* x */ let a");
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert!(t.doc_comment.is_none());
  }

  #[test]
  fn line_terminator_tracking() {
    let mut lexer = Lexer::new("a\nb c");
    assert!(!lex_next(&mut lexer, LexMode::Standard).preceded_by_line_terminator);
    assert!(lex_next(&mut lexer, LexMode::Standard).preceded_by_line_terminator);
    assert!(!lex_next(&mut lexer, LexMode::Standard).preceded_by_line_terminator);
  }

  #[test]
  fn jsx_text_mode_stops_at_braces_and_tags() {
    let mut lexer = Lexer::new("hello {x}</div>");
    let t = lex_next(&mut lexer, LexMode::JsxTextContent);
    assert_eq!(t.typ, TT::JsxTextContent);
    assert_eq!(&"hello {x}</div>"[t.loc.0..t.loc.1], "hello ");
  }

  #[test]
  fn regex_mode() {
    let mut lexer = Lexer::new("/ab[/]c/g");
    let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
    assert_eq!(t.typ, TT::LiteralRegex);
    assert_eq!(t.loc, Loc(0, 9));
  }
}
