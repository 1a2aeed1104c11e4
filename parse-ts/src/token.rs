use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use serde::Serialize;

/// Token types.
///
/// `EOF` marks the end of source; `Invalid` marks unlexable input. Both exist
/// so peeking never needs `Option`/`Result` handling at every call site.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  EOF,
  Invalid,

  Ampersand,
  AmpersandAmpersand,
  AmpersandAmpersandEquals,
  AmpersandEquals,
  Asterisk,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  AsteriskEquals,
  At,
  Bar,
  BarBar,
  BarBarEquals,
  BarEquals,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  Caret,
  CaretEquals,
  ChevronLeft,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronLeftEquals,
  ChevronLeftSlash,
  ChevronRight,
  ChevronRightChevronRight,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  ChevronRightChevronRightEquals,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  ParenthesisClose,
  ParenthesisOpen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  PrivateMember,
  Question,
  QuestionDot,
  QuestionQuestion,
  QuestionQuestionEquals,
  Semicolon,
  Slash,
  SlashEquals,
  Tilde,

  Identifier,
  JsxTextContent,
  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  LiteralTemplatePartString,
  LiteralTemplatePartStringEnd,
  LiteralTrue,

  KeywordAbstract,
  KeywordAny,
  KeywordAs,
  KeywordAsserts,
  KeywordAsync,
  KeywordAwait,
  KeywordBigIntType,
  KeywordBooleanType,
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordConstructor,
  KeywordContinue,
  KeywordDebugger,
  KeywordDeclare,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFinally,
  KeywordFor,
  KeywordFrom,
  KeywordFunction,
  KeywordGet,
  KeywordIf,
  KeywordImplements,
  KeywordImport,
  KeywordIn,
  KeywordInfer,
  KeywordInstanceof,
  KeywordInterface,
  KeywordIs,
  KeywordKeyof,
  KeywordLet,
  KeywordModule,
  KeywordNamespace,
  KeywordNever,
  KeywordNew,
  KeywordNumberType,
  KeywordObjectType,
  KeywordOf,
  KeywordOut,
  KeywordOverride,
  KeywordPrivate,
  KeywordProtected,
  KeywordPublic,
  KeywordReadonly,
  KeywordReturn,
  KeywordSatisfies,
  KeywordSet,
  KeywordStatic,
  KeywordStringType,
  KeywordSuper,
  KeywordSwitch,
  KeywordSymbolType,
  KeywordThis,
  KeywordThrow,
  KeywordTry,
  KeywordType,
  KeywordTypeof,
  KeywordUndefinedType,
  KeywordUnique,
  KeywordUnknown,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
  KeywordYield,
}

impl TT {
  /// Keywords that TypeScript treats as contextual: they remain valid
  /// identifier, property, and parameter names.
  pub fn is_unreserved_keyword(self) -> bool {
    matches!(
      self,
      TT::KeywordAbstract
        | TT::KeywordAny
        | TT::KeywordAs
        | TT::KeywordAsserts
        | TT::KeywordAsync
        | TT::KeywordBigIntType
        | TT::KeywordBooleanType
        | TT::KeywordConstructor
        | TT::KeywordDeclare
        | TT::KeywordFrom
        | TT::KeywordGet
        | TT::KeywordImplements
        | TT::KeywordInfer
        | TT::KeywordInterface
        | TT::KeywordIs
        | TT::KeywordKeyof
        | TT::KeywordLet
        | TT::KeywordModule
        | TT::KeywordNamespace
        | TT::KeywordNever
        | TT::KeywordNumberType
        | TT::KeywordObjectType
        | TT::KeywordOf
        | TT::KeywordOut
        | TT::KeywordOverride
        | TT::KeywordPrivate
        | TT::KeywordProtected
        | TT::KeywordPublic
        | TT::KeywordReadonly
        | TT::KeywordSatisfies
        | TT::KeywordSet
        | TT::KeywordStatic
        | TT::KeywordStringType
        | TT::KeywordSymbolType
        | TT::KeywordType
        | TT::KeywordUndefinedType
        | TT::KeywordUnique
        | TT::KeywordUnknown
    )
  }

  /// Whether this token can begin a property/member name position.
  pub fn is_name_like(self) -> bool {
    self == TT::Identifier || self.is_keyword()
  }

  pub fn is_keyword(self) -> bool {
    matches!(
      self,
      TT::KeywordAbstract
        | TT::KeywordAny
        | TT::KeywordAs
        | TT::KeywordAsserts
        | TT::KeywordAsync
        | TT::KeywordAwait
        | TT::KeywordBigIntType
        | TT::KeywordBooleanType
        | TT::KeywordBreak
        | TT::KeywordCase
        | TT::KeywordCatch
        | TT::KeywordClass
        | TT::KeywordConst
        | TT::KeywordConstructor
        | TT::KeywordContinue
        | TT::KeywordDebugger
        | TT::KeywordDeclare
        | TT::KeywordDefault
        | TT::KeywordDelete
        | TT::KeywordDo
        | TT::KeywordElse
        | TT::KeywordEnum
        | TT::KeywordExport
        | TT::KeywordExtends
        | TT::KeywordFinally
        | TT::KeywordFor
        | TT::KeywordFrom
        | TT::KeywordFunction
        | TT::KeywordGet
        | TT::KeywordIf
        | TT::KeywordImplements
        | TT::KeywordImport
        | TT::KeywordIn
        | TT::KeywordInfer
        | TT::KeywordInstanceof
        | TT::KeywordInterface
        | TT::KeywordIs
        | TT::KeywordKeyof
        | TT::KeywordLet
        | TT::KeywordModule
        | TT::KeywordNamespace
        | TT::KeywordNever
        | TT::KeywordNew
        | TT::KeywordNumberType
        | TT::KeywordObjectType
        | TT::KeywordOf
        | TT::KeywordOut
        | TT::KeywordOverride
        | TT::KeywordPrivate
        | TT::KeywordProtected
        | TT::KeywordPublic
        | TT::KeywordReadonly
        | TT::KeywordReturn
        | TT::KeywordSatisfies
        | TT::KeywordSet
        | TT::KeywordStatic
        | TT::KeywordStringType
        | TT::KeywordSuper
        | TT::KeywordSwitch
        | TT::KeywordSymbolType
        | TT::KeywordThis
        | TT::KeywordThrow
        | TT::KeywordTry
        | TT::KeywordType
        | TT::KeywordTypeof
        | TT::KeywordUndefinedType
        | TT::KeywordUnique
        | TT::KeywordUnknown
        | TT::KeywordVar
        | TT::KeywordVoid
        | TT::KeywordWhile
        | TT::KeywordYield
        | TT::LiteralFalse
        | TT::LiteralNull
        | TT::LiteralTrue
    )
  }
}

#[derive(Clone, Copy, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether one or more whitespace characters appear immediately before this
  // token, and at least one of those is a line terminator.
  pub preceded_by_line_terminator: bool,
  // Range of the `/** ... */` comment block immediately preceding this token,
  // if any. Declarations pick this up as their documentation.
  pub doc_comment: Option<Loc>,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
