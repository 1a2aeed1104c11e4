//! TypeScript/TSX parser for documentation tooling.
//!
//! The grammar covers the declaration surface of TypeScript (imports and
//! exports, interfaces, type aliases, enums, classes, functions, namespaces,
//! ambient declarations) plus the full type-expression grammar, JSX, and
//! enough of the expression/statement grammar to see through function bodies
//! (component detection needs to find `return <Jsx />`). Doc comments
//! (`/** ... */`) are captured by the lexer and attached to the declarations
//! they precede.
//!
//! ```rust
//! use parse_ts::ast::stmt::Stmt;
//!
//! let top = parse_ts::parse("export interface Foo { value: number; }").unwrap();
//! let Stmt::InterfaceDecl(decl) = top.stx.body[0].stx.as_ref() else {
//!   panic!("expected interface");
//! };
//! assert!(decl.stx.export);
//! assert_eq!(decl.stx.name, "Foo");
//! ```

use ast::node::Node;
use ast::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.parse_top_level()
}
