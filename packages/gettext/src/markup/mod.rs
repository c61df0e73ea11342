//! Markup Module
//!
//! Tolerant parser for the pseudo-HTML tags translators put into messages
//! (`<b>`, `<link>...</link>`, `<br/>`).

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;

pub use ast::{Element, Node, Text};
pub use lexer::tokenize;
pub use parser::{parse, parse_with_diagnostics, ParseTreeResult, TreeWarning, TreeWarningKind};
pub use tokens::{SourceSpan, Token, TokenType};
