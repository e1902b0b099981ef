//! Lexical and structural view of Swift source files.
//!
//! - [`lexer`] turns source text into [`SyntaxToken`]s
//! - [`SyntaxMap`] answers token queries by byte range
//! - [`Structure`] is the expression tree (closures, calls, collections)

pub mod keywords;
pub mod lexer;
pub mod structure;
pub mod token;

pub use lexer::tokenize;
pub use structure::{ExprKind, Structure, StructureNode};
pub use token::{SyntaxMap, SyntaxToken, TokenKind};
