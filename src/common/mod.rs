//! Common utilities shared across the caplint codebase.
//!
//! Key components:
//! - **Source files**: raw text with byte/character range conversion
//! - **Source locations**: 1-based line and column positions for reporting
//! - **Text utilities**: character-counted whitespace and word helpers

pub mod source_file;
pub mod source_location;
pub mod text;

pub use source_file::{ByteRange, CharRange, SourceFile};
pub use source_location::Location;
pub use text::{last_word, leading_whitespace_chars};
