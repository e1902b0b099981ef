//! Swift keyword tables

/// Reserved words and literal keywords reported with [`TokenKind::Keyword`].
///
/// [`TokenKind::Keyword`]: super::TokenKind::Keyword
pub const KEYWORDS: &[&str] = &[
    // declarations
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
    "import", "init", "inout", "internal", "let", "open", "operator", "private",
    "precedencegroup", "protocol", "public", "rethrows", "static", "struct", "subscript",
    "typealias", "var", "actor",
    // statements
    "break", "case", "catch", "continue", "default", "defer", "do", "else", "fallthrough",
    "for", "guard", "if", "in", "repeat", "return", "throw", "switch", "where", "while",
    // expressions and types
    "Any", "as", "await", "false", "is", "nil", "self", "Self", "super", "throws", "true",
    "try", "async", "some", "any", "_",
];

/// Keywords whose body is the next `{` after an arbitrary header.
pub const BODY_KEYWORDS: &[&str] = &[
    "if", "guard", "while", "for", "switch", "catch", "func", "init", "deinit", "subscript",
    "class", "struct", "enum", "extension", "protocol", "actor",
];

/// Words that open a body when written directly before `{`.
pub const IMMEDIATE_BODY_WORDS: &[&str] = &[
    "else", "do", "repeat", "defer", "get", "set", "willSet", "didSet",
];

/// Keywords after which `{` always starts a closure expression.
pub const EXPRESSION_KEYWORDS: &[&str] = &["return", "in", "throw", "try", "await"];

/// Keywords that can stand as the callee of a call or subscript.
pub const CALLEE_KEYWORDS: &[&str] = &["self", "Self", "super", "init"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}
