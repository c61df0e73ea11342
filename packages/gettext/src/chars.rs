//! Character constants and classification helpers for the plural-forms lexer
//! and the markup scanner.

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const NEWLINE: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const RETURN: char = '\r';
pub const SPACE: char = ' ';

pub const BANG: char = '!';
pub const PERCENT: char = '%';
pub const AMPERSAND: char = '&';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const COMMA: char = ',';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const COLON: char = ':';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';
pub const UNDERSCORE: char = '_';
pub const BAR: char = '|';

/// Whitespace as understood by `Plural-Forms` headers: ASCII blanks only.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, SPACE | TAB | NEWLINE | RETURN | VTAB | FF)
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == UNDERSCORE
}

pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}
