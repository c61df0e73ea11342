//! Markup Tokens
//!
//! Flat token stream produced by the markup lexer. Tags carry only their
//! lowercased name; whatever sits between the name and `>` is dropped.

use serde::{Deserialize, Serialize};

/// Byte range of a token in the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        SourceSpan { start, end }
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Text,
    TagOpen,
    TagClose,
    TagSelfClose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    pub value: String,
    pub source_span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagToken {
    pub name: String,
    pub source_span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Text(TextToken),
    /// `<name ...>`
    TagOpen(TagToken),
    /// `</name ...>`
    TagClose(TagToken),
    /// `<name .../>`
    TagSelfClose(TagToken),
}

impl Token {
    pub fn token_type(&self) -> TokenType {
        match self {
            Token::Text(_) => TokenType::Text,
            Token::TagOpen(_) => TokenType::TagOpen,
            Token::TagClose(_) => TokenType::TagClose,
            Token::TagSelfClose(_) => TokenType::TagSelfClose,
        }
    }

    pub fn source_span(&self) -> SourceSpan {
        match self {
            Token::Text(t) => t.source_span,
            Token::TagOpen(t) | Token::TagClose(t) | Token::TagSelfClose(t) => t.source_span,
        }
    }
}
