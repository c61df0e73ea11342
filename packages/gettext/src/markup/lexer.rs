//! Markup Lexer
//!
//! Splits a translated string into text runs and pseudo-tags. A tag is `<`,
//! an optional `/`, an ASCII alphanumeric name, anything up to the next `>`
//! (ignored), with a `/` right before `>` marking it self-closing. Anything
//! else, including a lone `<`, is text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{SourceSpan, TagToken, TextToken, Token};
use crate::chars;

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*(/)?\s*([a-zA-Z0-9]+)[^>]*>").expect("tag pattern is a valid regex")
});

/// Tokenize `source` into text and tag tokens. Empty text runs are omitted.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for captures in TAG_RE.captures_iter(source) {
        let (full, name) = match (captures.get(0), captures.get(2)) {
            (Some(full), Some(name)) => (full, name),
            _ => continue,
        };

        push_text(&mut tokens, source, last, full.start());
        last = full.end();

        let tag = TagToken {
            name: name.as_str().to_ascii_lowercase(),
            source_span: SourceSpan::new(full.start(), full.end()),
        };
        let token = if captures.get(1).is_some() {
            Token::TagClose(tag)
        } else if is_self_closing(full.as_str()) {
            Token::TagSelfClose(tag)
        } else {
            Token::TagOpen(tag)
        };
        tokens.push(token);
    }

    push_text(&mut tokens, source, last, source.len());
    tokens
}

fn push_text(tokens: &mut Vec<Token>, source: &str, start: usize, end: usize) {
    if start < end {
        tokens.push(Token::Text(TextToken {
            value: source[start..end].to_string(),
            source_span: SourceSpan::new(start, end),
        }));
    }
}

/// `/` followed only by whitespace before the closing `>`.
fn is_self_closing(tag: &str) -> bool {
    let inner = tag.strip_suffix(chars::GT).unwrap_or(tag);
    inner.trim_end().ends_with(chars::SLASH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::tokens::TokenType;

    fn types(source: &str) -> Vec<TokenType> {
        tokenize(source).iter().map(Token::token_type).collect()
    }

    #[test]
    fn test_tokenize_text_only() {
        assert_eq!(types("plain text"), vec![TokenType::Text]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_tags() {
        assert_eq!(
            types("a<b>c</b><br/>"),
            vec![
                TokenType::Text,
                TokenType::TagOpen,
                TokenType::Text,
                TokenType::TagClose,
                TokenType::TagSelfClose,
            ]
        );
    }

    #[test]
    fn test_tag_names_are_lowercased_and_attributes_dropped() {
        let tokens = tokenize(r#"<A href="x">"#);
        match &tokens[0] {
            Token::TagOpen(tag) => {
                assert_eq!(tag.name, "a");
                assert_eq!(tag.source_span, SourceSpan::new(0, 12));
            }
            other => panic!("expected open tag, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_inside_tags() {
        assert_eq!(
            types("< / b >< br / >"),
            vec![TokenType::TagClose, TokenType::TagSelfClose]
        );
    }

    #[test]
    fn test_slash_inside_attribute_is_not_self_closing() {
        assert_eq!(types(r#"<a href="x/">"#), vec![TokenType::TagOpen]);
    }

    #[test]
    fn test_non_tags_stay_text() {
        assert_eq!(types("1 <= 2, <-> and <>"), vec![TokenType::Text]);
    }
}
