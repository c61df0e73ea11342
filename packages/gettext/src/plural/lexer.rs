/**
 * Plural-Forms Lexer
 *
 * Tokenizes the C-like statement list found in a catalog's `Plural-Forms`
 * header, e.g. `nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : 1);`
 */

use crate::chars;

/// Token types in plural-forms expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    Operator = 3,
    Number = 4,
    Error = 5,
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: i64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        token_type: TokenType,
        num_value: i64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

// Declaration keywords accepted in front of a statement
const KEYWORDS: &[&str] = &["let", "var", "const"];

/// Plural-forms lexer
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    peek: char,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            peek,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Token> {
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            self.tokens.push(token);
            // The parser reports the first error; nothing after it matters.
            if is_error {
                break;
            }
        }
        self.tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.index < self.length && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::LPAREN | chars::RPAREN | chars::COMMA | chars::COLON | chars::SEMICOLON => {
                Some(self.scan_character(start, ch))
            }
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH | chars::PERCENT
            | chars::QUESTION => {
                self.advance();
                Some(Token::operator(start, self.index, &ch.to_string()))
            }
            chars::LT | chars::GT => Some(self.scan_complex_operator(start, ch, chars::EQ)),
            chars::BANG | chars::EQ => Some(self.scan_equality_operator(start, ch)),
            chars::AMPERSAND => Some(self.scan_doubled_operator(start, ch)),
            chars::BAR => Some(self.scan_doubled_operator(start, ch)),
            _ => {
                self.advance();
                Some(self.error(start, format!("Unexpected character [{}]", ch)))
            }
        }
    }

    fn scan_character(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        Token::new(start, self.index, TokenType::Character, 0, ch.to_string())
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();
        while chars::is_identifier_part(self.peek) {
            self.advance();
        }
        let text = &self.input[start..self.index];
        let token_type = if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, self.index, token_type, 0, text.to_string())
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while chars::is_digit(self.peek) {
            self.advance();
        }
        if chars::is_identifier_start(self.peek) {
            return self.error(start, "Invalid number literal".to_string());
        }
        let text = &self.input[start..self.index];
        match text.parse::<i64>() {
            Ok(value) => Token::new(start, self.index, TokenType::Number, value, String::new()),
            Err(_) => self.error(start, format!("Number literal out of range [{}]", text)),
        }
    }

    /// `<`, `<=`, `>`, `>=`
    fn scan_complex_operator(&mut self, start: usize, one: char, two: char) -> Token {
        self.advance();
        let mut text = one.to_string();
        if self.peek == two {
            self.advance();
            text.push(two);
        }
        Token::operator(start, self.index, &text)
    }

    /// `!`, `!=`, `!==`, `=`, `==`, `===`
    fn scan_equality_operator(&mut self, start: usize, one: char) -> Token {
        self.advance();
        let mut text = one.to_string();
        if self.peek == chars::EQ {
            self.advance();
            text.push(chars::EQ);
            if self.peek == chars::EQ {
                self.advance();
            }
        }
        Token::operator(start, self.index, &text)
    }

    /// `&&` and `||`; the bitwise forms are not part of the grammar.
    fn scan_doubled_operator(&mut self, start: usize, ch: char) -> Token {
        self.advance();
        if self.peek != ch {
            return self.error(start, format!("Unexpected character [{}]", ch));
        }
        self.advance();
        let text: String = [ch, ch].iter().collect();
        Token::operator(start, self.index, &text)
    }

    fn error(&self, start: usize, message: String) -> Token {
        Token::new(start, self.index, TokenType::Error, 0, message)
    }
}
