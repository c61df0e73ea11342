/**
 * Plural-Forms Parser
 *
 * Recursive descent parser for the statement list of a `Plural-Forms`
 * header. Produces a slot-resolved [`Program`]; nothing is ever executed as
 * host code.
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{GettextError, Result};

/// Deepest expression nesting accepted. Parenthesised groups, prefix
/// operators, ternary branches, assignment targets and every operator of a
/// binary chain each count one level.
pub const MAX_NESTING: usize = 128;

/// Plural-forms parser
#[derive(Debug, Default)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Program> {
        let tokens = self.lexer.tokenize(input);
        ParseAST::new(input, tokens).parse_program()
    }
}

/// Internal parser state
struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
    names: Vec<String>,
    depth: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseAST {
            input,
            tokens,
            index: 0,
            names: RESERVED_NAMES.iter().map(|s| s.to_string()).collect(),
            depth: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> GettextError {
        GettextError::invalid_plural(self.input, message, self.input_index())
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn input_index(&self) -> usize {
        self.current().map(|t| t.index).unwrap_or(self.input.len())
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if let Some(token) = self.current() {
            if token.is_character(code) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if let Some(token) = self.current() {
            if token.is_operator(op) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("Expected character '{}'", code)))
        }
    }

    /// Lexer errors win over the parser's own expectation message.
    fn unexpected(&self, expected: &str) -> GettextError {
        match self.current() {
            Some(token) if token.is_error() => self.error(token.str_value.clone()),
            Some(token) => self.error(format!(
                "{}, got [{}]",
                expected,
                &self.input[token.index..token.end]
            )),
            None => self.error(format!("{}, got end of input", expected)),
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!(
                "Expression nested deeper than {} levels",
                MAX_NESTING
            )));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level down.
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Expr>) -> Result<Expr> {
        let depth = self.depth;
        self.descend()?;
        let result = parse(self);
        self.depth = depth;
        result
    }

    fn slot(&mut self, name: &str) -> Slot {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return Slot(index);
        }
        self.names.push(name.to_string());
        Slot(self.names.len() - 1)
    }

    fn parse_program(mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.at_end() {
            if self.consume_optional_character(';') {
                continue;
            }
            self.parse_statement(&mut statements)?;
            if !self.at_end() && !self.consume_optional_character(';') {
                return Err(self.unexpected("Expected ';'"));
            }
        }

        Ok(Program::new(statements, self.names))
    }

    fn parse_statement(&mut self, statements: &mut Vec<Expr>) -> Result<()> {
        if self.current().map(Token::is_keyword).unwrap_or(false) {
            self.advance();
            loop {
                let name = match self.current() {
                    Some(token) if token.is_identifier() => token.str_value.clone(),
                    _ => return Err(self.unexpected("Expected variable name")),
                };
                self.advance();
                let target = self.slot(&name);
                if self.consume_optional_operator("=") {
                    let value = self.parse_assignment()?;
                    statements.push(Expr::Assign {
                        target,
                        value: Box::new(value),
                    });
                }
                if !self.consume_optional_character(',') {
                    break;
                }
            }
            return Ok(());
        }

        statements.push(self.parse_assignment()?);
        Ok(())
    }

    /// Parse assignment (e.g., `plural = n != 1`)
    fn parse_assignment(&mut self) -> Result<Expr> {
        self.nested(Self::parse_assignment_expr)
    }

    fn parse_assignment_expr(&mut self) -> Result<Expr> {
        let left = self.parse_conditional()?;

        if self.current().map(|t| t.is_operator("=")).unwrap_or(false) {
            let target = match left {
                Expr::Variable(slot) => slot,
                _ => return Err(self.error("Invalid left-hand side in assignment")),
            };
            self.advance();
            let value = self.parse_assignment()?;
            return Ok(Expr::Assign {
                target,
                value: Box::new(value),
            });
        }

        Ok(left)
    }

    /// Parse conditional/ternary expression (e.g., `a ? b : c`)
    fn parse_conditional(&mut self) -> Result<Expr> {
        let condition = self.parse_logical_or()?;

        if self.consume_optional_operator("?") {
            let true_exp = self.parse_assignment()?;
            self.expect_character(':')?;
            let false_exp = self.parse_assignment()?; // Right-associative

            return Ok(Expr::Conditional {
                condition: Box::new(condition),
                true_exp: Box::new(true_exp),
                false_exp: Box::new(false_exp),
            });
        }

        Ok(condition)
    }

    /// Left-associative chain of binary operators from `ops`, one precedence
    /// level above `next`.
    fn parse_binary_level(
        &mut self,
        ops: &[&str],
        next: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let depth = self.depth;
        let mut result = next(self)?;

        while let Some(token) = self.current() {
            if token.token_type != TokenType::Operator || !ops.contains(&token.str_value.as_str())
            {
                break;
            }
            let operator = match BinaryOperator::from_operator(&token.str_value) {
                Some(operator) => operator,
                None => break,
            };
            self.advance();
            // each operator deepens the left spine of the tree
            self.descend()?;
            let right = next(self)?;
            result = Expr::Binary {
                operator,
                left: Box::new(result),
                right: Box::new(right),
            };
        }

        self.depth = depth;
        Ok(result)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["||"], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["&&"], Self::parse_equality)
    }

    /// Parse equality operators (==, !=)
    fn parse_equality(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["==", "!="], Self::parse_relational)
    }

    /// Parse relational operators (<, >, <=, >=)
    fn parse_relational(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["<", ">", "<=", ">="], Self::parse_additive)
    }

    /// Parse additive operators (+, -)
    fn parse_additive(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["+", "-"], Self::parse_multiplicative)
    }

    /// Parse multiplicative operators (*, /, %)
    fn parse_multiplicative(&mut self) -> Result<Expr> {
        self.parse_binary_level(&["*", "/", "%"], Self::parse_prefix)
    }

    /// Parse prefix operators (!, -, +)
    fn parse_prefix(&mut self) -> Result<Expr> {
        let operator = match self.current() {
            Some(token) if token.is_operator("!") => Some(UnaryOperator::Not),
            Some(token) if token.is_operator("-") => Some(UnaryOperator::Minus),
            Some(token) if token.is_operator("+") => Some(UnaryOperator::Plus),
            _ => None,
        };

        if let Some(operator) = operator {
            self.advance();
            let expr = self.nested(Self::parse_prefix)?;
            return Ok(Expr::Unary {
                operator,
                expr: Box::new(expr),
            });
        }

        self.parse_primary()
    }

    /// Parse primary expressions (literals, variables, parenthesised groups)
    fn parse_primary(&mut self) -> Result<Expr> {
        let token = match self.current() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected("Expected expression")),
        };

        if token.is_character('(') {
            self.advance();
            let result = self.parse_assignment()?;
            self.expect_character(')')?;
            return Ok(result);
        }

        if token.is_number() {
            self.advance();
            return Ok(Expr::Literal(token.num_value));
        }

        if token.is_identifier() {
            self.advance();
            return Ok(Expr::Variable(self.slot(&token.str_value)));
        }

        Err(self.unexpected("Expected expression"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Program {
        Parser::new().parse(input).unwrap()
    }

    #[test]
    fn test_parse_header() {
        let program = parse("nplurals=2; plural=(n != 1);");
        assert_eq!(program.statements.len(), 2);
        assert_eq!(program.to_string(), "nplurals = 2; plural = (n != 1);");
    }

    #[test]
    fn test_parse_precedence() {
        let program = parse("plural = n % 10 == 1 && n % 100 != 11 ? 0 : 1");
        assert_eq!(
            program.to_string(),
            "plural = ((((n % 10) == 1) && ((n % 100) != 11)) ? 0 : 1);"
        );
    }

    #[test]
    fn test_parse_nested_ternary_is_right_associative() {
        let program = parse("plural = n == 1 ? 0 : n == 2 ? 1 : 2");
        assert_eq!(
            program.to_string(),
            "plural = ((n == 1) ? 0 : ((n == 2) ? 1 : 2));"
        );
    }

    #[test]
    fn test_parse_declarations_intern_names() {
        let program = parse("let plural, nplurals, extra = 3; plural = extra");
        assert_eq!(program.names, vec!["n", "plural", "nplurals", "extra"]);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_parse_empty_statements() {
        assert!(parse("").statements.is_empty());
        assert!(parse(";;").statements.is_empty());
    }

    #[test]
    fn test_missing_paren_reports_offset() {
        let err = Parser::new().parse("plural=(n != 1").unwrap_err();
        match err {
            GettextError::InvalidPluralExpression { offset, message, .. } => {
                assert_eq!(offset, 14);
                assert!(message.starts_with("Expected character ')'"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_assignment_to_literal_is_rejected() {
        assert!(Parser::new().parse("1 = n").is_err());
    }

    #[test]
    fn test_missing_separator_is_rejected() {
        assert!(Parser::new().parse("nplurals=2 plural=n").is_err());
    }

    #[test]
    fn test_nesting_is_capped() {
        let deep = format!("plural = {}n", "(".repeat(100_000));
        let err = Parser::new().parse(&deep).unwrap_err();
        assert!(err.to_string().contains("nested deeper than"));

        for deep in [
            format!("plural = {}n", "!".repeat(100_000)),
            format!("plural = n{}", " + n".repeat(100_000)),
            format!("plural = {}0", "n ? 1 : ".repeat(100_000)),
        ] {
            assert!(Parser::new().parse(&deep).unwrap_err().is_invalid_plural());
        }
    }

    #[test]
    fn test_nesting_below_cap_parses() {
        let depth = MAX_NESTING / 2;
        let source = format!("plural = {}n{}", "(".repeat(depth), ")".repeat(depth));
        assert!(Parser::new().parse(&source).is_ok());
    }

    #[test]
    fn test_lexer_error_surfaces() {
        let err = Parser::new().parse("plural = n & 1").unwrap_err();
        assert!(err.to_string().contains("Unexpected character [&]"));
    }
}
