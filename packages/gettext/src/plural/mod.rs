//! Plural Rule Module
//!
//! Compiles a catalog's `Plural-Forms` header into a [`PluralRule`], a pure
//! function from a count to a variant index.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Program};
pub use lexer::Lexer;
pub use parser::Parser;

use crate::error::Result;
use ast::{NPLURALS_SLOT, PLURAL_SLOT};
use std::fmt;
use std::sync::Arc;

/// Plural forms of English and most Germanic languages.
pub const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// A compiled `Plural-Forms` expression.
///
/// Cheap to clone; the parsed program is shared.
#[derive(Clone)]
pub struct PluralRule {
    source: Arc<str>,
    program: Arc<Program>,
    nplurals: Option<usize>,
}

impl PluralRule {
    /// Parses `expr`. Fails with `InvalidPluralExpression` when the header
    /// is not a well-formed statement list.
    pub fn compile(expr: &str) -> Result<Self> {
        let program = Parser::new().parse(expr)?;
        let nplurals = if program.assigns(NPLURALS_SLOT) {
            usize::try_from(program.run(0)[NPLURALS_SLOT.0]).ok()
        } else {
            None
        };
        Ok(PluralRule {
            source: Arc::from(expr),
            program: Arc::new(program),
            nplurals,
        })
    }

    /// The rule for [`DEFAULT_PLURAL_FORMS`], built without parsing.
    pub fn english() -> Self {
        let names = ast::RESERVED_NAMES.iter().map(|s| s.to_string()).collect();
        let assign = |target, value| Expr::Assign {
            target,
            value: Box::new(value),
        };
        let statements = vec![
            assign(NPLURALS_SLOT, Expr::Literal(2)),
            assign(
                PLURAL_SLOT,
                Expr::Binary {
                    operator: ast::BinaryOperator::NotEquals,
                    left: Box::new(Expr::Variable(ast::N_SLOT)),
                    right: Box::new(Expr::Literal(1)),
                },
            ),
        ];
        PluralRule {
            source: Arc::from(DEFAULT_PLURAL_FORMS),
            program: Arc::new(Program::new(statements, names)),
            nplurals: Some(2),
        }
    }

    /// Variant index for `n`. Not clamped: a negative or out-of-range result
    /// means the catalog has no variant for this count.
    pub fn index(&self, n: i64) -> i64 {
        self.program.run(n)[PLURAL_SLOT.0]
    }

    /// The declared number of plural variants, if the header assigns one.
    pub fn nplurals(&self) -> Option<usize> {
        self.nplurals
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("source", &self.source)
            .field("compiled", &self.program.to_string())
            .finish()
    }
}

impl PartialEq for PluralRule {
    fn eq(&self, other: &Self) -> bool {
        self.program == other.program
    }
}

/// Compile a plural-forms expression into a selector closure.
pub fn compile(expr: &str) -> Result<impl Fn(i64) -> i64 + Send + Sync + Clone> {
    let rule = PluralRule::compile(expr)?;
    Ok(move |n| rule.index(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forms() {
        let rule = PluralRule::compile(DEFAULT_PLURAL_FORMS).unwrap();
        assert_eq!(rule.nplurals(), Some(2));
        assert_eq!(rule.index(0), 1);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
    }

    #[test]
    fn test_english_matches_parsed_default() {
        let parsed = PluralRule::compile(DEFAULT_PLURAL_FORMS).unwrap();
        assert_eq!(PluralRule::english(), parsed);
        assert_eq!(PluralRule::english().source(), parsed.source());
    }

    #[test]
    fn test_single_form_languages() {
        let rule = PluralRule::compile("nplurals=1; plural=0;").unwrap();
        assert_eq!(rule.nplurals(), Some(1));
        assert!((0..50).all(|n| rule.index(n) == 0));
    }

    #[test]
    fn test_missing_nplurals() {
        let rule = PluralRule::compile("plural = n > 1").unwrap();
        assert_eq!(rule.nplurals(), None);
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(2), 1);
    }

    #[test]
    fn test_compile_closure() {
        let select = compile("nplurals=2; plural=n>1;").unwrap();
        assert_eq!(select(0), 0);
        assert_eq!(select(5), 1);
    }

    #[test]
    fn test_invalid_expression() {
        let err = PluralRule::compile("nplurals=2; plural=(n != 1").unwrap_err();
        assert!(err.is_invalid_plural());
    }
}
