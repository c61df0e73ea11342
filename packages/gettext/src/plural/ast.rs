//! Plural-forms AST
//!
//! Variables are resolved to slots at parse time; evaluation runs over a
//! fixed-size environment, so there are no lookups by name at runtime.

use smallvec::SmallVec;
use std::fmt;

/// Index into the evaluation environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub usize);

/// `n`, the count being translated.
pub const N_SLOT: Slot = Slot(0);
/// `plural`, the resulting variant index.
pub const PLURAL_SLOT: Slot = Slot(1);
/// `nplurals`, the number of variants the catalog declares.
pub const NPLURALS_SLOT: Slot = Slot(2);

pub(crate) const RESERVED_NAMES: [&str; 3] = ["n", "plural", "nplurals"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equals,
    NotEquals,
    Lower,
    Greater,
    LowerEquals,
    GreaterEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Lower => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LowerEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// Applies the operator to already evaluated operands.
    pub fn apply(&self, l: i64, r: i64) -> i64 {
        match self {
            BinaryOperator::Or => truth(l != 0 || r != 0),
            BinaryOperator::And => truth(l != 0 && r != 0),
            BinaryOperator::Equals => truth(l == r),
            BinaryOperator::NotEquals => truth(l != r),
            BinaryOperator::Lower => truth(l < r),
            BinaryOperator::Greater => truth(l > r),
            BinaryOperator::LowerEquals => truth(l <= r),
            BinaryOperator::GreaterEquals => truth(l >= r),
            BinaryOperator::Add => l.wrapping_add(r),
            BinaryOperator::Subtract => l.wrapping_sub(r),
            BinaryOperator::Multiply => l.wrapping_mul(r),
            BinaryOperator::Divide if r == 0 => 0,
            BinaryOperator::Modulo if r == 0 => 0,
            BinaryOperator::Divide => l.wrapping_div(r),
            BinaryOperator::Modulo => l.wrapping_rem(r),
        }
    }

    pub fn from_operator(op: &str) -> Option<Self> {
        let operator = match op {
            "||" => BinaryOperator::Or,
            "&&" => BinaryOperator::And,
            "==" => BinaryOperator::Equals,
            "!=" => BinaryOperator::NotEquals,
            "<" => BinaryOperator::Lower,
            ">" => BinaryOperator::Greater,
            "<=" => BinaryOperator::LowerEquals,
            ">=" => BinaryOperator::GreaterEquals,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            _ => return None,
        };
        Some(operator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i64),
    Variable(Slot),
    Unary {
        operator: UnaryOperator,
        expr: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        true_exp: Box<Expr>,
        false_exp: Box<Expr>,
    },
    Assign {
        target: Slot,
        value: Box<Expr>,
    },
}

pub type Env = SmallVec<[i64; 4]>;

fn truth(value: bool) -> i64 {
    value as i64
}

impl Expr {
    /// Evaluates with C semantics: booleans are 0/1, `&&`, `||` and `?:`
    /// short-circuit, arithmetic wraps, division or modulo by zero yields 0.
    pub fn eval(&self, env: &mut Env) -> i64 {
        match self {
            Expr::Literal(value) => *value,
            Expr::Variable(slot) => env[slot.0],
            Expr::Unary { operator, expr } => {
                let value = expr.eval(env);
                match operator {
                    UnaryOperator::Not => truth(value == 0),
                    UnaryOperator::Minus => value.wrapping_neg(),
                    UnaryOperator::Plus => value,
                }
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => match operator {
                BinaryOperator::Or => truth(left.eval(env) != 0 || right.eval(env) != 0),
                BinaryOperator::And => truth(left.eval(env) != 0 && right.eval(env) != 0),
                _ => {
                    let l = left.eval(env);
                    let r = right.eval(env);
                    operator.apply(l, r)
                }
            },
            Expr::Conditional {
                condition,
                true_exp,
                false_exp,
            } => {
                if condition.eval(env) != 0 {
                    true_exp.eval(env)
                } else {
                    false_exp.eval(env)
                }
            }
            Expr::Assign { target, value } => {
                let value = value.eval(env);
                env[target.0] = value;
                value
            }
        }
    }

    /// Whether evaluating this expression may write `slot`.
    pub fn assigns(&self, slot: Slot) -> bool {
        match self {
            Expr::Literal(_) | Expr::Variable(_) => false,
            Expr::Unary { expr, .. } => expr.assigns(slot),
            Expr::Binary { left, right, .. } => left.assigns(slot) || right.assigns(slot),
            Expr::Conditional {
                condition,
                true_exp,
                false_exp,
            } => condition.assigns(slot) || true_exp.assigns(slot) || false_exp.assigns(slot),
            Expr::Assign { target, value } => *target == slot || value.assigns(slot),
        }
    }
}

/// A parsed statement list together with the names of its slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Expr>,
    pub names: Vec<String>,
}

impl Program {
    pub fn new(statements: Vec<Expr>, names: Vec<String>) -> Self {
        Program { statements, names }
    }

    /// Runs every statement with `n` bound and all other names at zero and
    /// returns the final environment.
    pub fn run(&self, n: i64) -> Env {
        let mut env: Env = SmallVec::from_elem(0, self.names.len().max(RESERVED_NAMES.len()));
        env[N_SLOT.0] = n;
        for statement in &self.statements {
            statement.eval(&mut env);
        }
        env
    }

    pub fn assigns(&self, slot: Slot) -> bool {
        self.statements.iter().any(|s| s.assigns(slot))
    }

    fn write_expr(&self, f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
        match expr {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Variable(slot) => f.write_str(self.name(*slot)),
            Expr::Unary { operator, expr } => {
                let op = match operator {
                    UnaryOperator::Not => "!",
                    UnaryOperator::Minus => "-",
                    UnaryOperator::Plus => "+",
                };
                f.write_str(op)?;
                self.write_expr(f, expr)
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                f.write_str("(")?;
                self.write_expr(f, left)?;
                write!(f, " {} ", operator.as_str())?;
                self.write_expr(f, right)?;
                f.write_str(")")
            }
            Expr::Conditional {
                condition,
                true_exp,
                false_exp,
            } => {
                f.write_str("(")?;
                self.write_expr(f, condition)?;
                f.write_str(" ? ")?;
                self.write_expr(f, true_exp)?;
                f.write_str(" : ")?;
                self.write_expr(f, false_exp)?;
                f.write_str(")")
            }
            Expr::Assign { .. } => {
                f.write_str("(")?;
                self.write_statement(f, expr)?;
                f.write_str(")")
            }
        }
    }

    /// Like `write_expr`, but a bare assignment is left unparenthesised.
    fn write_statement(&self, f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
        match expr {
            Expr::Assign { target, value } => {
                write!(f, "{} = ", self.name(*target))?;
                self.write_expr(f, value)
            }
            _ => self.write_expr(f, expr),
        }
    }

    fn name(&self, slot: Slot) -> &str {
        self.names.get(slot.0).map(String::as_str).unwrap_or("?")
    }
}

/// Canonical, fully parenthesised form; useful in logs and tests.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            self.write_statement(f, statement)?;
            f.write_str(";")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        RESERVED_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn ne_one() -> Expr {
        Expr::Binary {
            operator: BinaryOperator::NotEquals,
            left: Box::new(Expr::Variable(N_SLOT)),
            right: Box::new(Expr::Literal(1)),
        }
    }

    #[test]
    fn test_run_binds_n_and_assigns_plural() {
        let program = Program::new(
            vec![Expr::Assign {
                target: PLURAL_SLOT,
                value: Box::new(ne_one()),
            }],
            names(),
        );
        assert_eq!(program.run(1)[PLURAL_SLOT.0], 0);
        assert_eq!(program.run(5)[PLURAL_SLOT.0], 1);
        assert!(program.assigns(PLURAL_SLOT));
        assert!(!program.assigns(NPLURALS_SLOT));
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let mut env: Env = SmallVec::from_elem(0, 3);
        let expr = Expr::Binary {
            operator: BinaryOperator::Modulo,
            left: Box::new(Expr::Literal(7)),
            right: Box::new(Expr::Variable(N_SLOT)),
        };
        assert_eq!(expr.eval(&mut env), 0);
    }

    #[test]
    fn test_short_circuit_skips_assignment() {
        let mut env: Env = SmallVec::from_elem(0, 3);
        let expr = Expr::Binary {
            operator: BinaryOperator::And,
            left: Box::new(Expr::Literal(0)),
            right: Box::new(Expr::Assign {
                target: PLURAL_SLOT,
                value: Box::new(Expr::Literal(9)),
            }),
        };
        assert_eq!(expr.eval(&mut env), 0);
        assert_eq!(env[PLURAL_SLOT.0], 0);
    }

    #[test]
    fn test_display() {
        let program = Program::new(
            vec![
                Expr::Assign {
                    target: NPLURALS_SLOT,
                    value: Box::new(Expr::Literal(2)),
                },
                Expr::Assign {
                    target: PLURAL_SLOT,
                    value: Box::new(ne_one()),
                },
            ],
            names(),
        );
        assert_eq!(program.to_string(), "nplurals = 2; plural = (n != 1);");
    }

    #[test]
    fn test_display_parenthesises_nested_assignment() {
        let program = Program::new(
            vec![Expr::Assign {
                target: PLURAL_SLOT,
                value: Box::new(Expr::Unary {
                    operator: UnaryOperator::Not,
                    expr: Box::new(Expr::Assign {
                        target: NPLURALS_SLOT,
                        value: Box::new(Expr::Literal(1)),
                    }),
                }),
            }],
            names(),
        );
        assert_eq!(program.to_string(), "plural = !(nplurals = 1);");
    }
}
