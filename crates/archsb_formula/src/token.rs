//! Formula tokens and operator properties.

use crate::error::FormulaError;
use std::fmt;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/` (truncating toward zero)
    Div,
}

impl Operator {
    /// Binding strength; a higher value binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 2,
            Operator::Mul | Operator::Div => 3,
        }
    }

    /// All formula operators are left-associative.
    pub fn is_left_associative(self) -> bool {
        true
    }

    /// Applies the operator with 32-bit wrapping semantics.
    ///
    /// Division truncates toward zero, so `-7 / 2 == -3`.
    pub fn apply(self, lhs: i32, rhs: i32) -> Result<i32, FormulaError> {
        match self {
            Operator::Add => Ok(lhs.wrapping_add(rhs)),
            Operator::Sub => Ok(lhs.wrapping_sub(rhs)),
            Operator::Mul => Ok(lhs.wrapping_mul(rhs)),
            Operator::Div if rhs == 0 => Err(FormulaError::DivisionByZero),
            Operator::Div => Ok(lhs.wrapping_div(rhs)),
        }
    }

    /// The operator's source character.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

/// Opening or closing parenthesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bracket {
    /// `(`
    Open,
    /// `)`
    Close,
}

/// What a token is. `W` and `t` are already substituted into [`TokenKind::Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An integer literal or a substituted variable.
    Number(i32),
    /// A binary operator.
    Operator(Operator),
    /// A parenthesis.
    Bracket(Bracket),
}

/// A token and the byte offset it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// Token kind and payload.
    pub kind: TokenKind,
    /// Byte offset in the formula text.
    pub pos: usize,
}

impl Token {
    /// Creates a token at `pos`.
    pub fn new(kind: TokenKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Operator(op) => write!(f, "{}", op.symbol()),
            TokenKind::Bracket(Bracket::Open) => f.write_str("("),
            TokenKind::Bracket(Bracket::Close) => f.write_str(")"),
        }
    }
}
