//! Evaluation of switchblock permutation formulas.
//!
//! A permutation function maps an incoming wire index `t` to an outgoing wire
//! index, written as a small integer expression over `t` and the channel width
//! `W`:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := NUMBER | 'W' | 't' | '(' expr ')'
//! ```
//!
//! A formula starting with `{` is piecewise: `{lo:hi} expr; {lo:hi} expr; ...`,
//! where the first clause whose inclusive range contains `t` is evaluated.
//!
//! Evaluation is stateless. Every call re-lexes the text, converts it to
//! reverse Polish notation with the shunting-yard algorithm and reduces it.
//!
//! ```
//! use archsb_formula::{evaluate, FormulaData};
//!
//! let data = FormulaData::new(3, 10);
//! assert_eq!(evaluate("(t + W/2) * 2", data).unwrap(), 16);
//! assert_eq!(evaluate("{0:4} t+1; {5:9} t-1;", data).unwrap(), 4);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod lexer;
pub mod piecewise;
pub mod postfix;
pub mod shunting;
pub mod token;

pub use error::FormulaError;
pub use lexer::{tokenize, Lexer};
pub use piecewise::is_piecewise;
pub use postfix::eval_rpn;
pub use shunting::to_rpn;
pub use token::{Bracket, Operator, Token, TokenKind};

use serde::{Deserialize, Serialize};

/// The values substituted for the two formula variables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaData {
    /// Incoming wire index, substituted for `t`.
    pub wire: i32,
    /// Wire count of the destination channel, substituted for `W`.
    pub dest_w: i32,
}

impl FormulaData {
    /// Creates formula inputs for wire `wire` in a channel of width `dest_w`.
    pub fn new(wire: i32, dest_w: i32) -> Self {
        Self { wire, dest_w }
    }
}

/// Evaluates a plain or piecewise formula for the given wire and channel width.
///
/// # Errors
///
/// Any syntax, bracket, arithmetic or range problem is returned as a
/// [`FormulaError`]; no default value is ever substituted.
pub fn evaluate(formula: &str, data: FormulaData) -> Result<i32, FormulaError> {
    if formula.is_empty() {
        return Err(FormulaError::EmptyFormula);
    }
    if is_piecewise(formula) {
        piecewise::eval_piecewise(formula, data)
    } else {
        eval_expr(formula, 0, data)
    }
}

/// Evaluates a non-piecewise expression that starts at byte `base` of the
/// caller's formula, so error offsets refer to the full text.
pub(crate) fn eval_expr(text: &str, base: usize, data: FormulaData) -> Result<i32, FormulaError> {
    let tokens = Lexer::with_offset(text, base, data).collect::<Result<Vec<_>, _>>()?;
    let rpn = to_rpn(&tokens)?;
    eval_rpn(rpn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(formula: &str) -> Result<i32, FormulaError> {
        evaluate(formula, FormulaData::new(5, 10))
    }

    #[test]
    fn variables() {
        assert_eq!(eval("W"), Ok(10));
        assert_eq!(eval("t"), Ok(5));
    }

    #[test]
    fn precedence_and_brackets() {
        assert_eq!(eval("2+3*4"), Ok(14));
        assert_eq!(eval("(2+3)*4"), Ok(20));
        assert_eq!(eval("2*(3+4)*5"), Ok(70));
        assert_eq!(eval("((7))"), Ok(7));
    }

    #[test]
    fn left_associativity() {
        assert_eq!(eval("8-3-2"), Ok(3));
        assert_eq!(eval("64/4/2"), Ok(8));
        assert_eq!(eval("10-4+3"), Ok(9));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(eval("7/2"), Ok(3));
        assert_eq!(eval("0-7/2"), Ok(-3));
        assert_eq!(eval("(0-7)/2"), Ok(-3));
        assert_eq!(eval("(1-8)/2"), Ok(-3));
    }

    #[test]
    fn unary_minus_is_rejected() {
        assert!(matches!(eval("-7/2"), Err(FormulaError::MalformedExpression(_))));
    }

    #[test]
    fn typical_permutations() {
        let data = FormulaData::new(7, 12);
        assert_eq!(evaluate("t+1", data), Ok(8));
        assert_eq!(evaluate("W-1-t", data), Ok(4));
        assert_eq!(evaluate("(t + W/4) * 2", data), Ok(20));
        assert_eq!(evaluate("W + t - 1", data), Ok(18));
    }

    #[test]
    fn spaces_are_ignored() {
        assert_eq!(eval("  t  *  2 "), Ok(10));
    }

    #[test]
    fn brackets_must_match() {
        assert!(matches!(eval("(2+3"), Err(FormulaError::MismatchedBracket { .. })));
        assert!(matches!(eval("2+3)"), Err(FormulaError::MismatchedBracket { .. })));
    }

    #[test]
    fn empty_formula() {
        assert_eq!(eval(""), Err(FormulaError::EmptyFormula));
        assert!(matches!(eval("   "), Err(FormulaError::MalformedExpression(_))));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval("t/(W-10)"), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn deterministic() {
        let data = FormulaData::new(4, 16);
        let first = evaluate("{0:W/2} t*2; {W/2+1:W} t-W/2;", data);
        for _ in 0..8 {
            assert_eq!(evaluate("{0:W/2} t*2; {W/2+1:W} t-W/2;", data), first);
        }
        assert_eq!(first, Ok(8));
    }

    #[test]
    fn independent_inputs() {
        assert_eq!(evaluate("t+1", FormulaData::new(1, 4)), Ok(2));
        assert_eq!(evaluate("t+1", FormulaData::new(2, 4)), Ok(3));
        assert_eq!(evaluate("t+1", FormulaData::new(1, 4)), Ok(2));
    }

    #[test]
    fn formula_data_json() {
        let json = serde_json::to_string(&FormulaData::new(3, 10)).unwrap();
        assert_eq!(json, r#"{"wire":3,"dest_w":10}"#);
    }
}
