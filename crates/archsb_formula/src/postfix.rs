//! Reduction of a postfix token sequence to a single integer.

use crate::error::FormulaError;
use crate::token::{Token, TokenKind};

/// Evaluates a postfix sequence.
///
/// The sequence is reduced in place: the leftmost operator is applied to the
/// two numbers before it and the three tokens are replaced by the result,
/// until a single number remains.
///
/// # Errors
///
/// [`FormulaError::MalformedExpression`] when the sequence is empty, does not
/// start with a number, has an operator short of operands or leaves numbers
/// unconsumed. Arithmetic errors come from [`Operator::apply`](crate::Operator::apply).
pub fn eval_rpn(mut rpn: Vec<Token>) -> Result<i32, FormulaError> {
    match rpn.first() {
        None => return Err(FormulaError::MalformedExpression("expression is empty")),
        Some(Token {
            kind: TokenKind::Number(_),
            ..
        }) => {}
        Some(_) => {
            return Err(FormulaError::MalformedExpression(
                "expression must start with a number",
            ))
        }
    }

    while rpn.len() > 1 {
        let Some(idx) = rpn
            .iter()
            .position(|t| matches!(t.kind, TokenKind::Operator(_)))
        else {
            return Err(FormulaError::MalformedExpression(
                "numbers are not joined by an operator",
            ));
        };
        if idx < 2 {
            return Err(FormulaError::MalformedExpression(
                "operator is missing an operand",
            ));
        }
        let (TokenKind::Number(lhs), TokenKind::Number(rhs), TokenKind::Operator(op)) =
            (rpn[idx - 2].kind, rpn[idx - 1].kind, rpn[idx].kind)
        else {
            return Err(FormulaError::MalformedExpression(
                "operator is missing an operand",
            ));
        };
        let value = op.apply(lhs, rhs)?;
        let pos = rpn[idx - 2].pos;
        rpn.splice(idx - 2..=idx, [Token::new(TokenKind::Number(value), pos)]);
    }

    match rpn[0].kind {
        TokenKind::Number(n) => Ok(n),
        _ => Err(FormulaError::MalformedExpression(
            "expression must start with a number",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Operator;

    fn num(n: i32) -> Token {
        Token::new(TokenKind::Number(n), 0)
    }

    fn op(o: Operator) -> Token {
        Token::new(TokenKind::Operator(o), 0)
    }

    #[test]
    fn reduces_leftmost_first() {
        // 2 3 4 * +  ==  2 + 3 * 4
        let rpn = vec![num(2), num(3), num(4), op(Operator::Mul), op(Operator::Add)];
        assert_eq!(eval_rpn(rpn), Ok(14));
        // 8 3 - 2 -
        let rpn = vec![num(8), num(3), op(Operator::Sub), num(2), op(Operator::Sub)];
        assert_eq!(eval_rpn(rpn), Ok(3));
    }

    #[test]
    fn single_number() {
        assert_eq!(eval_rpn(vec![num(42)]), Ok(42));
    }

    #[test]
    fn malformed() {
        assert!(matches!(eval_rpn(vec![]), Err(FormulaError::MalformedExpression(_))));
        assert!(matches!(
            eval_rpn(vec![op(Operator::Add), num(1)]),
            Err(FormulaError::MalformedExpression(_))
        ));
        assert!(matches!(
            eval_rpn(vec![num(1), op(Operator::Add)]),
            Err(FormulaError::MalformedExpression(_))
        ));
        assert!(matches!(
            eval_rpn(vec![num(1), num(2)]),
            Err(FormulaError::MalformedExpression(_))
        ));
    }

    #[test]
    fn arithmetic_errors_propagate() {
        let rpn = vec![num(1), num(0), op(Operator::Div)];
        assert_eq!(eval_rpn(rpn), Err(FormulaError::DivisionByZero));
    }
}
