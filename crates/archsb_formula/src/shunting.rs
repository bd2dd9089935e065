//! Infix to postfix conversion (shunting-yard).

use crate::error::FormulaError;
use crate::token::{Bracket, Token, TokenKind};

/// Reorders infix tokens into reverse Polish notation.
///
/// Operators of higher precedence, or of equal precedence when
/// left-associative, are flushed before a new operator is pushed. Brackets
/// never reach the output.
///
/// # Errors
///
/// [`FormulaError::MismatchedBracket`] for a `)` with no open `(` or a `(`
/// still open at the end of input.
pub fn to_rpn(tokens: &[Token]) -> Result<Vec<Token>, FormulaError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &tok in tokens {
        match tok.kind {
            TokenKind::Number(_) => output.push(tok),
            TokenKind::Operator(op) => {
                while let Some(&top) = stack.last() {
                    let TokenKind::Operator(prev) = top.kind else {
                        break;
                    };
                    let flush = prev.precedence() > op.precedence()
                        || (prev.precedence() == op.precedence() && op.is_left_associative());
                    if !flush {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(tok);
            }
            TokenKind::Bracket(Bracket::Open) => stack.push(tok),
            TokenKind::Bracket(Bracket::Close) => loop {
                match stack.pop() {
                    Some(Token {
                        kind: TokenKind::Bracket(Bracket::Open),
                        ..
                    }) => break,
                    Some(top) => output.push(top),
                    None => return Err(FormulaError::MismatchedBracket { pos: tok.pos }),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if let TokenKind::Bracket(_) = top.kind {
            return Err(FormulaError::MismatchedBracket { pos: top.pos });
        }
        output.push(top);
    }
    Ok(output)
}
