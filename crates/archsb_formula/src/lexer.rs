//! Formula lexer.
//!
//! Produces one [`Token`] per call, skipping spaces. Runs of ASCII digits
//! become numbers; `W` and `t` are replaced by their values from
//! [`FormulaData`] right here, so later stages only ever see integers.

use crate::error::FormulaError;
use crate::token::{Bracket, Operator, Token, TokenKind};
use crate::FormulaData;

/// Lexes a complete formula, stopping at the first bad character.
pub fn tokenize(formula: &str, data: FormulaData) -> Result<Vec<Token>, FormulaError> {
    Lexer::new(formula, data).collect()
}

/// Iterator over the tokens of one (non-piecewise) formula.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    base: usize,
    data: FormulaData,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `text`.
    pub fn new(text: &'a str, data: FormulaData) -> Self {
        Self::with_offset(text, 0, data)
    }

    /// Creates a lexer over a slice that starts at byte `base` of a larger
    /// formula; reported positions are shifted by `base`.
    pub fn with_offset(text: &'a str, base: usize, data: FormulaData) -> Self {
        Self {
            text,
            pos: 0,
            base,
            data,
        }
    }

    fn number(&mut self) -> i32 {
        let digits = self.text[self.pos..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let value = self.text[self.pos..self.pos + digits]
            .bytes()
            .fold(0i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')));
        self.pos += digits;
        value
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, FormulaError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start_matches(' ').len();

        let start = self.pos;
        let ch = self.text[start..].chars().next()?;
        let kind = match ch {
            '0'..='9' => TokenKind::Number(self.number()),
            _ => {
                let kind = match ch {
                    'W' => TokenKind::Number(self.data.dest_w),
                    't' => TokenKind::Number(self.data.wire),
                    '+' => TokenKind::Operator(Operator::Add),
                    '-' => TokenKind::Operator(Operator::Sub),
                    '*' => TokenKind::Operator(Operator::Mul),
                    '/' => TokenKind::Operator(Operator::Div),
                    '(' => TokenKind::Bracket(Bracket::Open),
                    ')' => TokenKind::Bracket(Bracket::Close),
                    other => {
                        self.pos = self.text.len();
                        return Some(Err(FormulaError::UnexpectedChar {
                            ch: other,
                            pos: self.base + start,
                        }));
                    }
                };
                self.pos += ch.len_utf8();
                kind
            }
        };
        Some(Ok(Token::new(kind, self.base + start)))
    }
}
