//! Piecewise formulas: `{start:end} expr; {start:end} expr; ...`.
//!
//! Range bounds are themselves formulas. Clauses are tried left to right and
//! the first whose inclusive range contains `t` wins. Whitespace is allowed
//! between a `;` and the next `{`.

use crate::error::FormulaError;
use crate::{eval_expr, FormulaData};

/// Returns `true` if the formula uses the piecewise syntax.
pub fn is_piecewise(formula: &str) -> bool {
    formula.starts_with('{')
}

fn find_from(formula: &str, from: usize, delimiter: char) -> Result<usize, FormulaError> {
    formula[from..]
        .find(delimiter)
        .map(|i| from + i)
        .ok_or(FormulaError::MissingDelimiter {
            delimiter,
            pos: from,
        })
}

/// Evaluates a piecewise formula. `formula` must start with `{`.
pub(crate) fn eval_piecewise(formula: &str, data: FormulaData) -> Result<i32, FormulaError> {
    let mut open = 0;
    loop {
        let body = open + 1;
        let close = find_from(formula, body, '}')?;
        let colon = formula[body..close]
            .find(':')
            .map(|i| body + i)
            .ok_or(FormulaError::MissingDelimiter {
                delimiter: ':',
                pos: body,
            })?;

        let start = eval_expr(&formula[body..colon], body, data)?;
        let end = eval_expr(&formula[colon + 1..close], colon + 1, data)?;
        if start > end {
            return Err(FormulaError::InvertedRange { start, end });
        }

        let semi = find_from(formula, close + 1, ';')?;
        if (start..=end).contains(&data.wire) {
            return eval_expr(&formula[close + 1..semi], close + 1, data);
        }

        let rest = &formula[semi + 1..];
        let next = semi + 1 + (rest.len() - rest.trim_start().len());
        match formula[next..].chars().next() {
            None => return Err(FormulaError::NoMatchingRange { wire: data.wire }),
            Some('{') => open = next,
            Some(_) => {
                return Err(FormulaError::MissingDelimiter {
                    delimiter: '{',
                    pos: next,
                })
            }
        }
    }
}
