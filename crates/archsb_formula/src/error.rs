//! Errors raised while lexing, converting or evaluating a formula.

/// Reasons a formula could not be evaluated.
///
/// Offsets are byte positions within the complete formula text, including
/// for sub-expressions of a piecewise formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The formula text is empty.
    #[error("formula is empty")]
    EmptyFormula,

    /// A character outside the formula alphabet.
    #[error("unsupported character '{ch}' at offset {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Its byte offset.
        pos: usize,
    },

    /// A piecewise formula is missing one of `{`, `:`, `}` or `;`.
    #[error("piecewise formula is missing '{delimiter}' (searched from offset {pos})")]
    MissingDelimiter {
        /// The delimiter that was expected.
        delimiter: char,
        /// Offset at which the search started.
        pos: usize,
    },

    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("mismatched bracket at offset {pos}")]
    MismatchedBracket {
        /// Offset of the unmatched bracket.
        pos: usize,
    },

    /// The postfix form cannot be reduced to a single number.
    #[error("malformed expression: {0}")]
    MalformedExpression(&'static str),

    /// A `/` whose right operand evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A piecewise clause `{start:end}` with `start > end`.
    #[error("piecewise range start {start} is greater than its end {end}")]
    InvertedRange {
        /// Evaluated range start.
        start: i32,
        /// Evaluated range end.
        end: i32,
    },

    /// No piecewise clause covers the wire index.
    #[error("no piecewise range contains wire {wire}")]
    NoMatchingRange {
        /// The wire index `t` that was looked up.
        wire: i32,
    },
}
