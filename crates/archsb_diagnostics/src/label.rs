//! Extra source locations attached to a diagnostic.

use archsb_source::Span;
use serde::{Deserialize, Serialize};

/// Whether a label marks the primary location or additional context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Underlined with `^`.
    Primary,
    /// Shown as a separate "see also" location.
    Secondary,
}

/// A span with a short explanation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Location being annotated.
    pub span: Span,
    /// Explanation printed next to the location.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(Label::primary(Span::DUMMY, "x").style, LabelStyle::Primary);
        let l = Label::secondary(Span::DUMMY, "reverse entry here");
        assert_eq!(l.style, LabelStyle::Secondary);
        assert_eq!(l.message, "reverse entry here");
    }
}
