//! Errors raised while building or validating switchblocks, and their
//! diagnostic codes.

use crate::types::SidePair;
use archsb_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use archsb_formula::FormulaError;
use archsb_source::Span;
use std::fmt;

/// Which end of a wireconn a switchpoint set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEnd {
    /// The from-set.
    From,
    /// The to-set.
    To,
}

impl fmt::Display for WireEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WireEnd::From => "from",
            WireEnd::To => "to",
        })
    }
}

/// The two ways a switchpoint can fall outside its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRangeKind {
    /// Below zero.
    Negative,
    /// At or past the segment length.
    TooLarge,
}

/// A switchblock could not be built or failed validation.
///
/// Every variant carries the span of the element responsible.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwitchblockError {
    /// A reader was handed the wrong element.
    #[error("expected <{expected}> element, found <{found}>")]
    UnexpectedElement {
        /// Element name the reader handles.
        expected: String,
        /// Element name it got.
        found: String,
        /// The element.
        span: Span,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// The element.
        span: Span,
    },

    /// An element carries the wrong number of attributes.
    #[error("expected only {expected} attributes on <{element}>, found {found}")]
    WrongAttributeCount {
        /// Element name.
        element: String,
        /// Required count.
        expected: usize,
        /// Actual count.
        found: usize,
        /// The element.
        span: Span,
    },

    /// A child element is not allowed under its parent.
    #[error("unrecognized child <{child}> of <{parent}>")]
    UnrecognizedChild {
        /// Parent element name.
        parent: String,
        /// Child element name.
        child: String,
        /// The child element.
        span: Span,
    },

    /// A required child element is absent.
    #[error("<{parent}> requires at least one <{child}> child")]
    MissingChild {
        /// Parent element name.
        parent: String,
        /// Missing child name.
        child: String,
        /// The parent element.
        span: Span,
    },

    /// A switchpoint list has no entries.
    #[error("empty switchpoint specification on <{element}>")]
    EmptySwitchpoint {
        /// Element name.
        element: String,
        /// The element.
        span: Span,
    },

    /// A `from_type`/`to_type` list has no entries.
    #[error("empty wire type list in '{attribute}'")]
    EmptyTypeList {
        /// Attribute name.
        attribute: String,
        /// The `<wireconn>` element.
        span: Span,
    },

    /// A switchpoint list entry is not an integer.
    #[error("switchpoint '{value}' is not an integer")]
    InvalidSwitchpoint {
        /// The offending entry.
        value: String,
        /// The element.
        span: Span,
    },

    /// An attribute value is not one of its allowed keywords.
    #[error("invalid {attribute} '{value}' (expected {expected})")]
    InvalidEnum {
        /// Attribute name.
        attribute: String,
        /// The offending value.
        value: String,
        /// Allowed values, for the message.
        expected: &'static str,
        /// The element.
        span: Span,
    },

    /// A unidirectional wireconn drives something other than switchpoint 0.
    #[error(
        "unidirectional switch blocks may only drive the start point of a wire, \
         but '{segment}' lists switchpoints {switchpoints:?}"
    )]
    UnidirectionalViolation {
        /// Segment of the to-set entry.
        segment: String,
        /// Its switchpoints.
        switchpoints: Vec<i32>,
        /// The offending `<wireconn>`, `<to>` element for multinode style.
        span: Span,
    },

    /// Both directions of a side pair are given in a bidirectional switchblock.
    #[error(
        "bidirectional switch block specifies both {pair} and {reverse}; \
         the reverse connection is implicit",
        reverse = .pair.reversed()
    )]
    RedundantSymmetricEntry {
        /// The first pair found, in side order.
        pair: SidePair,
        /// First `<func>` for `pair`.
        span: Span,
        /// First `<func>` for the reverse pair.
        reverse_span: Span,
    },

    /// A wireconn names a segment that is not defined.
    #[error("failed to find segment '{name}' for <wireconn> {end} type specification")]
    UnknownSegment {
        /// Segment name.
        name: String,
        /// Which set it was listed in.
        end: WireEnd,
        /// The element naming the segment.
        span: Span,
    },

    /// A switchpoint lies outside `0..length` of its segment.
    #[error("{}", out_of_range_message(.kind, .end, .switchpoint, .segment, .length))]
    SwitchpointOutOfRange {
        /// Below zero or too large.
        kind: OutOfRangeKind,
        /// Which set it was listed in.
        end: WireEnd,
        /// The switchpoint.
        switchpoint: i32,
        /// Segment name.
        segment: String,
        /// Segment length.
        length: i32,
        /// The element listing the switchpoint.
        span: Span,
    },

    /// Two `<segment>` elements share a name.
    #[error("segment '{name}' is defined more than once")]
    SegmentRedefined {
        /// Segment name.
        name: String,
        /// The second definition.
        span: Span,
        /// The first definition.
        previous: Span,
    },

    /// A segment length is not a positive integer.
    #[error("segment '{name}' has invalid length '{value}' (must be a positive integer)")]
    InvalidSegmentLength {
        /// Segment name.
        name: String,
        /// The attribute value.
        value: String,
        /// The `<segment>` element.
        span: Span,
    },

    /// A permutation function failed to evaluate.
    #[error("permutation function '{formula}' for {pair} failed at t={wire}, W={channel_width}: {source}")]
    Formula {
        /// Side pair of the function.
        pair: SidePair,
        /// Formula text.
        formula: String,
        /// Wire index being evaluated.
        wire: i32,
        /// Channel width used for `W`.
        channel_width: i32,
        /// Underlying evaluation error.
        source: FormulaError,
        /// The `<func>` element.
        span: Span,
    },

    /// The document is not well-formed XML.
    #[error("malformed architecture file: {message}")]
    Xml {
        /// Parser message.
        message: String,
        /// Where the parser stopped.
        span: Span,
    },
}

fn out_of_range_message(
    kind: &OutOfRangeKind,
    end: &WireEnd,
    switchpoint: &i32,
    segment: &str,
    length: &i32,
) -> String {
    match kind {
        OutOfRangeKind::Negative => format!(
            "invalid <wireconn> {end}_switchpoint '{switchpoint}' on segment '{segment}' (must be >= 0)"
        ),
        OutOfRangeKind::TooLarge => format!(
            "invalid <wireconn> {end}_switchpoint '{switchpoint}' on segment '{segment}' (must be < {length})"
        ),
    }
}

impl SwitchblockError {
    /// Stable code of this error kind.
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            SwitchblockError::UnexpectedElement { .. } => 300,
            SwitchblockError::MissingAttribute { .. } => 301,
            SwitchblockError::WrongAttributeCount { .. } => 302,
            SwitchblockError::UnrecognizedChild { .. } => 303,
            SwitchblockError::MissingChild { .. } => 304,
            SwitchblockError::EmptySwitchpoint { .. } => 305,
            SwitchblockError::EmptyTypeList { .. } => 306,
            SwitchblockError::InvalidSwitchpoint { .. } => 307,
            SwitchblockError::InvalidEnum { .. } => 308,
            SwitchblockError::UnidirectionalViolation { .. } => 309,
            SwitchblockError::RedundantSymmetricEntry { .. } => 310,
            SwitchblockError::UnknownSegment { .. } => 311,
            SwitchblockError::SwitchpointOutOfRange { .. } => 312,
            SwitchblockError::SegmentRedefined { .. } => 313,
            SwitchblockError::InvalidSegmentLength { .. } => 314,
            SwitchblockError::Formula { .. } => 315,
            SwitchblockError::Xml { .. } => 316,
        };
        DiagnosticCode::new(Category::Error, number)
    }

    /// The element the error points at.
    pub fn span(&self) -> Span {
        match self {
            SwitchblockError::UnexpectedElement { span, .. }
            | SwitchblockError::MissingAttribute { span, .. }
            | SwitchblockError::WrongAttributeCount { span, .. }
            | SwitchblockError::UnrecognizedChild { span, .. }
            | SwitchblockError::MissingChild { span, .. }
            | SwitchblockError::EmptySwitchpoint { span, .. }
            | SwitchblockError::EmptyTypeList { span, .. }
            | SwitchblockError::InvalidSwitchpoint { span, .. }
            | SwitchblockError::InvalidEnum { span, .. }
            | SwitchblockError::UnidirectionalViolation { span, .. }
            | SwitchblockError::RedundantSymmetricEntry { span, .. }
            | SwitchblockError::UnknownSegment { span, .. }
            | SwitchblockError::SwitchpointOutOfRange { span, .. }
            | SwitchblockError::SegmentRedefined { span, .. }
            | SwitchblockError::InvalidSegmentLength { span, .. }
            | SwitchblockError::Formula { span, .. }
            | SwitchblockError::Xml { span, .. } => *span,
        }
    }

    /// Converts the error into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string(), self.span());
        match self {
            SwitchblockError::RedundantSymmetricEntry {
                pair, reverse_span, ..
            } => {
                let reverse = pair.reversed();
                diag.with_label(Label::secondary(
                    *reverse_span,
                    format!("{reverse} declared here"),
                ))
                .with_help(format!("remove the {reverse} entry; it is implied by {pair}"))
            }
            SwitchblockError::SegmentRedefined { previous, .. } => {
                diag.with_label(Label::secondary(*previous, "first defined here"))
            }
            SwitchblockError::UnknownSegment { .. } => {
                diag.with_note("segments are declared in <segmentlist>")
            }
            SwitchblockError::InvalidEnum { expected, .. } => {
                diag.with_help(format!("expected one of {expected}"))
            }
            SwitchblockError::UnidirectionalViolation { .. } => {
                diag.with_help("use switchpoint=\"0\" for every <to> wire")
            }
            _ => diag,
        }
    }
}
