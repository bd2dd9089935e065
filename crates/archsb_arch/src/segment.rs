//! Wire segment types, as far as switchblock validation needs them.

use crate::error::SwitchblockError;
use crate::xml::{child_elements, expect_element, node_span, required_attr};
use archsb_source::{FileId, Span};
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named wire type spanning `length` tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Name referenced by `from_type`/`to_type`.
    pub name: String,
    /// Number of switchpoints along the wire.
    pub length: i32,
    /// The `<segment>` element.
    #[serde(skip)]
    pub span: Span,
}

impl Segment {
    /// Creates a segment with no source location.
    pub fn new(name: impl Into<String>, length: i32) -> Self {
        Self {
            name: name.into(),
            length,
            span: Span::DUMMY,
        }
    }
}

/// Read access to the segments of an architecture.
pub trait SegmentLookup {
    /// Returns the segment called `name`, if defined.
    fn find_segment(&self, name: &str) -> Option<&Segment>;
}

/// Segments in declaration order with lookup by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Segment>", try_from = "Vec<Segment>")]
pub struct SegmentTable {
    segments: Vec<Segment>,
    by_name: HashMap<String, usize>,
}

impl SegmentTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a segment, rejecting a second definition of the same name.
    pub fn insert(&mut self, segment: Segment) -> Result<(), SwitchblockError> {
        if let Some(&idx) = self.by_name.get(&segment.name) {
            return Err(SwitchblockError::SegmentRedefined {
                name: segment.name,
                span: segment.span,
                previous: self.segments[idx].span,
            });
        }
        self.by_name.insert(segment.name.clone(), self.segments.len());
        self.segments.push(segment);
        Ok(())
    }

    /// Segments in declaration order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if no segment is defined.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl SegmentLookup for SegmentTable {
    fn find_segment(&self, name: &str) -> Option<&Segment> {
        self.by_name.get(name).map(|&idx| &self.segments[idx])
    }
}

impl TryFrom<Vec<Segment>> for SegmentTable {
    type Error = SwitchblockError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        let mut table = SegmentTable::new();
        for segment in segments {
            table.insert(segment)?;
        }
        Ok(table)
    }
}

impl From<SegmentTable> for Vec<Segment> {
    fn from(table: SegmentTable) -> Self {
        table.segments
    }
}

/// Reads `<segmentlist>`, taking `name` and `length` from each `<segment>`.
///
/// Other segment attributes and children (switch patterns, electrical
/// parameters) are not needed here and are ignored.
pub fn read_segmentlist(node: Node<'_, '_>, file: FileId) -> Result<SegmentTable, SwitchblockError> {
    expect_element(node, "segmentlist", file)?;

    let mut table = SegmentTable::new();
    for child in child_elements(node) {
        if child.tag_name().name() != "segment" {
            return Err(SwitchblockError::UnrecognizedChild {
                parent: "segmentlist".to_string(),
                child: child.tag_name().name().to_string(),
                span: node_span(child, file),
            });
        }
        let span = node_span(child, file);
        let name = required_attr(child, "name", file)?;
        let value = required_attr(child, "length", file)?;
        let length = value
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| SwitchblockError::InvalidSegmentLength {
                name: name.to_string(),
                value: value.to_string(),
                span,
            })?;
        table.insert(Segment {
            name: name.to_string(),
            length,
            span,
        })?;
    }
    Ok(table)
}
