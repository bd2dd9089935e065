//! Thin helpers over `roxmltree` nodes: spans, element checks, attributes and
//! comma-separated lists.

use crate::error::SwitchblockError;
use archsb_source::{FileId, Span};
use roxmltree::Node;

/// Span of a node's start tag name, e.g. `<wireconn`.
pub fn node_span(node: Node<'_, '_>, file: FileId) -> Span {
    let start = node.range().start;
    let end = start + 1 + node.tag_name().name().len();
    Span::new(file, start as u32, end as u32)
}

/// Fails unless `node` is an element named `expected`.
pub fn expect_element(node: Node<'_, '_>, expected: &str, file: FileId) -> Result<(), SwitchblockError> {
    if node.is_element() && node.tag_name().name() == expected {
        Ok(())
    } else {
        Err(SwitchblockError::UnexpectedElement {
            expected: expected.to_string(),
            found: node.tag_name().name().to_string(),
            span: node_span(node, file),
        })
    }
}

/// Returns a required attribute.
pub fn required_attr<'a>(
    node: Node<'a, '_>,
    name: &str,
    file: FileId,
) -> Result<&'a str, SwitchblockError> {
    node.attribute(name)
        .ok_or_else(|| SwitchblockError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: name.to_string(),
            span: node_span(node, file),
        })
}

/// Element children of `node`, skipping text, comments and processing
/// instructions.
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// Number of element children named `name`.
pub fn count_children(node: Node<'_, '_>, name: &str) -> usize {
    child_elements(node)
        .filter(|n| n.tag_name().name() == name)
        .count()
}

/// Splits a comma-separated list, trimming spaces and dropping empty entries.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a comma-separated switchpoint list. An empty list is returned as-is.
pub fn parse_switchpoints(value: &str, span: Span) -> Result<Vec<i32>, SwitchblockError> {
    split_list(value)
        .map(|item| {
            item.parse::<i32>()
                .map_err(|_| SwitchblockError::InvalidSwitchpoint {
                    value: item.to_string(),
                    span,
                })
        })
        .collect()
}
