//! Builds [`SwitchblockSpec`]s from `<switchblock>` elements.
//!
//! Two `<wireconn>` styles are accepted. A wireconn with exactly one
//! attribute (`num_conns_type`) is multinode style and lists its wires as
//! `<from>`/`<to>` children; anything else is inline style with
//! `from_type`, `to_type`, `from_switchpoint` and `to_switchpoint`
//! attributes. Children and lists are kept in document order.

use crate::error::SwitchblockError;
use crate::types::{
    Directionality, NumConnsType, PermutationFunc, PermutationMap, SidePair, SwitchblockSpec,
    WireConn, WireSwitchpoints,
};
use crate::xml::{
    child_elements, count_children, expect_element, node_span, parse_switchpoints, required_attr,
    split_list,
};
use archsb_source::{FileId, Span};
use roxmltree::Node;

/// Reads a `<switchblocklist>`, building each `<switchblock>` independently.
///
/// A malformed switchblock does not prevent the others from being read.
pub fn read_switchblocklist(
    node: Node<'_, '_>,
    file: FileId,
) -> Result<Vec<Result<SwitchblockSpec, SwitchblockError>>, SwitchblockError> {
    expect_element(node, "switchblocklist", file)?;
    child_elements(node)
        .map(|child| {
            if child.tag_name().name() == "switchblock" {
                Ok(read_switchblock(child, file))
            } else {
                Err(SwitchblockError::UnrecognizedChild {
                    parent: "switchblocklist".to_string(),
                    child: child.tag_name().name().to_string(),
                    span: node_span(child, file),
                })
            }
        })
        .collect()
}

/// Reads one `<switchblock name=".." directionality="uni|bi">` element.
pub fn read_switchblock(node: Node<'_, '_>, file: FileId) -> Result<SwitchblockSpec, SwitchblockError> {
    expect_element(node, "switchblock", file)?;

    let name = required_attr(node, "name", file)?;
    let value = required_attr(node, "directionality", file)?;
    let directionality =
        value
            .parse::<Directionality>()
            .map_err(|()| SwitchblockError::InvalidEnum {
                attribute: "directionality".to_string(),
                value: value.to_string(),
                expected: "uni, bi",
                span: node_span(node, file),
            })?;

    let mut spec = SwitchblockSpec::new(name, directionality);
    spec.span = node_span(node, file);

    for child in child_elements(node) {
        match child.tag_name().name() {
            "wireconn" => spec.wireconns.push(parse_wireconn(child, file)?),
            "switchfuncs" => read_sb_switchfuncs(child, file, &mut spec.permutation_map)?,
            other => {
                return Err(SwitchblockError::UnrecognizedChild {
                    parent: "switchblock".to_string(),
                    child: other.to_string(),
                    span: node_span(child, file),
                })
            }
        }
    }
    Ok(spec)
}

/// Reads every `<wireconn>` child of a `<switchblock>`.
pub fn read_sb_wireconns(node: Node<'_, '_>, file: FileId) -> Result<Vec<WireConn>, SwitchblockError> {
    expect_element(node, "switchblock", file)?;
    child_elements(node)
        .filter(|child| child.tag_name().name() == "wireconn")
        .map(|child| parse_wireconn(child, file))
        .collect()
}

/// Reads one `<wireconn>`, choosing the style from its attribute count.
pub fn parse_wireconn(node: Node<'_, '_>, file: FileId) -> Result<WireConn, SwitchblockError> {
    expect_element(node, "wireconn", file)?;
    if node.attributes().count() == 1 {
        parse_wireconn_multinode(node, file)
    } else {
        parse_wireconn_inline(node, file)
    }
}

fn parse_num_conns(node: Node<'_, '_>, file: FileId) -> Result<NumConnsType, SwitchblockError> {
    let value = required_attr(node, "num_conns_type", file)?;
    value
        .parse::<NumConnsType>()
        .map_err(|()| SwitchblockError::InvalidEnum {
            attribute: "num_conns_type".to_string(),
            value: value.to_string(),
            expected: "from, to, min, max",
            span: node_span(node, file),
        })
}

fn parse_wireconn_inline(node: Node<'_, '_>, file: FileId) -> Result<WireConn, SwitchblockError> {
    let span = node_span(node, file);
    let num_conns_type = parse_num_conns(node, file)?;

    let mut from_set = parse_wire_types(node, "from_type", span, file)?;
    let mut to_set = parse_wire_types(node, "to_type", span, file)?;
    add_wire_points(node, "from_switchpoint", &mut from_set, span, file)?;
    add_wire_points(node, "to_switchpoint", &mut to_set, span, file)?;

    Ok(WireConn {
        num_conns_type,
        from_set,
        to_set,
        span,
    })
}

fn parse_wire_types(
    node: Node<'_, '_>,
    attribute: &str,
    span: Span,
    file: FileId,
) -> Result<Vec<WireSwitchpoints>, SwitchblockError> {
    let types: Vec<WireSwitchpoints> = split_list(required_attr(node, attribute, file)?)
        .map(|name| WireSwitchpoints::new(name, span))
        .collect();
    if types.is_empty() {
        return Err(SwitchblockError::EmptyTypeList {
            attribute: attribute.to_string(),
            span,
        });
    }
    Ok(types)
}

/// Appends every listed switchpoint to every wire type collected so far.
fn add_wire_points(
    node: Node<'_, '_>,
    attribute: &str,
    wires: &mut [WireSwitchpoints],
    span: Span,
    file: FileId,
) -> Result<(), SwitchblockError> {
    let points = parse_switchpoints(required_attr(node, attribute, file)?, span)?;
    if points.is_empty() {
        return Err(SwitchblockError::EmptySwitchpoint {
            element: "wireconn".to_string(),
            span,
        });
    }
    for wire in wires.iter_mut() {
        wire.switchpoints.extend_from_slice(&points);
    }
    Ok(())
}

fn parse_wireconn_multinode(node: Node<'_, '_>, file: FileId) -> Result<WireConn, SwitchblockError> {
    let span = node_span(node, file);
    let num_conns_type = parse_num_conns(node, file)?;

    for required in ["from", "to"] {
        if count_children(node, required) == 0 {
            return Err(SwitchblockError::MissingChild {
                parent: "wireconn".to_string(),
                child: required.to_string(),
                span,
            });
        }
    }

    let mut from_set = Vec::new();
    let mut to_set = Vec::new();
    for child in child_elements(node) {
        match child.tag_name().name() {
            "from" => from_set.push(parse_wireconn_from_to(child, file)?),
            "to" => to_set.push(parse_wireconn_from_to(child, file)?),
            other => {
                return Err(SwitchblockError::UnrecognizedChild {
                    parent: "wireconn".to_string(),
                    child: other.to_string(),
                    span: node_span(child, file),
                })
            }
        }
    }

    Ok(WireConn {
        num_conns_type,
        from_set,
        to_set,
        span,
    })
}

fn parse_wireconn_from_to(node: Node<'_, '_>, file: FileId) -> Result<WireSwitchpoints, SwitchblockError> {
    let span = node_span(node, file);
    let found = node.attributes().count();
    if found != 2 {
        return Err(SwitchblockError::WrongAttributeCount {
            element: node.tag_name().name().to_string(),
            expected: 2,
            found,
            span,
        });
    }

    let mut wire = WireSwitchpoints::new(required_attr(node, "type", file)?.trim(), span);
    wire.switchpoints = parse_switchpoints(required_attr(node, "switchpoint", file)?, span)?;
    if wire.switchpoints.is_empty() {
        return Err(SwitchblockError::EmptySwitchpoint {
            element: node.tag_name().name().to_string(),
            span,
        });
    }
    Ok(wire)
}

/// Reads the `<func type=".." formula=".."/>` children of `<switchfuncs>`
/// into `map`. Formulas are stored verbatim.
pub fn read_sb_switchfuncs(
    node: Node<'_, '_>,
    file: FileId,
    map: &mut PermutationMap,
) -> Result<(), SwitchblockError> {
    expect_element(node, "switchfuncs", file)?;

    for child in child_elements(node) {
        let span = node_span(child, file);
        if child.tag_name().name() != "func" {
            return Err(SwitchblockError::UnrecognizedChild {
                parent: "switchfuncs".to_string(),
                child: child.tag_name().name().to_string(),
                span,
            });
        }
        let code = required_attr(child, "type", file)?;
        let formula = required_attr(child, "formula", file)?;
        let pair = SidePair::from_code(code).ok_or_else(|| SwitchblockError::InvalidEnum {
            attribute: "func type".to_string(),
            value: code.to_string(),
            expected: "lt, lr, lb, tl, tb, tr, rt, rl, rb, bl, bt, br",
            span,
        })?;
        map.push(
            pair,
            PermutationFunc {
                formula: formula.to_string(),
                span,
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn wireconn(text: &str) -> Result<WireConn, SwitchblockError> {
        let doc = roxmltree::Document::parse(text).unwrap();
        parse_wireconn(doc.root_element(), FileId::from_raw(0))
    }

    fn switchblock(text: &str) -> Result<SwitchblockSpec, SwitchblockError> {
        let doc = roxmltree::Document::parse(text).unwrap();
        read_switchblock(doc.root_element(), FileId::from_raw(0))
    }

    #[test]
    fn inline_cross_product() {
        let wc = wireconn(
            r#"<wireconn num_conns_type="from" from_type="L4,L8" to_type="L4"
                         from_switchpoint="0,1" to_switchpoint="0"/>"#,
        )
        .unwrap();
        assert_eq!(wc.num_conns_type, NumConnsType::From);
        assert_eq!(wc.from_set.len(), 2);
        assert_eq!(wc.from_set[0].segment_name, "L4");
        assert_eq!(wc.from_set[0].switchpoints, [0, 1]);
        assert_eq!(wc.from_set[1].segment_name, "L8");
        assert_eq!(wc.from_set[1].switchpoints, [0, 1]);
        assert_eq!(wc.to_set.len(), 1);
        assert_eq!(wc.to_set[0].switchpoints, [0]);
    }

    #[test]
    fn inline_trims_and_skips_empty_entries() {
        let wc = wireconn(
            r#"<wireconn num_conns_type="max" from_type=" L4 , ,L16" to_type="L4"
                         from_switchpoint="0, 2," to_switchpoint="0"/>"#,
        )
        .unwrap();
        let names: Vec<&str> = wc.from_set.iter().map(|w| w.segment_name.as_str()).collect();
        assert_eq!(names, ["L4", "L16"]);
        assert_eq!(wc.from_set[1].switchpoints, [0, 2]);
    }

    #[test]
    fn inline_missing_attribute() {
        let err = wireconn(r#"<wireconn num_conns_type="from" from_type="L4" to_type="L4" from_switchpoint="0"/>"#)
            .unwrap_err();
        assert!(matches!(err, SwitchblockError::MissingAttribute { ref attribute, .. } if attribute == "to_switchpoint"));
    }

    #[test]
    fn inline_empty_lists() {
        let err = wireconn(
            r#"<wireconn num_conns_type="from" from_type=" , " to_type="L4" from_switchpoint="0" to_switchpoint="0"/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::EmptyTypeList { ref attribute, .. } if attribute == "from_type"));

        let err = wireconn(
            r#"<wireconn num_conns_type="from" from_type="L4" to_type="L4" from_switchpoint="0" to_switchpoint=""/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::EmptySwitchpoint { .. }));
    }

    #[test]
    fn invalid_num_conns() {
        let err = wireconn(
            r#"<wireconn num_conns_type="all" from_type="L4" to_type="L4" from_switchpoint="0" to_switchpoint="0"/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::InvalidEnum { ref value, .. } if value == "all"));
        assert!(matches!(
            wireconn(r#"<wireconn num_conns_type="FROM"><from type="L4" switchpoint="0"/><to type="L4" switchpoint="0"/></wireconn>"#),
            Err(SwitchblockError::InvalidEnum { .. })
        ));
    }

    #[test]
    fn multinode() {
        let wc = wireconn(
            r#"<wireconn num_conns_type="min">
                 <from type="L4" switchpoint="0,1"/>
                 <from type="L16" switchpoint="4"/>
                 <to type="L4" switchpoint="0"/>
               </wireconn>"#,
        )
        .unwrap();
        assert_eq!(wc.num_conns_type, NumConnsType::Min);
        assert_eq!(wc.from_set.len(), 2);
        assert_eq!(wc.from_set[1].segment_name, "L16");
        assert_eq!(wc.from_set[1].switchpoints, [4]);
        assert_eq!(wc.to_set[0].switchpoints, [0]);
        assert!(wc.from_set[0].span.start > wc.span.start);
    }

    #[test]
    fn multinode_child_needs_two_attributes() {
        let err = wireconn(
            r#"<wireconn num_conns_type="min"><from type="L4" switchpoint="0" extra="1"/><to type="L4" switchpoint="0"/></wireconn>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::WrongAttributeCount { expected: 2, found: 3, .. }));
    }

    #[test]
    fn multinode_unrecognized_child() {
        let err = wireconn(
            r#"<wireconn num_conns_type="min"><from type="L4" switchpoint="0"/><to type="L4" switchpoint="0"/><via/></wireconn>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::UnrecognizedChild { ref child, .. } if child == "via"));
    }

    #[test]
    fn multinode_missing_child() {
        let err = wireconn(r#"<wireconn num_conns_type="min"><from type="L4" switchpoint="0"/></wireconn>"#)
            .unwrap_err();
        assert!(matches!(err, SwitchblockError::MissingChild { ref child, .. } if child == "to"));
    }

    #[test]
    fn multinode_empty_switchpoint() {
        let err = wireconn(
            r#"<wireconn num_conns_type="min"><from type="L4" switchpoint=" "/><to type="L4" switchpoint="0"/></wireconn>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::EmptySwitchpoint { ref element, .. } if element == "from"));
    }

    #[test]
    fn switchfuncs_keep_order_and_multiplicity() {
        let sb = switchblock(
            r#"<switchblock name="wilton" directionality="bi">
                 <switchfuncs>
                   <func type="lt" formula="W-t"/>
                   <func type="tr" formula="t+1"/>
                   <func type="lt" formula="t"/>
                 </switchfuncs>
               </switchblock>"#,
        )
        .unwrap();
        let lt = SidePair::new(Side::Left, Side::Top).unwrap();
        assert_eq!(sb.permutation_map.formulas(lt), ["W-t", "t"]);
        assert_eq!(sb.permutation_map.len(), 2);
        assert!(sb.wireconns.is_empty());
    }

    #[test]
    fn unknown_func_type() {
        let err = switchblock(
            r#"<switchblock name="s" directionality="bi"><switchfuncs><func type="ll" formula="t"/></switchfuncs></switchblock>"#,
        )
        .unwrap_err();
        assert!(matches!(err, SwitchblockError::InvalidEnum { ref value, .. } if value == "ll"));
    }

    #[test]
    fn switchblock_attributes() {
        let sb = switchblock(
            r#"<switchblock name="subset" directionality="uni">
                 <wireconn num_conns_type="from" from_type="L4" to_type="L4" from_switchpoint="0" to_switchpoint="0"/>
                 <wireconn num_conns_type="to"><from type="L4" switchpoint="3"/><to type="L4" switchpoint="0"/></wireconn>
               </switchblock>"#,
        )
        .unwrap();
        assert_eq!(sb.name, "subset");
        assert_eq!(sb.directionality, Directionality::Unidirectional);
        assert_eq!(sb.wireconns.len(), 2);
        assert_eq!(sb.wireconns[1].num_conns_type, NumConnsType::To);

        assert!(matches!(
            switchblock(r#"<switchblock name="s" directionality="both"/>"#),
            Err(SwitchblockError::InvalidEnum { ref attribute, .. }) if attribute == "directionality"
        ));
        assert!(matches!(
            switchblock(r#"<switchblock directionality="bi"/>"#),
            Err(SwitchblockError::MissingAttribute { ref attribute, .. }) if attribute == "name"
        ));
        assert!(matches!(
            switchblock(r#"<switchblock name="s" directionality="bi"><mux/></switchblock>"#),
            Err(SwitchblockError::UnrecognizedChild { .. })
        ));
    }

    #[test]
    fn first_error_in_document_order() {
        let err = switchblock(
            r#"<switchblock name="s" directionality="bi">
                 <wireconn num_conns_type="bogus" from_type="L4" to_type="L4" from_switchpoint="0" to_switchpoint="0"/>
                 <switchfuncs><func type="zz" formula="t"/></switchfuncs>
               </switchblock>"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, SwitchblockError::InvalidEnum { ref attribute, .. } if attribute == "num_conns_type"),
            "{err:?}"
        );
    }

    #[test]
    fn readers_check_their_element() {
        let file = FileId::from_raw(0);
        let doc = roxmltree::Document::parse("<wireconn/>").unwrap();
        assert!(matches!(
            read_sb_wireconns(doc.root_element(), file),
            Err(SwitchblockError::UnexpectedElement { .. })
        ));
        let mut map = PermutationMap::new();
        assert!(matches!(
            read_sb_switchfuncs(doc.root_element(), file, &mut map),
            Err(SwitchblockError::UnexpectedElement { .. })
        ));

        let doc = roxmltree::Document::parse("<switchblock/>").unwrap();
        assert!(matches!(
            parse_wireconn(doc.root_element(), file),
            Err(SwitchblockError::UnexpectedElement { .. })
        ));
    }

    #[test]
    fn list_keeps_going_after_a_bad_switchblock() {
        let text = r#"<switchblocklist>
            <switchblock name="bad" directionality="sideways"/>
            <switchblock name="good" directionality="bi"/>
        </switchblocklist>"#;
        let doc = roxmltree::Document::parse(text).unwrap();
        let results = read_switchblocklist(doc.root_element(), FileId::from_raw(0)).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().map(|sb| sb.name.as_str()), Ok("good"));
    }
}
