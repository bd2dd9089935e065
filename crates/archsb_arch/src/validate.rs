//! Consistency checks for built switchblocks.
//!
//! Checks stop at the first violation; the whole switchblock is then
//! considered invalid.

use crate::error::{OutOfRangeKind, SwitchblockError, WireEnd};
use crate::segment::SegmentLookup;
use crate::types::{
    Directionality, PermutationFunc, PermutationMap, Side, SidePair, SwitchblockSpec,
    WireSwitchpoints,
};
use archsb_formula::{evaluate, FormulaData};
use archsb_source::Span;

/// Checks directionality rules, then that every wire refers to a known
/// segment at valid switchpoints.
pub fn check_switchblock(
    spec: &SwitchblockSpec,
    segments: &dyn SegmentLookup,
) -> Result<(), SwitchblockError> {
    match spec.directionality {
        Directionality::Unidirectional => check_unidir(spec)?,
        Directionality::Bidirectional => check_bidir(&spec.permutation_map)?,
    }
    for wireconn in &spec.wireconns {
        check_wires(&wireconn.from_set, WireEnd::From, segments)?;
        check_wires(&wireconn.to_set, WireEnd::To, segments)?;
    }
    Ok(())
}

/// Unidirectional wires are only driven at their start, so every to-wire
/// must list exactly switchpoint 0.
fn check_unidir(spec: &SwitchblockSpec) -> Result<(), SwitchblockError> {
    for wireconn in &spec.wireconns {
        for wire in &wireconn.to_set {
            if wire.switchpoints != [0] {
                return Err(SwitchblockError::UnidirectionalViolation {
                    segment: wire.segment_name.clone(),
                    switchpoints: wire.switchpoints.clone(),
                    span: wire.span,
                });
            }
        }
    }
    Ok(())
}

/// A bidirectional side pair implies its reverse, which must not also be given.
fn check_bidir(map: &PermutationMap) -> Result<(), SwitchblockError> {
    for from in Side::ALL {
        for to in Side::ALL {
            let Some(pair) = SidePair::new(from, to) else {
                continue;
            };
            let (Some(forward), Some(reverse)) = (map.get(pair), map.get(pair.reversed())) else {
                continue;
            };
            return Err(SwitchblockError::RedundantSymmetricEntry {
                pair,
                span: first_span(forward),
                reverse_span: first_span(reverse),
            });
        }
    }
    Ok(())
}

fn first_span(funcs: &[PermutationFunc]) -> Span {
    funcs.first().map_or(Span::DUMMY, |f| f.span)
}

fn check_wires(
    wires: &[WireSwitchpoints],
    end: WireEnd,
    segments: &dyn SegmentLookup,
) -> Result<(), SwitchblockError> {
    for wire in wires {
        let segment = segments
            .find_segment(&wire.segment_name)
            .ok_or_else(|| SwitchblockError::UnknownSegment {
                name: wire.segment_name.clone(),
                end,
                span: wire.span,
            })?;
        for &switchpoint in &wire.switchpoints {
            let kind = if switchpoint < 0 {
                OutOfRangeKind::Negative
            } else if switchpoint >= segment.length {
                OutOfRangeKind::TooLarge
            } else {
                continue;
            };
            return Err(SwitchblockError::SwitchpointOutOfRange {
                kind,
                end,
                switchpoint,
                segment: segment.name.clone(),
                length: segment.length,
                span: wire.span,
            });
        }
    }
    Ok(())
}

/// Evaluates every permutation function for each wire `t` in
/// `0..channel_width` with `W = channel_width`, stopping at the first failure.
pub fn check_permutation_formulas(
    spec: &SwitchblockSpec,
    channel_width: i32,
) -> Result<(), SwitchblockError> {
    for (pair, funcs) in spec.permutation_map.iter() {
        for func in funcs {
            for wire in 0..channel_width {
                evaluate(&func.formula, FormulaData::new(wire, channel_width)).map_err(|source| {
                    SwitchblockError::Formula {
                        pair,
                        formula: func.formula.clone(),
                        wire,
                        channel_width,
                        source,
                        span: func.span,
                    }
                })?;
            }
        }
    }
    Ok(())
}
