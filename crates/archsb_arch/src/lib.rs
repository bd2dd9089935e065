//! Switchblock descriptions of an FPGA routing architecture.
//!
//! This crate reads the `<switchblocklist>` and `<segmentlist>` sections of an
//! architecture file into a typed model ([`SwitchblockSpec`], [`SegmentTable`])
//! and checks them for consistency. Permutation formulas are stored verbatim
//! and evaluated with [`archsb_formula`].
//!
//! ```
//! use archsb_arch::{check_switchblock, load_architecture};
//! use archsb_source::FileId;
//!
//! let text = r#"<architecture>
//!   <segmentlist><segment name="L4" length="4"/></segmentlist>
//!   <switchblocklist>
//!     <switchblock name="wilton" directionality="uni">
//!       <wireconn num_conns_type="from" from_type="L4" to_type="L4"
//!                 from_switchpoint="0,1,2,3" to_switchpoint="0"/>
//!     </switchblock>
//!   </switchblocklist>
//! </architecture>"#;
//!
//! let arch = load_architecture(text, FileId::from_raw(0)).unwrap();
//! let sb = arch.switchblocks[0].as_ref().unwrap();
//! assert!(check_switchblock(sb, &arch.segments).is_ok());
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod segment;
pub mod types;
pub mod validate;
pub mod xml;

pub use builder::{
    parse_wireconn, read_sb_switchfuncs, read_sb_wireconns, read_switchblock,
    read_switchblocklist,
};
pub use error::{OutOfRangeKind, SwitchblockError, WireEnd};
pub use segment::{read_segmentlist, Segment, SegmentLookup, SegmentTable};
pub use types::{
    Directionality, NumConnsType, PermutationFunc, PermutationMap, Side, SidePair,
    SwitchblockSpec, WireConn, WireSwitchpoints,
};
pub use validate::{check_permutation_formulas, check_switchblock};

use archsb_source::{FileId, Span};

/// The switchblock-related contents of one architecture file.
#[derive(Debug)]
pub struct Architecture {
    /// Segments from `<segmentlist>`; empty if the file has none.
    pub segments: SegmentTable,
    /// One entry per `<switchblock>`, in document order.
    pub switchblocks: Vec<Result<SwitchblockSpec, SwitchblockError>>,
}

impl Architecture {
    /// Successfully built switchblocks.
    pub fn valid_switchblocks(&self) -> impl Iterator<Item = &SwitchblockSpec> {
        self.switchblocks.iter().filter_map(|sb| sb.as_ref().ok())
    }
}

/// Parses an architecture file and reads its segment and switchblock lists.
///
/// `<segmentlist>` and `<switchblocklist>` are looked up anywhere below the
/// root element (the first of each is used). A malformed document, a bad
/// segment list or a foreign element inside `<switchblocklist>` fails the
/// whole load; an error inside one `<switchblock>` is recorded for that
/// switchblock only.
pub fn load_architecture(text: &str, file: FileId) -> Result<Architecture, SwitchblockError> {
    let doc = roxmltree::Document::parse(text).map_err(|e| xml_error(text, &e, file))?;
    let root = doc.root_element();

    let segments = match root.descendants().find(|n| n.has_tag_name("segmentlist")) {
        Some(node) => read_segmentlist(node, file)?,
        None => SegmentTable::new(),
    };
    let switchblocks = match root
        .descendants()
        .find(|n| n.has_tag_name("switchblocklist"))
    {
        Some(node) => read_switchblocklist(node, file)?,
        None => Vec::new(),
    };

    Ok(Architecture {
        segments,
        switchblocks,
    })
}

fn xml_error(text: &str, err: &roxmltree::Error, file: FileId) -> SwitchblockError {
    let pos = err.pos();
    let offset = text
        .split_inclusive('\n')
        .take(pos.row.saturating_sub(1) as usize)
        .map(str::len)
        .sum::<usize>()
        + pos.col.saturating_sub(1) as usize;
    let offset = offset.min(text.len()) as u32;
    SwitchblockError::Xml {
        message: err.to_string(),
        span: Span::new(file, offset, offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_are_empty() {
        let arch = load_architecture("<architecture/>", FileId::from_raw(0)).unwrap();
        assert!(arch.segments.is_empty());
        assert!(arch.switchblocks.is_empty());
    }

    #[test]
    fn malformed_xml() {
        let err = load_architecture("<architecture>\n  <switchblocklist>\n</architecture>", FileId::from_raw(3))
            .unwrap_err();
        let SwitchblockError::Xml { span, .. } = err else {
            panic!("expected an XML error, got {err:?}");
        };
        assert_eq!(span.file, FileId::from_raw(3));
        assert!(span.start > 0);
        assert_eq!(err.code().to_string(), "E316");
    }

    #[test]
    fn nested_sections_are_found() {
        let text = r#"<architecture>
            <device><segmentlist><segment name="L2" length="2"/></segmentlist></device>
            <switchblocklist><switchblock name="a" directionality="bi"/></switchblocklist>
        </architecture>"#;
        let arch = load_architecture(text, FileId::from_raw(0)).unwrap();
        assert_eq!(arch.segments.len(), 1);
        assert_eq!(arch.valid_switchblocks().count(), 1);
    }
}
