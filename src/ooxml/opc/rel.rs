//! Relationship entries for a single source part.
//!
//! Entries are kept in declaration order. Identifiers are handed out by
//! position, so the n-th declared relationship is always `rId<n>` and the
//! relationships part lists them 1..N without gaps.
use std::fmt;

use crate::common::xml::XmlWriter;
use crate::ooxml::opc::constants::{namespace, target_mode};

/// Numeric relationship identifier, rendered as `rId<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelId(u32);

impl RelId {
    #[inline]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Identifier `offset` positions after this one. Media shapes reserve
    /// their companion entries at fixed offsets from the primary ID.
    #[inline]
    pub const fn offset(self, offset: u32) -> Self {
        Self(self.0 + offset)
    }
}

impl fmt::Display for RelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rId{}", self.0)
    }
}

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    id: RelId,
    reltype: &'static str,
    target_ref: String,
    is_external: bool,
}

impl Relationship {
    #[inline]
    pub fn id(&self) -> RelId {
        self.id
    }

    #[inline]
    pub fn reltype(&self) -> &'static str {
        self.reltype
    }

    /// Relative part reference, or an absolute URL for external targets.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Ordered collection of relationships from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an internal relationship and return its identifier.
    pub fn add(&mut self, reltype: &'static str, target_ref: impl Into<String>) -> RelId {
        self.push(reltype, target_ref.into(), false)
    }

    /// Append an external relationship (`TargetMode="External"`).
    pub fn add_external(&mut self, reltype: &'static str, url: impl Into<String>) -> RelId {
        self.push(reltype, url.into(), true)
    }

    fn push(&mut self, reltype: &'static str, target_ref: String, is_external: bool) -> RelId {
        let id = self.next_r_id();
        tracing::trace!(%id, reltype, target = %target_ref, is_external, "relationship");
        self.rels.push(Relationship {
            id,
            reltype,
            target_ref,
            is_external,
        });
        id
    }

    /// Identifier the next appended relationship will receive.
    #[inline]
    pub fn next_r_id(&self) -> RelId {
        RelId::new(self.rels.len() as u32 + 1)
    }

    #[inline]
    pub fn get(&self, id: RelId) -> Option<&Relationship> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.rels.get(index)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to the XML of a `.rels` part, in declaration order.
    pub fn to_xml(&self) -> String {
        let mut w = XmlWriter::with_capacity(128 + self.rels.len() * 160);
        w.declaration();
        {
            let mut root = w.start("Relationships");
            root.attr("xmlns", namespace::OPC_RELATIONSHIPS);
            for rel in &self.rels {
                let id = rel.id.to_string();
                let mut el = root.start("Relationship");
                el.attr("Id", &id)
                    .attr("Type", rel.reltype)
                    .attr("Target", &rel.target_ref);
                if rel.is_external {
                    el.attr("TargetMode", target_mode::EXTERNAL);
                }
            }
        }
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;

    #[test]
    fn test_ids_follow_declaration_order() {
        let mut rels = Relationships::new();
        assert_eq!(rels.next_r_id(), RelId::new(1));

        let image = rels.add(relationship_type::IMAGE, "../media/image1.png");
        let link = rels.add_external(relationship_type::HYPERLINK, "https://example.com");
        let layout = rels.add(relationship_type::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        assert_eq!(image.to_string(), "rId1");
        assert_eq!(link.to_string(), "rId2");
        assert_eq!(layout.to_string(), "rId3");
        assert_eq!(rels.len(), 3);
        assert!(rels.get(link).is_some_and(|r| r.is_external()));
        assert!(rels.get(RelId::new(0)).is_none());
        assert!(rels.get(RelId::new(4)).is_none());
    }

    #[test]
    fn test_offset() {
        assert_eq!(RelId::new(3).offset(2), RelId::new(5));
    }

    #[test]
    fn test_to_xml() {
        let mut rels = Relationships::new();
        rels.add(relationship_type::CHART, "../charts/chart1.xml");
        rels.add_external(relationship_type::HYPERLINK, "https://example.com/?a=1&b=2");

        let xml = rels.to_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart1.xml"/>"#
        ));
        assert!(xml.contains(
            r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#
        ));
        assert!(xml.ends_with("</Relationships>"));
    }

    #[test]
    fn test_empty_to_xml() {
        let xml = Relationships::new().to_xml();
        assert!(xml.ends_with(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#
        ));
    }
}
