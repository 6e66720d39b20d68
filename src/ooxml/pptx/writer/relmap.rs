//! Per-slide identifier maps.
//!
//! [`SlideIdentifiers`] is the value the relationship pass hands to the
//! content and timing writers. It maps shape identities to relationship
//! IDs and drawing object IDs, lists the hyperlink relationships in the
//! order they occur, and records the slide-level relationships
//! (background, comments, notes, layout). It is rebuilt for every render
//! and never shared between slides.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use smallvec::SmallVec;

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::RelId;
use crate::ooxml::pptx::hyperlinks::Hyperlink;
use crate::ooxml::pptx::identity::ShapeHash;
use crate::ooxml::pptx::shapes::Shape;

/// Drawing object ID of the implicit root group of `p:spTree`.
pub const ROOT_GROUP_ID: u32 = 1;

/// Relationship IDs of one shape: the primary ID, then media companions.
pub type ShapeRels = SmallVec<[RelId; 3]>;

#[derive(Debug, Clone, Default)]
pub struct SlideIdentifiers {
    shape_rels: HashMap<ShapeHash, ShapeRels>,
    hyperlink_rels: Vec<(Hyperlink, RelId)>,
    drawing_ids: HashMap<ShapeHash, u32>,
    direct_shapes: u32,
    background: Option<RelId>,
    comments: Option<RelId>,
    notes: Option<RelId>,
    layout: Option<RelId>,
}

impl SlideIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the direct children of the slide in tree order, starting
    /// right after the root group. A repeated identity keeps the ID of its
    /// first occurrence.
    pub(crate) fn assign_drawing_ids(&mut self, shapes: &[Shape]) {
        self.direct_shapes = shapes.len() as u32;
        for (index, shape) in shapes.iter().enumerate() {
            let id = self.direct_drawing_id(index);
            match self.drawing_ids.entry(shape.hash_code()) {
                Entry::Vacant(slot) => {
                    slot.insert(id);
                },
                Entry::Occupied(first) => {
                    tracing::debug!(
                        shape = %first.key(),
                        first_id = *first.get(),
                        duplicate_id = id,
                        "identical shapes share an identity; animations target the first"
                    );
                },
            }
        }
    }

    /// Drawing object ID of the direct child at `index`.
    #[inline]
    pub fn direct_drawing_id(&self, index: usize) -> u32 {
        ROOT_GROUP_ID + 1 + index as u32
    }

    /// First drawing object ID available to shapes nested in groups.
    #[inline]
    pub fn first_nested_drawing_id(&self) -> u32 {
        ROOT_GROUP_ID + 1 + self.direct_shapes
    }

    #[inline]
    pub fn drawing_id(&self, shape: ShapeHash) -> Option<u32> {
        self.drawing_ids.get(&shape).copied()
    }

    pub(crate) fn require_drawing_id(&self, shape: ShapeHash) -> Result<u32> {
        self.drawing_id(shape).ok_or_else(|| {
            OoxmlError::defect(format!(
                "shape {} is not a direct child of the slide",
                shape
            ))
        })
    }

    /// Whether relationships were already recorded for `shape`.
    #[inline]
    pub fn has_shape_rels(&self, shape: ShapeHash) -> bool {
        self.shape_rels.contains_key(&shape)
    }

    pub(crate) fn insert_shape_rels(&mut self, shape: ShapeHash, rels: ShapeRels) {
        self.shape_rels.insert(shape, rels);
    }

    #[inline]
    pub fn shape_rels(&self, shape: ShapeHash) -> Option<&[RelId]> {
        self.shape_rels.get(&shape).map(|rels| rels.as_slice())
    }

    /// Primary relationship ID of `shape`.
    pub(crate) fn require_shape_rel(&self, shape: ShapeHash) -> Result<RelId> {
        self.shape_rels(shape)
            .and_then(|rels| rels.first().copied())
            .ok_or_else(|| {
                OoxmlError::defect(format!("no relationship assigned to shape {}", shape))
            })
    }

    /// Hyperlink relationships, one per occurrence in pre-order.
    pub fn hyperlink_rels(&self) -> impl Iterator<Item = (&Hyperlink, RelId)> + '_ {
        self.hyperlink_rels.iter().map(|(link, rel)| (link, *rel))
    }

    pub(crate) fn push_hyperlink_rel(&mut self, link: Hyperlink, rel: RelId) {
        self.hyperlink_rels.push((link, rel));
    }

    /// Cursor handing out hyperlink relationships in declaration order.
    pub(crate) fn hyperlink_cursor(&self) -> HyperlinkCursor<'_> {
        HyperlinkCursor {
            rels: &self.hyperlink_rels,
            next: 0,
        }
    }

    #[inline]
    pub fn background_rel(&self) -> Option<RelId> {
        self.background
    }

    #[inline]
    pub fn comments_rel(&self) -> Option<RelId> {
        self.comments
    }

    #[inline]
    pub fn notes_rel(&self) -> Option<RelId> {
        self.notes
    }

    #[inline]
    pub fn layout_rel(&self) -> Option<RelId> {
        self.layout
    }

    pub(crate) fn set_background_rel(&mut self, rel: RelId) {
        self.background = Some(rel);
    }

    pub(crate) fn set_comments_rel(&mut self, rel: RelId) {
        self.comments = Some(rel);
    }

    pub(crate) fn set_notes_rel(&mut self, rel: RelId) {
        self.notes = Some(rel);
    }

    pub(crate) fn set_layout_rel(&mut self, rel: RelId) {
        self.layout = Some(rel);
    }
}

/// Walks the hyperlink relationships in the order the relationship pass
/// declared them. The content writer must visit links in the same
/// pre-order; a link out of step is a structural defect.
#[derive(Debug)]
pub(crate) struct HyperlinkCursor<'a> {
    rels: &'a [(Hyperlink, RelId)],
    next: usize,
}

impl HyperlinkCursor<'_> {
    pub(crate) fn next_rel(&mut self, link: &Hyperlink) -> Result<RelId> {
        match self.rels.get(self.next) {
            Some((declared, rel)) if declared == link => {
                self.next += 1;
                Ok(*rel)
            },
            Some((declared, _)) => Err(OoxmlError::defect(format!(
                "hyperlink {} written where {} was declared",
                link.target(),
                declared.target()
            ))),
            None => Err(OoxmlError::defect(format!(
                "no relationship assigned to hyperlink {}",
                link.target()
            ))),
        }
    }

    /// Fails when declared hyperlinks were never written.
    pub(crate) fn finish(&self) -> Result<()> {
        let unused = self.rels.len() - self.next;
        if unused > 0 {
            return Err(OoxmlError::defect(format!(
                "{} declared hyperlink relationships are not referenced",
                unused
            )));
        }
        Ok(())
    }
}
