//! Relationship pass of the slide writer.
//!
//! Walks a slide and declares its relationships in one fixed order:
//!
//! 1. media, pictures and charts, breadth-first across groups;
//! 2. the image background;
//! 3. hyperlinks, pre-order, one entry per occurrence;
//! 4. comments, if any shape at any depth is a comment;
//! 5. notes, if the note has shapes;
//! 6. the slide layout, always last.
//!
//! The result is the `.rels` content together with the identifier maps
//! the content and timing writers read.

use std::collections::VecDeque;

use smallvec::smallvec;

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::pptx::config::WriterConfig;
use crate::ooxml::pptx::media::MediaType;
use crate::ooxml::pptx::shapes::{Shape, ShapeKind};
use crate::ooxml::pptx::slide::Slide;
use crate::ooxml::pptx::writer::relmap::SlideIdentifiers;

/// Resolve the 1-based layout number of `slide`.
pub(crate) fn layout_number(slide: &Slide, config: &WriterConfig) -> Result<u32> {
    let layout = slide.layout.unwrap_or(config.default_layout);
    if layout == 0 {
        return Err(OoxmlError::Config(
            "slide layout numbers are 1-based".to_string(),
        ));
    }
    Ok(layout)
}

/// Declare every relationship of the slide at `slide_index` (0-based).
pub fn assign_relationships(
    slide: &Slide,
    slide_index: usize,
    config: &WriterConfig,
) -> Result<(Relationships, SlideIdentifiers)> {
    let layout = layout_number(slide, config)?;
    let mut rels = Relationships::new();
    let mut ids = SlideIdentifiers::new();

    declare_shape_parts(&slide.shapes, &mut rels, &mut ids);

    if let Some(filename) = slide
        .background
        .as_ref()
        .and_then(|bg| bg.indexed_filename(slide_index))
    {
        let rel = rels.add(relationship_type::IMAGE, format!("../media/{}", filename));
        ids.set_background_rel(rel);
    }

    declare_hyperlinks(&slide.shapes, &mut rels, &mut ids);

    if slide.has_comments() {
        let rel = rels.add(
            relationship_type::COMMENTS,
            format!("../comments/comment{}.xml", slide_index + 1),
        );
        ids.set_comments_rel(rel);
    }

    if !slide.note.is_empty() {
        let rel = rels.add(
            relationship_type::NOTES_SLIDE,
            format!("../notesSlides/notesSlide{}.xml", slide_index + 1),
        );
        ids.set_notes_rel(rel);
    }

    let rel = rels.add(
        relationship_type::SLIDE_LAYOUT,
        format!("../slideLayouts/slideLayout{}.xml", layout),
    );
    ids.set_layout_rel(rel);

    ids.assign_drawing_ids(&slide.shapes);

    tracing::debug!(
        slide = slide_index + 1,
        relationships = rels.len(),
        "slide relationships assigned"
    );
    Ok((rels, ids))
}

/// Breadth-first walk declaring the parts shapes embed. A media shape
/// declares three consecutive entries; its primary ID is the first one.
fn declare_shape_parts(shapes: &[Shape], rels: &mut Relationships, ids: &mut SlideIdentifiers) {
    let mut queue: VecDeque<&Shape> = shapes.iter().collect();

    while let Some(shape) = queue.pop_front() {
        if let ShapeKind::Group(group) = &shape.kind {
            queue.extend(group.shapes.iter());
            continue;
        }
        if matches!(
            shape.kind,
            ShapeKind::Table(_) | ShapeKind::RichText(_) | ShapeKind::Comment(_)
        ) {
            continue;
        }

        let hash = shape.hash_code();
        if ids.has_shape_rels(hash) {
            tracing::debug!(
                shape = %hash,
                name = %shape.name,
                "reusing relationships of identical shape"
            );
            continue;
        }

        let assigned = match &shape.kind {
            ShapeKind::Video(media) => {
                let target = format!("../media/{}", media.filename);
                let embed = rels.add(relationship_type::MEDIA, target.clone());
                let file = rels.add(MediaType::Video.relationship_type(), target);
                let poster = rels.add(
                    relationship_type::IMAGE,
                    format!("../media/{}", media.thumbnail_filename()),
                );
                smallvec![embed, file, poster]
            },
            ShapeKind::Audio(media) => {
                let target = format!("../media/{}", media.filename);
                let file = rels.add(MediaType::Audio.relationship_type(), target.clone());
                let embed = rels.add(relationship_type::MEDIA, target);
                let poster = rels.add(
                    relationship_type::IMAGE,
                    format!("../media/{}", media.thumbnail_filename()),
                );
                smallvec![file, embed, poster]
            },
            ShapeKind::Drawing(drawing) => smallvec![rels.add(
                relationship_type::IMAGE,
                format!("../media/{}", drawing.filename),
            )],
            ShapeKind::Chart(chart) => smallvec![rels.add(
                relationship_type::CHART,
                format!("../charts/{}", chart.filename),
            )],
            ShapeKind::Group(_)
            | ShapeKind::Table(_)
            | ShapeKind::RichText(_)
            | ShapeKind::Comment(_) => continue,
        };
        ids.insert_shape_rels(hash, assigned);
    }
}

fn declare_hyperlinks(shapes: &[Shape], rels: &mut Relationships, ids: &mut SlideIdentifiers) {
    let mut links = Vec::new();
    for shape in shapes {
        shape.collect_hyperlinks(&mut links);
    }

    for link in links {
        let rel = if link.is_external() {
            rels.add_external(link.reltype(), link.target())
        } else {
            rels.add(link.reltype(), link.target())
        };
        ids.push_hyperlink_rel(link.clone(), rel);
    }
}
