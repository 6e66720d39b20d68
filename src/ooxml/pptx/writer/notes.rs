//! Notes slide part.
//!
//! Speaker notes are written as a single body placeholder holding the
//! paragraphs of the note's text and table shapes. The notes part has no
//! relationships of its own, so run hyperlinks are dropped.

use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::shapes::{Paragraph, ShapeKind};
use crate::ooxml::pptx::slide::Note;
use crate::ooxml::pptx::writer::shape::{write_paragraphs, write_root_group_properties};

/// Render `note`, or `None` when the note has no shapes.
pub(crate) fn render_notes(note: &Note) -> Option<Result<String>> {
    if note.is_empty() {
        return None;
    }
    Some(write_notes(note))
}

fn write_notes(note: &Note) -> Result<String> {
    let mut paragraphs: Vec<Paragraph> = Vec::new();
    for shape in &note.shapes {
        match &shape.kind {
            ShapeKind::RichText(_) | ShapeKind::Table(_) => {
                paragraphs.extend(shape.paragraphs().cloned());
            },
            _ => {
                tracing::debug!(name = %shape.name, "skipping non-text shape in notes");
            },
        }
    }

    let mut w = XmlWriter::with_capacity(2048);
    w.declaration();
    {
        let mut notes = w.start("p:notes");
        notes
            .attr("xmlns:a", namespace::DML_MAIN)
            .attr("xmlns:r", namespace::OFC_RELATIONSHIPS)
            .attr("xmlns:p", namespace::PML_MAIN);
        {
            let mut c_sld = notes.start("p:cSld");
            let mut sp_tree = c_sld.start("p:spTree");
            write_root_group_properties(&mut sp_tree);

            let mut sp = sp_tree.start("p:sp");
            {
                let mut nv = sp.start("p:nvSpPr");
                nv.start("p:cNvPr")
                    .attr("id", "2")
                    .attr("name", "Notes Placeholder");
                nv.start("p:cNvSpPr")
                    .start("a:spLocks")
                    .attr("noGrp", "1");
                nv.start("p:nvPr")
                    .start("p:ph")
                    .attr("type", "body")
                    .attr("idx", "1");
            }
            sp.start("p:spPr");
            let mut body = sp.start("p:txBody");
            body.start("a:bodyPr");
            body.start("a:lstStyle");
            if paragraphs.is_empty() {
                body.start("a:p");
            }
            write_paragraphs(&mut body, &paragraphs, None)?;
        }
        notes
            .start("p:clrMapOvr")
            .start("a:masterClrMapping");
    }
    Ok(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::hyperlinks::Hyperlink;
    use crate::ooxml::pptx::shapes::{Shape, TextElement};

    #[test]
    fn test_empty_note_is_skipped() {
        assert!(render_notes(&Note::default()).is_none());
    }

    #[test]
    fn test_note_text_is_rendered() {
        let note = Note {
            shapes: vec![
                Shape::rich_text(
                    "Notes",
                    vec![Paragraph::new(vec![
                        TextElement::text("Remember <this>")
                            .with_hyperlink(Hyperlink::url("https://example.com")),
                    ])],
                ),
                Shape::drawing("Ignored", "image1.png"),
            ],
        };
        let xml = render_notes(&note).unwrap().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert!(xml.contains("<a:t>Remember &lt;this&gt;</a:t>"));
        assert!(!xml.contains("hlinkClick"));
        assert!(!xml.contains("image1.png"));
        assert!(xml.ends_with("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"));
    }

    #[test]
    fn test_non_text_note_gets_empty_paragraph() {
        let note = Note {
            shapes: vec![Shape::chart("Chart", "chart1.xml")],
        };
        let xml = render_notes(&note).unwrap().unwrap();
        assert!(xml.contains("<a:lstStyle/><a:p/></p:txBody>"));
    }
}
