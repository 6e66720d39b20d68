//! Slide part rendering.
//!
//! [`render_slide`] runs both passes for one slide: the relationship pass
//! produces the `.rels` payload and the identifier maps, then the content
//! and timing writers consume those maps to produce the slide markup. The
//! result is a [`RenderedSlide`] holding every part the slide contributes;
//! nothing is written to a sink until rendering has succeeded.

use bytes::Bytes;

use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;
use crate::ooxml::opc::PackageSink;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::config::WriterConfig;
use crate::ooxml::pptx::shapes::Shape;
use crate::ooxml::pptx::slide::Slide;
use crate::ooxml::pptx::writer::notes::render_notes;
use crate::ooxml::pptx::writer::rels::assign_relationships;
use crate::ooxml::pptx::writer::relmap::SlideIdentifiers;
use crate::ooxml::pptx::writer::shape::{ShapeTreeWriter, write_root_group_properties};
use crate::ooxml::pptx::writer::timing::write_timing;

/// A media file referenced by the slide, with its MIME type for the
/// content types part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub partname: String,
    pub content_type: &'static str,
}

/// Every part produced by rendering one slide.
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    /// 0-based slide index
    pub index: usize,
    pub rels_xml: String,
    pub slide_xml: String,
    pub notes_xml: Option<String>,
    /// Image background part name and payload
    pub background: Option<(String, Bytes)>,
    pub media: Vec<MediaPart>,
    pub identifiers: SlideIdentifiers,
}

impl RenderedSlide {
    /// 1-based number used in part names.
    #[inline]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn slide_partname(&self) -> String {
        format!("ppt/slides/slide{}.xml", self.number())
    }

    pub fn rels_partname(&self) -> String {
        format!("ppt/slides/_rels/slide{}.xml.rels", self.number())
    }

    pub fn notes_partname(&self) -> String {
        format!("ppt/notesSlides/notesSlide{}.xml", self.number())
    }

    /// Store the slide's parts in `sink`.
    pub fn write_into<S: PackageSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.add_part(&self.rels_partname(), Bytes::from(self.rels_xml.clone()))?;
        sink.add_part(&self.slide_partname(), Bytes::from(self.slide_xml.clone()))?;
        if let Some(notes) = &self.notes_xml {
            sink.add_part(&self.notes_partname(), Bytes::from(notes.clone()))?;
        }
        if let Some((partname, data)) = &self.background {
            sink.add_part(partname, data.clone())?;
        }
        Ok(())
    }
}

/// Render the slide at `index` (0-based).
pub fn render_slide(slide: &Slide, index: usize, config: &WriterConfig) -> Result<RenderedSlide> {
    config.validate()?;
    let (rels, ids) = assign_relationships(slide, index, config)?;
    let slide_xml = write_slide_xml(slide, &ids, config)?;
    let notes_xml = render_notes(&slide.note).transpose()?;

    let background = slide.background.as_ref().and_then(|bg| match bg {
        SlideBackground::Image { data, .. } => bg
            .indexed_filename(index)
            .map(|filename| (format!("ppt/media/{}", filename), data.clone())),
        _ => None,
    });

    let mut media = Vec::new();
    collect_media_parts(&slide.shapes, &mut media);

    tracing::debug!(
        slide = index + 1,
        relationships = rels.len(),
        bytes = slide_xml.len(),
        notes = notes_xml.is_some(),
        "slide rendered"
    );

    Ok(RenderedSlide {
        index,
        rels_xml: rels.to_xml(),
        slide_xml,
        notes_xml,
        background,
        media,
        identifiers: ids,
    })
}

/// Render the slide at `index` and store its parts in `sink`.
pub fn write_slide<S: PackageSink + ?Sized>(
    slide: &Slide,
    index: usize,
    config: &WriterConfig,
    sink: &mut S,
) -> Result<RenderedSlide> {
    let rendered = render_slide(slide, index, config)?;
    rendered.write_into(sink)?;
    Ok(rendered)
}

fn write_slide_xml(slide: &Slide, ids: &SlideIdentifiers, config: &WriterConfig) -> Result<String> {
    let mut w = XmlWriter::with_capacity(4096);
    w.declaration();
    {
        let mut sld = w.start("p:sld");
        sld.attr("xmlns:a", namespace::DML_MAIN)
            .attr("xmlns:r", namespace::OFC_RELATIONSHIPS)
            .attr("xmlns:p", namespace::PML_MAIN);
        if !slide.visible {
            sld.attr("show", "0");
        }

        {
            let mut c_sld = sld.start("p:cSld");
            if let Some(background) = &slide.background {
                background.write_xml(&mut c_sld, ids.background_rel())?;
            }
            let mut sp_tree = c_sld.start("p:spTree");
            write_root_group_properties(&mut sp_tree);
            let mut shapes = ShapeTreeWriter::new(ids, config);
            shapes.write_slide_shapes(&mut sp_tree, &slide.shapes)?;
            shapes.finish()?;
        }

        sld.start("p:clrMapOvr").start("a:masterClrMapping");

        if let Some(transition) = &slide.transition {
            transition.write_xml(&mut sld);
        }
        write_timing(&mut sld, slide, ids, config)?;
    }
    Ok(w.finish())
}

fn collect_media_parts(shapes: &[Shape], out: &mut Vec<MediaPart>) {
    for shape in shapes {
        if let Some((_, media)) = shape.media() {
            let partname = format!("ppt/media/{}", media.filename);
            if !out.iter().any(|part| part.partname == partname) {
                out.push(MediaPart {
                    partname,
                    content_type: media.mime_type(),
                });
            }
        }
        collect_media_parts(shape.children(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::ooxml::error::OoxmlError;
    use crate::ooxml::opc::MemorySink;
    use crate::ooxml::opc::constants::relationship_type;
    use crate::ooxml::pptx::animations::Animation;
    use crate::ooxml::pptx::hyperlinks::Hyperlink;
    use crate::ooxml::pptx::shapes::{Comment, Paragraph, TextElement};
    use crate::ooxml::pptx::transitions::{SlideTransition, TransitionType};
    use chrono::NaiveDateTime;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    /// Parse `xml` to the end and return every relationship reference.
    fn relationship_refs(xml: &str) -> BTreeSet<String> {
        let mut reader = Reader::from_str(xml);
        let mut refs = BTreeSet::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    for attr in e.attributes() {
                        let attr = attr.unwrap();
                        let key = attr.key.as_ref();
                        if matches!(key, b"r:id" | b"r:embed" | b"r:link") && !attr.value.is_empty() {
                            refs.insert(String::from_utf8(attr.value.to_vec()).unwrap());
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("malformed XML at {}: {}", reader.buffer_position(), e),
            }
        }
        refs
    }

    fn rel_ids(rels_xml: &str) -> Vec<(String, String)> {
        let mut reader = Reader::from_str(rels_xml);
        let mut out = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                    let mut id = String::new();
                    let mut reltype = String::new();
                    for attr in e.attributes() {
                        let attr = attr.unwrap();
                        let value = String::from_utf8(attr.value.to_vec()).unwrap();
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Type" => reltype = value,
                            _ => {},
                        }
                    }
                    out.push((id, reltype));
                },
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("malformed rels: {}", e),
            }
        }
        out
    }

    fn sample_slide() -> Slide {
        let mut slide = Slide::new().with_background(SlideBackground::image(
            vec![0x89, b'P', b'N', b'G'],
            "png",
        ));
        let logo = Shape::drawing("Logo", "image1.png")
            .with_hyperlink(Hyperlink::url_with_tooltip("https://example.com", "Home"));
        slide.add_shape(Shape::video("Clip", "video1.mp4"));
        slide.add_shape(logo.clone());
        slide.add_shape(Shape::group(
            "Group",
            vec![
                Shape::chart("Chart", "chart1.xml"),
                Shape::audio("Sound", "audio1.mp3").with_hyperlink(Hyperlink::slide(3)),
                Shape::comment(Comment {
                    author: "Ana".into(),
                    initials: "A".into(),
                    text: "check".into(),
                    date: NaiveDateTime::default(),
                }),
            ],
        ));
        slide.add_shape(Shape::rich_text(
            "Body",
            vec![Paragraph::new(vec![
                TextElement::text("mail").with_hyperlink(Hyperlink::email("a@example.com")),
                TextElement::text("home").with_hyperlink(Hyperlink::url_with_tooltip(
                    "https://example.com",
                    "Home",
                )),
            ])],
        ));
        slide.add_note_shape(Shape::rich_text("Notes", vec![Paragraph::from_text("hi")]));
        slide.add_animation(Animation::new().with_shape(&logo));
        slide
    }

    #[test]
    fn test_every_reference_resolves() {
        let rendered = render_slide(&sample_slide(), 0, &WriterConfig::default()).unwrap();
        let refs = relationship_refs(&rendered.slide_xml);
        let entries = rel_ids(&rendered.rels_xml);

        let ids: Vec<String> = entries.iter().map(|(id, _)| id.clone()).collect();
        let expected: Vec<String> = (1..=entries.len()).map(|n| format!("rId{}", n)).collect();
        assert_eq!(ids, expected);

        let content_entries: BTreeSet<String> = entries
            .iter()
            .filter(|(_, reltype)| {
                !matches!(
                    reltype.as_str(),
                    relationship_type::SLIDE_LAYOUT
                        | relationship_type::NOTES_SLIDE
                        | relationship_type::COMMENTS
                )
            })
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(refs, content_entries);
        assert_eq!(entries.last().unwrap().1, relationship_type::SLIDE_LAYOUT);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let slide = sample_slide();
        let config = WriterConfig::default();
        let first = render_slide(&slide, 2, &config).unwrap();
        let second = render_slide(&slide, 2, &config).unwrap();
        assert_eq!(first.rels_xml, second.rels_xml);
        assert_eq!(first.slide_xml, second.slide_xml);
        assert_eq!(first.notes_xml, second.notes_xml);
    }

    #[test]
    fn test_video_with_run_link() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::video("Clip", "video1.mp4"));
        slide.add_shape(Shape::rich_text(
            "Link",
            vec![Paragraph::new(vec![
                TextElement::text("docs").with_hyperlink(Hyperlink::url("https://docs.example")),
            ])],
        ));
        let rendered = render_slide(&slide, 0, &WriterConfig::default()).unwrap();
        let entries = rel_ids(&rendered.rels_xml);
        let types: Vec<&str> = entries.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            types,
            [
                relationship_type::MEDIA,
                relationship_type::VIDEO,
                relationship_type::IMAGE,
                relationship_type::HYPERLINK,
                relationship_type::SLIDE_LAYOUT,
            ]
        );
        assert!(rendered.slide_xml.contains(r#"<a:videoFile r:link="rId1"/>"#));
        assert!(rendered.slide_xml.contains(r#"r:embed="rId2"/></p:ext>"#));
        assert!(rendered.rels_xml.contains(r#"TargetMode="External""#));
        assert!(rendered.slide_xml.contains("nodeType=\"interactiveSeq\""));
        assert_eq!(
            rendered.media,
            [MediaPart {
                partname: "ppt/media/video1.mp4".to_string(),
                content_type: "video/mp4",
            }]
        );
    }

    #[test]
    fn test_slide_envelope() {
        let slide = Slide::new()
            .hidden()
            .with_transition(SlideTransition::new(TransitionType::Fade));
        let rendered = render_slide(&slide, 0, &WriterConfig::default()).unwrap();
        let xml = &rendered.slide_xml;
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<p:sld "));
        assert!(xml.contains(r#" show="0">"#));
        assert!(xml.contains(r#"<p:cNvPr id="1" name=""/>"#));
        assert!(xml.contains("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr><p:transition"));
        assert!(!xml.contains("p:timing"));
        assert!(xml.ends_with("</p:sld>"));
        relationship_refs(xml);
    }

    #[test]
    fn test_write_slide_parts() {
        let mut sink = MemorySink::new();
        let rendered =
            write_slide(&sample_slide(), 1, &WriterConfig::default(), &mut sink).unwrap();
        assert_eq!(rendered.number(), 2);
        assert!(sink.contains("ppt/slides/slide2.xml"));
        assert!(sink.contains("ppt/slides/_rels/slide2.xml.rels"));
        assert!(sink.contains("ppt/notesSlides/notesSlide2.xml"));
        assert!(sink.contains("ppt/media/background_1.png"));
        assert_eq!(sink.len(), 4);

        let rels = sink.get_str("ppt/slides/_rels/slide2.xml.rels").unwrap();
        assert!(rels.contains("../media/background_1.png"));
        assert!(rels.contains("../comments/comment2.xml"));
        assert!(rels.contains("../notesSlides/notesSlide2.xml"));

        assert!(matches!(
            write_slide(&sample_slide(), 1, &WriterConfig::default(), &mut sink),
            Err(OoxmlError::DuplicatePart(_))
        ));
    }

    #[test]
    fn test_animation_of_nested_shape_fails_render() {
        let inner = Shape::drawing("Inner", "image1.png");
        let mut slide = Slide::new();
        slide.add_shape(Shape::group("Group", vec![inner.clone()]));
        slide.add_animation(Animation::new().with_shape(&inner));
        assert!(matches!(
            render_slide(&slide, 0, &WriterConfig::default()),
            Err(OoxmlError::StructuralDefect(_))
        ));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::drawing("Logo", "image1.png"));
        let config = WriterConfig {
            dpi: 0,
            ..Default::default()
        };
        assert!(matches!(
            render_slide(&slide, 0, &config),
            Err(OoxmlError::Config(_))
        ));
        let mut sink = MemorySink::new();
        assert!(write_slide(&slide, 0, &config, &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_shared_url_gets_entry_per_occurrence() {
        let rendered = render_slide(&sample_slide(), 0, &WriterConfig::default()).unwrap();
        let home = rendered
            .identifiers
            .hyperlink_rels()
            .filter(|(link, _)| link.target() == "https://example.com")
            .count();
        assert_eq!(home, 2);
    }
}
