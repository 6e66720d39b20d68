//! Shape tree of a slide.
//!
//! A [`Shape`] is a closed set of kinds ([`ShapeKind`]) plus the properties
//! every shape has: name, description, geometry and an optional hyperlink.
//! Groups own child shapes; tables and rich text own paragraphs of text
//! elements. The tree is read-only while a slide is rendered.

use chrono::NaiveDateTime;

use crate::ooxml::pptx::format::{Alignment, TextFormat};
use crate::ooxml::pptx::hyperlinks::Hyperlink;
use crate::ooxml::pptx::identity::ShapeHash;
use crate::ooxml::pptx::media::{Media, MediaType};

/// Position and size in pixels, rotation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub offset_x: i64,
    pub offset_y: i64,
    pub width: i64,
    pub height: i64,
    pub rotation: i32,
}

impl Geometry {
    pub fn new(offset_x: i64, offset_y: i64, width: i64, height: i64) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
            rotation: 0,
        }
    }

    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    pub name: String,
    pub description: String,
    pub geometry: Geometry,
    pub hyperlink: Option<Hyperlink>,
    pub kind: ShapeKind,
}

/// Kind-specific content of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Picture stored in `ppt/media/`
    Drawing(Drawing),
    Video(Media),
    Audio(Media),
    /// Chart part stored in `ppt/charts/`
    Chart(Chart),
    Table(Table),
    RichText(RichText),
    Group(Group),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Drawing {
    /// Indexed file name inside `ppt/media/`
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chart {
    /// Indexed part name inside `ppt/charts/`
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Group {
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RichText {
    pub paragraphs: Vec<Paragraph>,
}

/// Table with explicit column widths (pixels). An empty `columns` list
/// splits the table width evenly across the widest row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Table {
    pub columns: Vec<i64>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableRow {
    /// Row height in pixels
    pub height: i64,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

/// Review comment anchored to a slide. Comments live in their own part and
/// produce no markup in the slide body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub author: String,
    pub initials: String,
    pub text: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub elements: Vec<TextElement>,
}

/// Content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextElement {
    /// Plain text with the inherited formatting
    Text {
        text: String,
        hyperlink: Option<Hyperlink>,
    },
    /// Text with explicit formatting
    Run {
        text: String,
        format: TextFormat,
        hyperlink: Option<Hyperlink>,
    },
    Break,
}

impl TextElement {
    pub fn text(text: impl Into<String>) -> Self {
        TextElement::Text {
            text: text.into(),
            hyperlink: None,
        }
    }

    pub fn run(text: impl Into<String>, format: TextFormat) -> Self {
        TextElement::Run {
            text: text.into(),
            format,
            hyperlink: None,
        }
    }

    /// Attach a hyperlink. Line breaks cannot carry one and are returned unchanged.
    pub fn with_hyperlink(mut self, link: Hyperlink) -> Self {
        match &mut self {
            TextElement::Text { hyperlink, .. } | TextElement::Run { hyperlink, .. } => {
                *hyperlink = Some(link);
            },
            TextElement::Break => {},
        }
        self
    }

    #[inline]
    pub fn hyperlink(&self) -> Option<&Hyperlink> {
        match self {
            TextElement::Text { hyperlink, .. } | TextElement::Run { hyperlink, .. } => {
                hyperlink.as_ref()
            },
            TextElement::Break => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextElement::Text { text, .. } | TextElement::Run { text, .. } => Some(text),
            TextElement::Break => None,
        }
    }
}

impl Paragraph {
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self {
            alignment: None,
            elements,
        }
    }

    /// Single plain-text paragraph.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![TextElement::text(text)])
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Concatenated text, line breaks rendered as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element.as_text() {
                Some(text) => out.push_str(text),
                None => out.push('\n'),
            }
        }
        out
    }
}

impl Shape {
    fn with_kind(name: impl Into<String>, kind: ShapeKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            geometry: Geometry::default(),
            hyperlink: None,
            kind,
        }
    }

    pub fn drawing(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            ShapeKind::Drawing(Drawing {
                filename: filename.into(),
            }),
        )
    }

    pub fn video(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::with_kind(name, ShapeKind::Video(Media::new(filename)))
    }

    pub fn audio(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::with_kind(name, ShapeKind::Audio(Media::new(filename)))
    }

    pub fn chart(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            ShapeKind::Chart(Chart {
                filename: filename.into(),
            }),
        )
    }

    pub fn table(name: impl Into<String>, table: Table) -> Self {
        Self::with_kind(name, ShapeKind::Table(table))
    }

    pub fn rich_text(name: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self::with_kind(name, ShapeKind::RichText(RichText { paragraphs }))
    }

    pub fn group(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self::with_kind(name, ShapeKind::Group(Group { shapes }))
    }

    pub fn comment(comment: Comment) -> Self {
        Self::with_kind(String::new(), ShapeKind::Comment(comment))
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hyperlink(mut self, hyperlink: Hyperlink) -> Self {
        self.hyperlink = Some(hyperlink);
        self
    }

    /// Structural identity of this shape.
    #[inline]
    pub fn hash_code(&self) -> ShapeHash {
        ShapeHash::of(self)
    }

    /// Media payload and its type, for video and audio shapes.
    pub fn media(&self) -> Option<(MediaType, &Media)> {
        match &self.kind {
            ShapeKind::Video(media) => Some((MediaType::Video, media)),
            ShapeKind::Audio(media) => Some((MediaType::Audio, media)),
            _ => None,
        }
    }

    /// Child shapes of a group, empty for every other kind.
    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group(group) => &group.shapes,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, ShapeKind::Comment(_))
    }

    /// Whether this shape or any descendant is a comment.
    pub fn contains_comment(&self) -> bool {
        self.is_comment() || self.children().iter().any(Shape::contains_comment)
    }

    /// Paragraphs of a rich-text shape, or of every table cell in row order.
    pub fn paragraphs(&self) -> Box<dyn Iterator<Item = &Paragraph> + '_> {
        match &self.kind {
            ShapeKind::RichText(text) => Box::new(text.paragraphs.iter()),
            ShapeKind::Table(table) => Box::new(
                table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .flat_map(|cell| cell.paragraphs.iter()),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Pre-order walk over hyperlinks: the shape's own link, then those of
    /// its text elements, then those of its children. Comments contribute
    /// nothing since they are not drawn on the slide.
    pub fn collect_hyperlinks<'a>(&'a self, out: &mut Vec<&'a Hyperlink>) {
        if self.is_comment() {
            return;
        }
        if let Some(link) = &self.hyperlink {
            out.push(link);
        }
        for paragraph in self.paragraphs() {
            out.extend(paragraph.elements.iter().filter_map(TextElement::hyperlink));
        }
        for child in self.children() {
            child.collect_hyperlinks(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_depends_on_content() {
        let a = Shape::drawing("Logo", "image1.png");
        let b = Shape::drawing("Logo", "image1.png");
        let c = Shape::drawing("Logo", "image2.png");
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a.hash_code(), c.hash_code());
        let moved = a.clone().with_geometry(Geometry::new(1, 0, 0, 0));
        assert_ne!(a.hash_code(), moved.hash_code());
    }

    #[test]
    fn test_media_accessor() {
        let video = Shape::video("Clip", "video1.mp4");
        let (kind, media) = video.media().unwrap();
        assert_eq!(kind, MediaType::Video);
        assert_eq!(media.filename, "video1.mp4");
        assert!(Shape::chart("Chart", "chart1.xml").media().is_none());
    }

    #[test]
    fn test_hyperlinks_pre_order() {
        let text = Shape::rich_text(
            "Body",
            vec![Paragraph::new(vec![
                TextElement::text("a").with_hyperlink(Hyperlink::url("https://a.example")),
                TextElement::Break,
                TextElement::text("b").with_hyperlink(Hyperlink::slide(2)),
            ])],
        )
        .with_hyperlink(Hyperlink::url("https://own.example"));
        let group = Shape::group(
            "Group",
            vec![
                text,
                Shape::drawing("Pic", "image1.png").with_hyperlink(Hyperlink::slide(4)),
            ],
        );

        let mut links = Vec::new();
        group.collect_hyperlinks(&mut links);
        assert_eq!(
            links,
            [
                &Hyperlink::url("https://own.example"),
                &Hyperlink::url("https://a.example"),
                &Hyperlink::slide(2),
                &Hyperlink::slide(4),
            ]
        );
    }

    #[test]
    fn test_table_cell_hyperlinks() {
        let table = Table {
            columns: vec![],
            rows: vec![TableRow {
                height: 20,
                cells: vec![
                    TableCell::default(),
                    TableCell {
                        paragraphs: vec![Paragraph::new(vec![
                            TextElement::text("x").with_hyperlink(Hyperlink::email("a@b.c")),
                        ])],
                    },
                ],
            }],
        };
        let shape = Shape::table("Table", table);
        let mut links = Vec::new();
        shape.collect_hyperlinks(&mut links);
        assert_eq!(links, [&Hyperlink::email("a@b.c")]);
    }

    #[test]
    fn test_contains_comment_nested() {
        let comment = Comment {
            author: "Ann".into(),
            initials: "A".into(),
            text: "check".into(),
            date: NaiveDateTime::default(),
        };
        let nested = Shape::group(
            "Outer",
            vec![Shape::group("Inner", vec![Shape::comment(comment)])],
        );
        assert!(nested.contains_comment());
        assert!(!Shape::drawing("Pic", "a.png").contains_comment());
    }

    #[test]
    fn test_plain_text() {
        let p = Paragraph::new(vec![
            TextElement::text("one"),
            TextElement::Break,
            TextElement::run("two", TextFormat::new().with_size_pt(12)),
        ]);
        assert_eq!(p.plain_text(), "one\ntwo");
        assert!(TextElement::Break.with_hyperlink(Hyperlink::slide(1)).hyperlink().is_none());
    }
}
