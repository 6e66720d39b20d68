//! Slide model consumed by the slide writer.

use crate::ooxml::pptx::animations::Animation;
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::identity::ShapeHash;
use crate::ooxml::pptx::shapes::Shape;
use crate::ooxml::pptx::transitions::SlideTransition;

/// Speaker notes of a slide. Only text shapes are written to the notes part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub shapes: Vec<Shape>,
}

impl Note {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// A slide: a shape tree plus the slide-level properties written with it.
///
/// # Examples
///
/// ```rust
/// use litchi_slides::ooxml::pptx::{Animation, Shape, Slide};
///
/// let mut slide = Slide::new();
/// let logo = Shape::drawing("Logo", "image1.png");
/// let mut fade_out = Animation::new().with_filter("fade");
/// fade_out.add_shape(&logo);
/// slide.add_shape(logo);
/// slide.add_animation(fade_out);
/// assert_eq!(slide.shapes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub shapes: Vec<Shape>,
    pub background: Option<SlideBackground>,
    pub note: Note,
    /// 1-based slide layout number; `None` uses the configured default
    pub layout: Option<u32>,
    pub transition: Option<SlideTransition>,
    pub animations: Vec<Animation>,
    /// Hidden slides are skipped during the slide show
    pub visible: bool,
}

impl Default for Slide {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            background: None,
            note: Note::default(),
            layout: None,
            transition: None,
            animations: Vec::new(),
            visible: true,
        }
    }
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape and return its identity.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeHash {
        let hash = shape.hash_code();
        self.shapes.push(shape);
        hash
    }

    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    pub fn add_note_shape(&mut self, shape: Shape) {
        self.note.shapes.push(shape);
    }

    pub fn with_layout(mut self, layout: u32) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_background(mut self, background: SlideBackground) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_transition(mut self, transition: SlideTransition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Whether any shape at any depth is a comment.
    pub fn has_comments(&self) -> bool {
        self.shapes.iter().any(Shape::contains_comment)
    }

    /// Whether any direct child is a video or audio shape.
    pub fn has_media(&self) -> bool {
        self.shapes.iter().any(|shape| shape.media().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::Comment;
    use chrono::NaiveDateTime;

    #[test]
    fn test_new_slide_defaults() {
        let slide = Slide::new();
        assert!(slide.visible);
        assert!(slide.layout.is_none());
        assert!(slide.note.is_empty());
        assert!(!slide.has_media());
        assert!(!slide.has_comments());
    }

    #[test]
    fn test_add_shape_returns_identity() {
        let mut slide = Slide::new();
        let shape = Shape::chart("Sales", "chart1.xml");
        let expected = shape.hash_code();
        assert_eq!(slide.add_shape(shape), expected);
    }

    #[test]
    fn test_media_only_counts_direct_children() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::group(
            "Group",
            vec![Shape::audio("Sound", "audio1.mp3")],
        ));
        assert!(!slide.has_media());
        slide.add_shape(Shape::audio("Sound", "audio1.mp3"));
        assert!(slide.has_media());
    }

    #[test]
    fn test_comments_detected_in_groups() {
        let mut slide = Slide::new().hidden().with_layout(2);
        slide.add_shape(Shape::group(
            "Group",
            vec![Shape::comment(Comment {
                author: "Bo".into(),
                initials: "B".into(),
                text: "typo".into(),
                date: NaiveDateTime::default(),
            })],
        ));
        assert!(slide.has_comments());
        assert!(!slide.visible);
        assert_eq!(slide.layout, Some(2));
    }
}
