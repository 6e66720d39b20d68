//! PowerPoint (.pptx) slide writing.
//!
//! The model ([`Slide`], [`Shape`], [`Animation`], ...) is built by the
//! caller and rendered into slide parts by the [`writer`] module:
//!
//! ```rust
//! use litchi_slides::ooxml::opc::MemorySink;
//! use litchi_slides::ooxml::pptx::{Hyperlink, Shape, Slide, WriterConfig, write_slide};
//!
//! let mut slide = Slide::new();
//! slide.add_shape(
//!     Shape::drawing("Logo", "image1.png").with_hyperlink(Hyperlink::url("https://example.com")),
//! );
//!
//! let mut sink = MemorySink::new();
//! let rendered = write_slide(&slide, 0, &WriterConfig::default(), &mut sink)?;
//! assert!(rendered.slide_xml.contains(r#"<a:blip r:embed="rId1"/>"#));
//! assert!(sink.contains("ppt/slides/_rels/slide1.xml.rels"));
//! # Ok::<(), litchi_slides::ooxml::OoxmlError>(())
//! ```

pub mod animations;
pub mod backgrounds;
pub mod config;
pub mod format;
pub mod hyperlinks;
pub mod identity;
pub mod media;
pub mod shapes;
pub mod slide;
pub mod transitions;
pub mod writer;

pub use animations::{Animation, EffectDirection};
pub use backgrounds::{GradientStop, GradientType, SlideBackground};
pub use config::WriterConfig;
pub use format::{Alignment, FontStyle, TextFormat};
pub use hyperlinks::Hyperlink;
pub use identity::ShapeHash;
pub use media::{Media, MediaFormat, MediaType};
pub use shapes::{
    Chart, Comment, Drawing, Geometry, Group, Paragraph, RichText, Shape, ShapeKind, Table,
    TableCell, TableRow, TextElement,
};
pub use slide::{Note, Slide};
pub use transitions::{
    Orientation, SlideTransition, TransitionDirection, TransitionSpeed, TransitionType,
    ZoomDirection,
};
pub use writer::{
    MediaPart, RenderedSlide, SlideIdentifiers, assign_relationships, render_slide, write_presentation,
    write_slide,
};
