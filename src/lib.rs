//! Litchi Slides - PowerPoint slide part rendering
//!
//! This library turns an in-memory slide model into the parts of an Office
//! Open XML presentation: the slide markup, its relationships part, the
//! notes slide and the background media.
//!
//! # Features
//!
//! - **Two-pass rendering**: relationships are declared first and the
//!   resulting identifier maps drive the content pass, so every `r:id` in
//!   the slide resolves to an entry in the relationships part
//! - **Shapes**: pictures, video and audio, charts, tables, rich text and
//!   nested groups
//! - **Animations**: click-triggered entrance and exit effects, plus
//!   click-to-play timing for media
//! - **Parallel rendering**: slides render independently with rayon
//!
//! # Example
//!
//! ```rust
//! use litchi_slides::ooxml::opc::MemorySink;
//! use litchi_slides::ooxml::pptx::{Animation, EffectDirection, Shape, Slide, WriterConfig};
//! use litchi_slides::ooxml::pptx::write_presentation;
//!
//! let mut slide = Slide::new();
//! let clip = Shape::video("Intro", "video1.mp4");
//! let title = Shape::drawing("Title", "image1.png");
//! slide.add_animation(
//!     Animation::new()
//!         .with_shape(&title)
//!         .with_filter("fade")
//!         .with_direction(EffectDirection::In)
//!         .with_duration(2),
//! );
//! slide.add_shape(clip);
//! slide.add_shape(title);
//!
//! let mut sink = MemorySink::new();
//! let rendered = write_presentation(&[slide], &WriterConfig::default(), &mut sink)?;
//! assert!(rendered[0].slide_xml.contains("<p:timing>"));
//! assert!(sink.contains("ppt/slides/slide1.xml"));
//! # Ok::<(), litchi_slides::ooxml::OoxmlError>(())
//! ```

pub mod common;
pub mod ooxml;

pub use ooxml::pptx::{Shape, Slide, WriterConfig, render_slide, write_presentation, write_slide};
pub use ooxml::{OoxmlError, Result};
