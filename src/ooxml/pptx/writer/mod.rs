//! Slide part writers for PPTX.
//!
//! Each slide is written in two passes. [`rels::assign_relationships`]
//! declares the slide's relationships and returns the identifier maps;
//! the content, notes and timing writers read those maps and never assign
//! identifiers themselves.

mod notes;
pub mod pres;
pub mod relmap;
pub mod rels;
mod shape;
pub mod slide;
mod timing;

pub use pres::write_presentation;
pub use relmap::SlideIdentifiers;
pub use rels::assign_relationships;
pub use slide::{MediaPart, RenderedSlide, render_slide, write_slide};
