//! Presentation-level slide writing.
//!
//! Slides are independent, so they are rendered in parallel. Parts are then
//! written to the sink sequentially in slide order, which keeps sink
//! implementations single-threaded and makes a failing slide abort the
//! package before anything is written.
use rayon::prelude::*;

use crate::ooxml::error::Result;
use crate::ooxml::opc::PackageSink;
use crate::ooxml::pptx::config::WriterConfig;
use crate::ooxml::pptx::slide::Slide;
use crate::ooxml::pptx::writer::slide::{RenderedSlide, render_slide};

/// Below this many slides rendering stays on the calling thread.
const PARALLEL_THRESHOLD: usize = 4;

/// Render every slide and store the parts in `sink`.
///
/// Returns the rendered slides in order, so callers can register media
/// content types and presentation-level relationships.
pub fn write_presentation<S: PackageSink + ?Sized>(
    slides: &[Slide],
    config: &WriterConfig,
    sink: &mut S,
) -> Result<Vec<RenderedSlide>> {
    config.validate()?;

    let rendered: Vec<RenderedSlide> = if slides.len() >= PARALLEL_THRESHOLD {
        let results: Vec<Result<RenderedSlide>> = slides
            .par_iter()
            .enumerate()
            .map(|(index, slide)| render_slide(slide, index, config))
            .collect();
        results.into_iter().collect::<Result<Vec<_>>>()?
    } else {
        slides
            .iter()
            .enumerate()
            .map(|(index, slide)| render_slide(slide, index, config))
            .collect::<Result<Vec<_>>>()?
    };

    for slide in &rendered {
        slide.write_into(sink)?;
    }

    tracing::debug!(slides = rendered.len(), "presentation slides written");
    Ok(rendered)
}
