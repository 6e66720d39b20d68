//! Slide background support for PowerPoint presentations.
//!
//! This module provides the background fills a slide can carry: a solid
//! color, a gradient, or an image stored as its own media part.

use bytes::Bytes;

use crate::common::unit::ANGLE_UNITS_PER_DEGREE;
use crate::common::xml::XmlWriter;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::RelId;

/// Background fill of a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideBackground {
    Solid {
        /// Hex RGB color, e.g. `"1F4E79"`
        color: String,
    },
    Gradient {
        gradient_type: GradientType,
        /// Direction of a linear gradient in degrees
        angle: Option<i32>,
        stops: Vec<GradientStop>,
    },
    /// Image stretched over the whole slide. The bytes are written to
    /// `ppt/media/background_<slide index>.<extension>`.
    Image { data: Bytes, extension: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientType {
    Linear,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientStop {
    /// Position along the gradient in percent (0..=100)
    pub position: u32,
    pub color: String,
}

impl GradientStop {
    pub fn new(position: u32, color: impl Into<String>) -> Self {
        Self {
            position: position.min(100),
            color: color.into(),
        }
    }
}

impl SlideBackground {
    pub fn solid(color: impl Into<String>) -> Self {
        SlideBackground::Solid {
            color: color.into(),
        }
    }

    pub fn linear_gradient(angle: i32, stops: Vec<GradientStop>) -> Self {
        SlideBackground::Gradient {
            gradient_type: GradientType::Linear,
            angle: Some(angle),
            stops,
        }
    }

    pub fn radial_gradient(stops: Vec<GradientStop>) -> Self {
        SlideBackground::Gradient {
            gradient_type: GradientType::Radial,
            angle: None,
            stops,
        }
    }

    pub fn image(data: impl Into<Bytes>, extension: impl Into<String>) -> Self {
        SlideBackground::Image {
            data: data.into(),
            extension: extension.into(),
        }
    }

    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, SlideBackground::Image { .. })
    }

    /// Name of the background media file for the slide at `slide_index` (0-based).
    pub(crate) fn indexed_filename(&self, slide_index: usize) -> Option<String> {
        match self {
            SlideBackground::Image { extension, .. } => {
                Some(format!("background_{}.{}", slide_index, extension))
            },
            _ => None,
        }
    }

    /// Write the `p:bg` element. Image backgrounds need the relationship
    /// assigned to the background media part.
    pub(crate) fn write_xml(&self, w: &mut XmlWriter, rel_id: Option<RelId>) -> Result<()> {
        let mut bg = w.start("p:bg");
        let mut bg_pr = bg.start("p:bgPr");

        match self {
            SlideBackground::Solid { color } => {
                bg_pr
                    .start("a:solidFill")
                    .start("a:srgbClr")
                    .attr("val", color);
            },
            SlideBackground::Gradient {
                gradient_type,
                angle,
                stops,
            } => {
                let mut grad = bg_pr.start("a:gradFill");
                grad.attr("rotWithShape", "1");
                {
                    let mut gs_lst = grad.start("a:gsLst");
                    for stop in stops {
                        let mut gs = gs_lst.start("a:gs");
                        gs.attr_int("pos", stop.position.min(100) * 1000);
                        gs.start("a:srgbClr").attr("val", &stop.color);
                    }
                }
                match gradient_type {
                    GradientType::Linear => {
                        let ang = i64::from(angle.unwrap_or(0)) * ANGLE_UNITS_PER_DEGREE;
                        grad.start("a:lin").attr_int("ang", ang).attr("scaled", "0");
                    },
                    GradientType::Radial => {
                        let mut path = grad.start("a:path");
                        path.attr("path", "circle");
                        path.start("a:fillToRect")
                            .attr("l", "50000")
                            .attr("t", "50000")
                            .attr("r", "50000")
                            .attr("b", "50000");
                    },
                }
            },
            SlideBackground::Image { .. } => {
                let rel_id = rel_id.ok_or_else(|| {
                    OoxmlError::defect("image background has no relationship")
                })?;
                let mut blip_fill = bg_pr.start("a:blipFill");
                blip_fill.attr("dpi", "0").attr("rotWithShape", "1");
                blip_fill.start("a:blip").attr("r:embed", &rel_id.to_string());
                blip_fill.start("a:srcRect");
                blip_fill.start("a:stretch").start("a:fillRect");
            },
        }

        bg_pr.start("a:effectLst");
        Ok(())
    }
}
