//! Slide transition effects for PowerPoint presentations.
//!
//! This module provides types for slide transitions, including transition
//! types, speeds, directions and advance behaviour, and writes the
//! `p:transition` block of a slide.

use crate::common::xml::XmlWriter;

/// Transition effect types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    None,
    Cut,
    Fade,
    Push { direction: TransitionDirection },
    Wipe { direction: TransitionDirection },
    Cover { direction: TransitionDirection },
    Pull { direction: TransitionDirection },
    Split { orientation: Orientation },
    Blinds { orientation: Orientation },
    Checker { orientation: Orientation },
    RandomBars { orientation: Orientation },
    Zoom { direction: ZoomDirection },
    Wheel { spokes: u8 },
    Dissolve,
    Circle,
    Diamond,
    Plus,
    Wedge,
    Newsflash,
    Random,
}

/// Side an edge-driven transition comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Left,
    Right,
    Up,
    Down,
}

impl TransitionDirection {
    fn as_str(self) -> &'static str {
        match self {
            TransitionDirection::Left => "l",
            TransitionDirection::Right => "r",
            TransitionDirection::Up => "u",
            TransitionDirection::Down => "d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horz",
            Orientation::Vertical => "vert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Transition speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSpeed {
    Slow,
    Medium,
    Fast,
}

impl TransitionSpeed {
    /// Get duration in milliseconds for this speed.
    pub fn duration_ms(&self) -> u32 {
        match self {
            TransitionSpeed::Slow => 1500,
            TransitionSpeed::Medium => 1000,
            TransitionSpeed::Fast => 500,
        }
    }

    pub(crate) fn to_xml_value(self) -> &'static str {
        match self {
            TransitionSpeed::Slow => "slow",
            TransitionSpeed::Medium => "med",
            TransitionSpeed::Fast => "fast",
        }
    }
}

/// Transition between the previous slide and this one.
///
/// # Examples
///
/// ```rust
/// use litchi_slides::ooxml::pptx::{SlideTransition, TransitionSpeed, TransitionType};
///
/// let transition = SlideTransition::new(TransitionType::Fade)
///     .with_speed(TransitionSpeed::Fast)
///     .with_advance_after_ms(3000);
/// assert_eq!(transition.advance_after_ms, Some(3000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTransition {
    pub transition_type: TransitionType,
    pub speed: TransitionSpeed,
    /// Advance to the next slide on mouse click
    pub advance_on_click: bool,
    /// Advance automatically after this many milliseconds
    pub advance_after_ms: Option<u32>,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self {
            transition_type: TransitionType::None,
            speed: TransitionSpeed::Medium,
            advance_on_click: true,
            advance_after_ms: None,
        }
    }
}

impl SlideTransition {
    pub fn new(transition_type: TransitionType) -> Self {
        Self {
            transition_type,
            ..Default::default()
        }
    }

    pub fn with_speed(mut self, speed: TransitionSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_advance_on_click(mut self, advance: bool) -> Self {
        self.advance_on_click = advance;
        self
    }

    pub fn with_advance_after_ms(mut self, delay_ms: u32) -> Self {
        self.advance_after_ms = Some(delay_ms);
        self
    }

    /// Write the `p:transition` element.
    pub(crate) fn write_xml(&self, w: &mut XmlWriter) {
        let mut transition = w.start("p:transition");
        transition.attr("spd", self.speed.to_xml_value());
        if !self.advance_on_click {
            transition.attr("advClick", "0");
        }
        if let Some(after) = self.advance_after_ms {
            transition.attr_int("advTm", after);
        }

        match self.transition_type {
            TransitionType::None => {},
            TransitionType::Cut => {
                transition.start("p:cut");
            },
            TransitionType::Fade => {
                transition.start("p:fade");
            },
            TransitionType::Push { direction } => {
                transition.start("p:push").attr("dir", direction.as_str());
            },
            TransitionType::Wipe { direction } => {
                transition.start("p:wipe").attr("dir", direction.as_str());
            },
            TransitionType::Cover { direction } => {
                transition.start("p:cover").attr("dir", direction.as_str());
            },
            TransitionType::Pull { direction } => {
                transition.start("p:pull").attr("dir", direction.as_str());
            },
            TransitionType::Split { orientation } => {
                transition
                    .start("p:split")
                    .attr("orient", orientation.as_str())
                    .attr("dir", "out");
            },
            TransitionType::Blinds { orientation } => {
                transition.start("p:blinds").attr("dir", orientation.as_str());
            },
            TransitionType::Checker { orientation } => {
                transition.start("p:checker").attr("dir", orientation.as_str());
            },
            TransitionType::RandomBars { orientation } => {
                transition.start("p:randomBar").attr("dir", orientation.as_str());
            },
            TransitionType::Zoom { direction } => {
                let dir = match direction {
                    ZoomDirection::In => "in",
                    ZoomDirection::Out => "out",
                };
                transition.start("p:zoom").attr("dir", dir);
            },
            TransitionType::Wheel { spokes } => {
                transition.start("p:wheel").attr_int("spokes", spokes.max(1));
            },
            TransitionType::Dissolve => {
                transition.start("p:dissolve");
            },
            TransitionType::Circle => {
                transition.start("p:circle");
            },
            TransitionType::Diamond => {
                transition.start("p:diamond");
            },
            TransitionType::Plus => {
                transition.start("p:plus");
            },
            TransitionType::Wedge => {
                transition.start("p:wedge");
            },
            TransitionType::Newsflash => {
                transition.start("p:newsflash");
            },
            TransitionType::Random => {
                transition.start("p:random");
            },
        }
    }
}
