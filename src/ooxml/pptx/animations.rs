//! Click-triggered entrance and exit animations.
//!
//! An [`Animation`] groups shapes that share one effect. The first shape
//! of an animation starts on a mouse click; the others start with it.
//! Shapes are referenced by identity, so an animation can be built before
//! or after the shapes are placed on the slide.

use phf::phf_map;

use crate::ooxml::pptx::identity::ShapeHash;
use crate::ooxml::pptx::shapes::Shape;

/// Preset effect IDs keyed by filter family (the part before `(`).
static FILTER_PRESETS: phf::Map<&'static str, u32> = phf_map! {
    "blinds" => 3,
    "box" => 4,
    "checkerboard" => 5,
    "circle" => 6,
    "diamond" => 8,
    "dissolve" => 9,
    "fade" => 10,
    "slide" => 12,
    "plus" => 13,
    "randombar" => 14,
    "barn" => 16,
    "strips" => 18,
    "wedge" => 20,
    "wheel" => 21,
    "wipe" => 22,
};

/// Preset ID of the "Appear" effect, used when the filter is unknown.
const APPEAR_PRESET: u32 = 1;

/// Direction of an animation effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectDirection {
    /// Entrance: the shape becomes visible
    In,
    /// Exit: the shape is hidden at the end of the effect
    #[default]
    Out,
}

impl EffectDirection {
    /// Value of the `transition` attribute of `p:animEffect`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectDirection::In => "in",
            EffectDirection::Out => "out",
        }
    }

    /// Value of the `presetClass` attribute.
    pub fn preset_class(&self) -> &'static str {
        match self {
            EffectDirection::In => "entr",
            EffectDirection::Out => "exit",
        }
    }

    /// Visibility the shape holds once the effect has run.
    pub fn held_visibility(&self) -> &'static str {
        match self {
            EffectDirection::In => "visible",
            EffectDirection::Out => "hidden",
        }
    }
}

/// Animation applied to one or more shapes.
///
/// # Examples
///
/// ```rust
/// use litchi_slides::ooxml::pptx::{Animation, EffectDirection, Shape};
///
/// let logo = Shape::drawing("Logo", "image1.png");
/// let mut animation = Animation::new()
///     .with_filter("fade")
///     .with_direction(EffectDirection::In)
///     .with_duration(2);
/// animation.add_shape(&logo);
/// assert_eq!(animation.shapes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    shapes: Vec<ShapeHash>,
    filter: String,
    direction: EffectDirection,
    /// Effect duration in seconds
    duration: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            filter: "wipe(down)".to_string(),
            direction: EffectDirection::Out,
            duration: 30,
        }
    }
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference `shape` by its current identity.
    pub fn add_shape(&mut self, shape: &Shape) -> &mut Self {
        self.shapes.push(shape.hash_code());
        self
    }

    pub fn with_shape(mut self, shape: &Shape) -> Self {
        self.add_shape(shape);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_direction(mut self, direction: EffectDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    #[inline]
    pub fn shapes(&self) -> &[ShapeHash] {
        &self.shapes
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn direction(&self) -> EffectDirection {
        self.direction
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Effect duration in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration.saturating_mul(1000)
    }

    /// Delay before the visibility change is applied. Exit effects switch
    /// to hidden one millisecond before the effect ends.
    pub fn visibility_delay_ms(&self) -> u32 {
        match self.direction {
            EffectDirection::In => 0,
            EffectDirection::Out => self.duration_ms().saturating_sub(1),
        }
    }

    /// Preset effect ID derived from the filter family.
    pub fn preset_id(&self) -> u32 {
        let family = self
            .filter
            .split_once('(')
            .map_or(self.filter.as_str(), |(family, _)| family)
            .trim();
        FILTER_PRESETS
            .get(family)
            .copied()
            .unwrap_or(APPEAR_PRESET)
    }
}
