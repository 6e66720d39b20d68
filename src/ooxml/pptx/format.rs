use bitflags::bitflags;

bitflags! {
    /// Character style switches of a text run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        const BOLD = 0x01;
        const ITALIC = 0x02;
        const UNDERLINE = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

/// Text formatting properties for runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextFormat {
    /// Font family
    pub font: Option<String>,
    /// Font size in hundredths of a point (`1800` = 18pt)
    pub size: Option<u32>,
    pub style: FontStyle,
    /// Text color in hex RGB (e.g., "FF0000" for red)
    pub color: Option<String>,
}

impl TextFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the size in whole points.
    pub fn with_size_pt(mut self, points: u32) -> Self {
        self.size = Some(points.saturating_mul(100));
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style |= style;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[inline]
    pub fn bold(&self) -> bool {
        self.style.contains(FontStyle::BOLD)
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.style.contains(FontStyle::ITALIC)
    }

    #[inline]
    pub fn underline(&self) -> bool {
        self.style.contains(FontStyle::UNDERLINE)
    }

    #[inline]
    pub fn strikethrough(&self) -> bool {
        self.style.contains(FontStyle::STRIKETHROUGH)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `algn` attribute of `a:pPr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
            Alignment::Justify => "just",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format_builder() {
        let format = TextFormat::new()
            .with_font("Calibri")
            .with_size_pt(18)
            .with_style(FontStyle::BOLD)
            .with_style(FontStyle::UNDERLINE)
            .with_color("FF0000");
        assert_eq!(format.size, Some(1800));
        assert!(format.bold());
        assert!(format.underline());
        assert!(!format.italic());
        assert!(!format.strikethrough());
        assert_eq!(format.font.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_alignment_values() {
        assert_eq!(Alignment::Center.as_str(), "ctr");
        assert_eq!(Alignment::Justify.as_str(), "just");
    }
}
