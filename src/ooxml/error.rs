//! Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// An identifier the content pass needs was never assigned by the
    /// relationship pass, or an animation targets a shape the slide
    /// does not contain.
    #[error("Structural defect: {0}")]
    StructuralDefect(String),

    /// A part path was written to the package sink twice
    #[error("Duplicate part: {0}")]
    DuplicatePart(String),

    /// Invalid writer configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl OoxmlError {
    pub(crate) fn defect(msg: impl Into<String>) -> Self {
        OoxmlError::StructuralDefect(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OoxmlError::defect("no relationship for shape 0badc0de");
        assert_eq!(
            err.to_string(),
            "Structural defect: no relationship for shape 0badc0de"
        );
        let err = OoxmlError::DuplicatePart("ppt/slides/slide1.xml".into());
        assert_eq!(err.to_string(), "Duplicate part: ppt/slides/slide1.xml");
    }

    #[test]
    fn test_every_variant_is_produced() {
        use crate::ooxml::opc::{MemorySink, PackageSink};
        use crate::ooxml::pptx::config::WriterConfig;

        let mut sink = MemorySink::new();
        sink.add_part("ppt/slides/slide1.xml", bytes::Bytes::new()).unwrap();
        let duplicate = sink
            .add_part("ppt/slides/slide1.xml", bytes::Bytes::new())
            .unwrap_err();
        let config = WriterConfig::from_yaml_str("dpi: 0\n").unwrap_err();

        for err in [OoxmlError::defect("x"), duplicate, config] {
            let kind = match err {
                OoxmlError::StructuralDefect(_) => "defect",
                OoxmlError::DuplicatePart(_) => "duplicate",
                OoxmlError::Config(_) => "config",
            };
            assert!(!kind.is_empty());
        }
    }
}
