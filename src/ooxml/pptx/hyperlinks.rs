//! Hyperlink support for PowerPoint presentations.
//!
//! This module provides types for working with hyperlinks in slides.

use crate::ooxml::opc::constants::relationship_type;

/// A hyperlink in a presentation.
///
/// Can link to external URLs, other slides, or email addresses. Two equal
/// hyperlinks on one slide share a single relationship entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hyperlink {
    /// External URL hyperlink
    External {
        /// URL to link to
        url: String,
        /// Optional tooltip text
        tooltip: Option<String>,
    },
    /// Internal slide hyperlink
    Slide {
        /// Slide number to link to (1-based)
        slide_number: usize,
        /// Optional tooltip text
        tooltip: Option<String>,
    },
    /// Email hyperlink
    Email {
        /// Email address
        email: String,
        /// Optional subject
        subject: Option<String>,
        /// Optional tooltip text
        tooltip: Option<String>,
    },
}

impl Hyperlink {
    /// Create an external URL hyperlink.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use litchi_slides::ooxml::pptx::Hyperlink;
    ///
    /// let link = Hyperlink::url("https://example.com");
    /// assert!(link.is_external());
    /// ```
    pub fn url(url: impl Into<String>) -> Self {
        Hyperlink::External {
            url: url.into(),
            tooltip: None,
        }
    }

    /// Create an external URL hyperlink with tooltip.
    pub fn url_with_tooltip(url: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Hyperlink::External {
            url: url.into(),
            tooltip: Some(tooltip.into()),
        }
    }

    /// Create a slide hyperlink.
    ///
    /// # Arguments
    /// * `slide_number` - 1-based slide number to link to
    pub fn slide(slide_number: usize) -> Self {
        Hyperlink::Slide {
            slide_number,
            tooltip: None,
        }
    }

    /// Create a slide hyperlink with tooltip.
    pub fn slide_with_tooltip(slide_number: usize, tooltip: impl Into<String>) -> Self {
        Hyperlink::Slide {
            slide_number,
            tooltip: Some(tooltip.into()),
        }
    }

    /// Create an email hyperlink.
    pub fn email(email: impl Into<String>) -> Self {
        Hyperlink::Email {
            email: email.into(),
            subject: None,
            tooltip: None,
        }
    }

    /// Create an email hyperlink with subject and tooltip.
    pub fn email_with_subject(
        email: impl Into<String>,
        subject: impl Into<String>,
        tooltip: Option<String>,
    ) -> Self {
        Hyperlink::Email {
            email: email.into(),
            subject: Some(subject.into()),
            tooltip,
        }
    }

    /// Relationship target: the literal URL for external links, the slide
    /// part name for internal ones.
    pub(crate) fn target(&self) -> String {
        match self {
            Hyperlink::External { url, .. } => url.clone(),
            Hyperlink::Slide { slide_number, .. } => format!("slide{}.xml", slide_number),
            Hyperlink::Email { email, subject, .. } => {
                if let Some(subj) = subject {
                    format!("mailto:{}?subject={}", email, subj)
                } else {
                    format!("mailto:{}", email)
                }
            },
        }
    }

    /// Relationship type URI for this link.
    pub(crate) fn reltype(&self) -> &'static str {
        match self {
            Hyperlink::Slide { .. } => relationship_type::SLIDE,
            Hyperlink::External { .. } | Hyperlink::Email { .. } => relationship_type::HYPERLINK,
        }
    }

    /// `action` attribute of the `a:hlinkClick` element, if any.
    pub(crate) fn action(&self) -> Option<&'static str> {
        match self {
            Hyperlink::Slide { .. } => Some("ppaction://hlinksldjump"),
            _ => None,
        }
    }

    /// Get the tooltip if present.
    pub fn tooltip(&self) -> Option<&str> {
        match self {
            Hyperlink::External { tooltip, .. } => tooltip.as_deref(),
            Hyperlink::Slide { tooltip, .. } => tooltip.as_deref(),
            Hyperlink::Email { tooltip, .. } => tooltip.as_deref(),
        }
    }

    /// Check if this is an external hyperlink.
    pub fn is_external(&self) -> bool {
        matches!(self, Hyperlink::External { .. } | Hyperlink::Email { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_hyperlink() {
        let link = Hyperlink::url("https://example.com");
        assert!(link.is_external());
        assert_eq!(link.target(), "https://example.com");
        assert_eq!(link.reltype(), relationship_type::HYPERLINK);
        assert_eq!(link.action(), None);
    }

    #[test]
    fn test_slide_hyperlink() {
        let link = Hyperlink::slide_with_tooltip(3, "Summary");
        assert!(!link.is_external());
        assert_eq!(link.target(), "slide3.xml");
        assert_eq!(link.reltype(), relationship_type::SLIDE);
        assert_eq!(link.action(), Some("ppaction://hlinksldjump"));
        assert_eq!(link.tooltip(), Some("Summary"));
    }

    #[test]
    fn test_email_hyperlink() {
        let link = Hyperlink::email("test@example.com");
        assert!(link.is_external());
        assert_eq!(link.target(), "mailto:test@example.com");
    }

    #[test]
    fn test_email_with_subject() {
        let link = Hyperlink::email_with_subject("test@example.com", "Hello", None);
        assert_eq!(link.target(), "mailto:test@example.com?subject=Hello");
    }
}
