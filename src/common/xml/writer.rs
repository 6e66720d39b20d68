//! Scoped XML element builder.
//!
//! [`XmlWriter::start`] opens an element and returns an [`Element`] guard.
//! The guard closes the element when it goes out of scope, so nested
//! markup is balanced by construction. Attributes are written while the
//! start tag is still pending; an element that receives no children or
//! text is closed as an empty-element tag (`<a:off x="0" y="0"/>`).
//!
//! ```
//! use litchi_slides::common::xml::XmlWriter;
//!
//! let mut w = XmlWriter::new();
//! {
//!     let mut par = w.start("p:par");
//!     par.start("p:cTn").attr("id", "3").attr("fill", "hold");
//! }
//! assert_eq!(w.finish(), r#"<p:par><p:cTn id="3" fill="hold"/></p:par>"#);
//! ```

use std::ops::{Deref, DerefMut};

use super::escape::escape_xml_into;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Append-only XML text buffer.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    /// The innermost start tag has not been terminated with `>` yet.
    pending: bool,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            pending: false,
            depth: 0,
        }
    }

    /// Write the standalone UTF-8 XML declaration.
    pub fn declaration(&mut self) {
        self.buf.push_str(XML_DECLARATION);
        self.buf.push('\n');
    }

    /// Open `name` and return the guard that closes it.
    pub fn start(&mut self, name: &'static str) -> Element<'_> {
        self.seal();
        self.buf.push('<');
        self.buf.push_str(name);
        self.pending = true;
        self.depth += 1;
        Element { writer: self, name }
    }

    /// Write escaped character data into the current element.
    pub fn text(&mut self, text: &str) {
        self.seal();
        escape_xml_into(text, &mut self.buf);
    }

    /// Current nesting depth; zero when every element has been closed.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed XML element");
        self.buf
    }

    #[inline]
    fn seal(&mut self) {
        if self.pending {
            self.buf.push('>');
            self.pending = false;
        }
    }
}

/// Guard for an open element. Derefs to the writer so children can be
/// started from it; writes the end tag on drop.
pub struct Element<'w> {
    writer: &'w mut XmlWriter,
    name: &'static str,
}

impl Element<'_> {
    /// Add an attribute to the pending start tag.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        debug_assert!(
            self.writer.pending,
            "attribute `{key}` written after content of <{}>",
            self.name
        );
        let buf = &mut self.writer.buf;
        buf.push(' ');
        buf.push_str(key);
        buf.push_str("=\"");
        escape_xml_into(value, buf);
        buf.push('"');
        self
    }

    /// Add an integer attribute.
    pub fn attr_int<I: itoa::Integer>(&mut self, key: &str, value: I) -> &mut Self {
        let mut buffer = itoa::Buffer::new();
        let formatted = buffer.format(value);
        self.attr(key, formatted)
    }

    /// Add an attribute only when `value` is present.
    pub fn attr_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.attr(key, value);
        }
        self
    }

    /// Add a `"1"` flag attribute when `flag` is set.
    pub fn attr_flag(&mut self, key: &str, flag: bool) -> &mut Self {
        if flag {
            self.attr(key, "1");
        }
        self
    }
}

impl Deref for Element<'_> {
    type Target = XmlWriter;

    fn deref(&self) -> &XmlWriter {
        &*self.writer
    }
}

impl DerefMut for Element<'_> {
    fn deref_mut(&mut self) -> &mut XmlWriter {
        &mut *self.writer
    }
}

impl Drop for Element<'_> {
    fn drop(&mut self) {
        let w = &mut *self.writer;
        if w.pending {
            w.buf.push_str("/>");
            w.pending = false;
        } else {
            w.buf.push_str("</");
            w.buf.push_str(self.name);
            w.buf.push('>');
        }
        w.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element() {
        let mut w = XmlWriter::new();
        w.start("a:off").attr_int("x", 0).attr_int("y", -12);
        assert_eq!(w.finish(), r#"<a:off x="0" y="-12"/>"#);
    }

    #[test]
    fn test_nested_elements_close_in_order() {
        let mut w = XmlWriter::new();
        {
            let mut outer = w.start("p:par");
            {
                let mut ctn = outer.start("p:cTn");
                ctn.attr_int("id", 2u32);
                ctn.start("p:stCondLst").start("p:cond").attr("delay", "0");
            }
            outer.start("p:childTnLst");
        }
        assert_eq!(w.depth(), 0);
        assert_eq!(
            w.finish(),
            r#"<p:par><p:cTn id="2"><p:stCondLst><p:cond delay="0"/></p:stCondLst></p:cTn><p:childTnLst/></p:par>"#
        );
    }

    #[test]
    fn test_text_and_attribute_escaping() {
        let mut w = XmlWriter::new();
        {
            let mut t = w.start("a:t");
            t.attr("title", "\"quoted\" & more");
            t.text("1 < 2");
        }
        assert_eq!(
            w.finish(),
            r#"<a:t title="&quot;quoted&quot; &amp; more">1 &lt; 2</a:t>"#
        );
    }

    #[test]
    fn test_optional_attributes() {
        let mut w = XmlWriter::new();
        w.start("a:hlinkClick")
            .attr("r:id", "rId3")
            .attr_opt("tooltip", None)
            .attr_opt("action", Some("ppaction://media"))
            .attr_flag("highlightClick", false)
            .attr_flag("endSnd", true);
        assert_eq!(
            w.finish(),
            r#"<a:hlinkClick r:id="rId3" action="ppaction://media" endSnd="1"/>"#
        );
    }

    #[test]
    fn test_declaration() {
        let mut w = XmlWriter::with_capacity(64);
        w.declaration();
        w.start("root");
        let xml = w.finish();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.ends_with("\n<root/>"));
    }
}
