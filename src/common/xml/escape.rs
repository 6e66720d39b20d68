use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| AhoCorasick::new(["&", "<", ">", "\"", "'"]).ok());

const REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use litchi_slides::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_xml_into(s, &mut out);
    out
}

/// Escape `s` and append it to `out` without an intermediate allocation.
///
/// C0 control characters other than tab, line feed and carriage return
/// cannot appear in XML 1.0 and are dropped.
pub fn escape_xml_into(s: &str, out: &mut String) {
    match XML_ESCAPER.as_ref() {
        Some(escaper) => {
            let mut last = 0;
            for m in escaper.find_iter(s) {
                push_legal(&s[last..m.start()], out);
                out.push_str(REPLACEMENTS[m.pattern().as_usize()]);
                last = m.end();
            }
            push_legal(&s[last..], out);
        },
        None => {
            for ch in s.chars() {
                match ch {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    '"' => out.push_str("&quot;"),
                    '\'' => out.push_str("&apos;"),
                    _ if is_illegal_control(ch) => {},
                    _ => out.push(ch),
                }
            }
        },
    }
}

#[inline]
fn is_illegal_control(ch: char) -> bool {
    ch < ' ' && !matches!(ch, '\t' | '\n' | '\r')
}

fn push_legal(segment: &str, out: &mut String) {
    if segment.bytes().any(|b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r')) {
        out.extend(segment.chars().filter(|&ch| !is_illegal_control(ch)));
    } else {
        out.push_str(segment);
    }
}
