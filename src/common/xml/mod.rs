//! XML output primitives shared by the part writers.

mod escape;
pub mod writer;

pub use escape::{escape_xml, escape_xml_into};
pub use writer::{Element, XmlWriter};
