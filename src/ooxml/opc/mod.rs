//! Open Packaging Conventions (OPC) building blocks for writing parts.
//!
//! This module provides the pieces of the OPC specification the slide
//! writers need:
//!
//! - Relationship type and namespace constants
//! - Ordered relationship collections serialized to `.rels` parts
//! - A write-only package sink that receives finished parts
pub mod constants;
pub mod rel;
pub mod sink;

// Re-export commonly used types
pub use rel::{RelId, Relationship, Relationships};
pub use sink::{MemorySink, PackageSink};
