//! Write-only destination for package parts.
//!
//! Part writers hand finished payloads to a [`PackageSink`] keyed by part
//! path (`ppt/slides/slide1.xml`). Archive mechanics live behind the trait;
//! [`MemorySink`] keeps parts in memory, which is what tests and callers
//! that assemble the archive themselves use.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::ooxml::error::{OoxmlError, Result};

/// Destination for rendered package parts.
pub trait PackageSink {
    /// Store `data` under `partname`. Writing the same partname twice is an error.
    fn add_part(&mut self, partname: &str, data: Bytes) -> Result<()>;
}

/// In-memory part store ordered by partname.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    parts: BTreeMap<String, Bytes>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, partname: &str) -> Option<&Bytes> {
        self.parts.get(partname)
    }

    /// Part payload as UTF-8 text, if present and valid.
    pub fn get_str(&self, partname: &str) -> Option<&str> {
        self.parts
            .get(partname)
            .and_then(|data| std::str::from_utf8(data).ok())
    }

    #[inline]
    pub fn contains(&self, partname: &str) -> bool {
        self.parts.contains_key(partname)
    }

    pub fn partnames(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> BTreeMap<String, Bytes> {
        self.parts
    }
}

impl PackageSink for MemorySink {
    fn add_part(&mut self, partname: &str, data: Bytes) -> Result<()> {
        if self.parts.contains_key(partname) {
            return Err(OoxmlError::DuplicatePart(partname.to_string()));
        }
        tracing::trace!(partname, size = data.len(), "part stored");
        self.parts.insert(partname.to_string(), data);
        Ok(())
    }
}
