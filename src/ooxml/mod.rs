//! Office Open XML (OOXML) writing.
//!
//! Organized in layers:
//!
//! 1. **OPC layer** (`opc`): relationships, content constants and the
//!    package sink parts are written into
//! 2. **Errors** (`error`): the error type shared by every writer
//! 3. **PresentationML** (`pptx`): the slide model and the slide writers
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
