//! Audio and Video media support for PPTX presentations.
//!
//! This module provides the media payload carried by video and audio
//! shapes and the format/MIME detection used when the parts are written.

use std::path::Path;

use crate::ooxml::opc::constants::relationship_type;

/// Media type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Audio file (mp3, wav, etc.)
    Audio,
    /// Video file (mp4, wmv, etc.)
    Video,
}

impl MediaType {
    /// Get the relationship type URL of the linked media file.
    pub fn relationship_type(&self) -> &'static str {
        match self {
            MediaType::Audio => relationship_type::AUDIO,
            MediaType::Video => relationship_type::VIDEO,
        }
    }

    /// Element name of the `a:videoFile` / `a:audioFile` link in `p:nvPr`.
    pub(crate) fn file_element(&self) -> &'static str {
        match self {
            MediaType::Audio => "a:audioFile",
            MediaType::Video => "a:videoFile",
        }
    }

    /// Element name of the media node in the timing tree.
    pub(crate) fn timing_element(&self) -> &'static str {
        match self {
            MediaType::Audio => "p:audio",
            MediaType::Video => "p:video",
        }
    }
}

/// Audio/Video format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    /// MP3 audio
    Mp3,
    /// WAV audio
    Wav,
    /// WMA audio
    Wma,
    /// M4A audio
    M4a,
    /// MP4 video
    Mp4,
    /// Ogg video
    Ogv,
    /// WMV video
    Wmv,
    /// AVI video
    Avi,
    /// MOV video
    Mov,
    /// Unknown format
    Unknown,
}

impl MediaFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => MediaFormat::Mp3,
            "wav" => MediaFormat::Wav,
            "wma" => MediaFormat::Wma,
            "m4a" => MediaFormat::M4a,
            "mp4" => MediaFormat::Mp4,
            "ogv" => MediaFormat::Ogv,
            "wmv" => MediaFormat::Wmv,
            "avi" => MediaFormat::Avi,
            "mov" => MediaFormat::Mov,
            _ => MediaFormat::Unknown,
        }
    }

    /// Detect format from a file name or path.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(MediaFormat::Unknown, Self::from_extension)
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaFormat::Mp3 => "audio/mpeg",
            MediaFormat::Wav => "audio/wav",
            MediaFormat::Wma => "audio/x-ms-wma",
            MediaFormat::M4a => "audio/mp4",
            MediaFormat::Mp4 => "video/mp4",
            MediaFormat::Ogv => "video/ogg",
            MediaFormat::Wmv => "video/x-ms-wmv",
            MediaFormat::Avi => "video/avi",
            MediaFormat::Mov => "video/quicktime",
            MediaFormat::Unknown => "application/octet-stream",
        }
    }
}

/// Media file referenced by a video or audio shape.
///
/// `filename` is the indexed name of the file inside `ppt/media/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Media {
    pub filename: String,
}

impl Media {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn format(&self) -> MediaFormat {
        MediaFormat::from_filename(&self.filename)
    }

    pub fn mime_type(&self) -> &'static str {
        self.format().mime_type()
    }

    /// Poster frame image name: dots replaced by underscores plus `_bg.png`.
    pub fn thumbnail_filename(&self) -> String {
        format!("{}_bg.png", self.filename.replace('.', "_"))
    }
}
