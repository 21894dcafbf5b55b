use std::{fmt, path::PathBuf};

use crate::utils::format_megabytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub name: String,
    pub size: u64,
    /// Set when the file was picked from the local disk and still has to be uploaded.
    pub path: Option<PathBuf>,
}

/// Where the submitted video comes from. Exactly one kind per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    File(VideoFile),
    Url(String),
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSource::File(file) => {
                write!(f, "file {} ({})", file.name, format_megabytes(file.size))
            }
            VideoSource::Url(url) => write!(f, "url {}", url),
        }
    }
}
