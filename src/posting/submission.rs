use super::types::PlatformDescriptor;
use crate::media::VideoSource;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Invalid platforms payload")]
    InvalidPlatforms,
    #[error("At least one platform must be selected")]
    NoPlatforms,
    #[error("Video file or URL is required")]
    MissingVideo,
}

/// Raw fields as they arrive from the form, before any checks.
#[derive(Debug, Default)]
pub struct SubmissionDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub platforms: Option<String>,
    pub video: Option<VideoSource>,
    pub video_url: Option<String>,
}

/// A submission that passed validation and can be dispatched.
#[derive(Debug, Clone)]
pub struct Submission {
    pub title: String,
    pub description: String,
    pub platforms: Vec<PlatformDescriptor>,
    pub video: VideoSource,
}

impl TryFrom<SubmissionDraft> for Submission {
    type Error = ValidationError;

    fn try_from(draft: SubmissionDraft) -> Result<Self, Self::Error> {
        let title = draft
            .title
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingTitle)?;

        let platforms = draft
            .platforms
            .as_deref()
            .and_then(decode_platforms)
            .ok_or(ValidationError::InvalidPlatforms)?;

        if platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }

        // An uploaded file takes precedence over a URL.
        let video = draft
            .video
            .or_else(|| draft.video_url.filter(|u| !u.is_empty()).map(VideoSource::Url))
            .ok_or(ValidationError::MissingVideo)?;

        Ok(Self {
            title,
            description: draft.description.unwrap_or_default(),
            platforms,
            video,
        })
    }
}

/// Reads the `platforms` field leniently. Only `id`, `name`, `apiKey` and
/// `accessToken` are looked at; anything missing, null or not a string reads
/// as empty. Fails only when the payload is not an array of objects.
fn decode_platforms(json: &str) -> Option<Vec<PlatformDescriptor>> {
    let entries: Vec<Map<String, Value>> = serde_json::from_str(json).ok()?;

    let text = |entry: &Map<String, Value>, key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(
        entries
            .iter()
            .map(|entry| PlatformDescriptor {
                id: text(entry, "id"),
                name: text(entry, "name"),
                icon: String::new(),
                enabled: true,
                api_key: text(entry, "apiKey"),
                access_token: text(entry, "accessToken"),
            })
            .collect(),
    )
}
