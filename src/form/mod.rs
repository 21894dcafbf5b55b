//! Client-side form state: platform toggles and credentials, the selected
//! video, metadata, and the statuses shown after a submission.
//!
//! The browser page served at `/` keeps the same state in JavaScript; this is
//! the version driven by the `post` subcommand.

use crate::{
    media::{VideoFile, VideoSource},
    posting::{Platform, PlatformDescriptor, PostResult},
};
use std::fmt;
use thiserror::Error;

pub const FAILED_TO_POST: &str = "Failed to post video";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enable at least one platform")]
    NoPlatformEnabled,
    #[error("Please upload a video or provide a video URL")]
    MissingVideo,
    #[error("Please enter a title")]
    MissingTitle,
    #[error("A submission is already in progress")]
    AlreadyPosting,
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ApiKey,
    AccessToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Display names of the platforms that were enabled when the submission started.
    Posting { platforms: Vec<String> },
}

/// What gets sent to the server: only the enabled platforms.
#[derive(Debug, Clone)]
pub struct FormSubmission {
    pub title: String,
    pub description: String,
    pub platforms: Vec<PlatformDescriptor>,
    pub video: VideoSource,
}

#[derive(Debug, Clone)]
pub struct FormState {
    platforms: Vec<PlatformDescriptor>,
    video: Option<VideoSource>,
    title: String,
    description: String,
    phase: Phase,
    statuses: Vec<PostResult>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            platforms: Platform::ALL.iter().map(Platform::descriptor).collect(),
            video: None,
            title: String::new(),
            description: String::new(),
            phase: Phase::Idle,
            statuses: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn platforms(&self) -> &[PlatformDescriptor] {
        &self.platforms
    }

    #[cfg(test)]
    pub fn video(&self) -> Option<&VideoSource> {
        self.video.as_ref()
    }

    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_posting(&self) -> bool {
        matches!(self.phase, Phase::Posting { .. })
    }

    pub fn statuses(&self) -> &[PostResult] {
        &self.statuses
    }

    fn platform_mut(&mut self, id: &str) -> Result<&mut PlatformDescriptor, FormError> {
        self.platforms
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| FormError::UnknownPlatform(id.to_string()))
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, FormError> {
        let platform = self.platform_mut(id)?;
        platform.enabled = !platform.enabled;
        Ok(platform.enabled)
    }

    pub fn set_credential(
        &mut self,
        id: &str,
        field: CredentialField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let platform = self.platform_mut(id)?;
        match field {
            CredentialField::ApiKey => platform.api_key = value.into(),
            CredentialField::AccessToken => platform.access_token = value.into(),
        }
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Picks a file, replacing any URL.
    pub fn select_file(&mut self, file: VideoFile) {
        self.video = Some(VideoSource::File(file));
    }

    /// Sets the video URL, replacing any file. An empty URL leaves no source.
    pub fn set_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.video = if url.is_empty() {
            None
        } else {
            Some(VideoSource::Url(url))
        };
    }

    pub fn enabled_platforms(&self) -> impl Iterator<Item = &PlatformDescriptor> {
        self.platforms.iter().filter(|p| p.enabled)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.enabled_platforms().next().is_none() {
            return Err(FormError::NoPlatformEnabled);
        }
        if self.video.is_none() {
            return Err(FormError::MissingVideo);
        }
        if self.title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        Ok(())
    }

    /// Moves to posting, marks every enabled platform pending, and returns the payload.
    pub fn begin_submit(&mut self) -> Result<FormSubmission, FormError> {
        if self.is_posting() {
            return Err(FormError::AlreadyPosting);
        }
        self.validate()?;

        let video = self.video.clone().ok_or(FormError::MissingVideo)?;
        let platforms: Vec<PlatformDescriptor> = self.enabled_platforms().cloned().collect();

        self.statuses = platforms
            .iter()
            .map(|p| PostResult::pending(p.name.clone()))
            .collect();
        self.phase = Phase::Posting {
            platforms: platforms.iter().map(|p| p.name.clone()).collect(),
        };

        Ok(FormSubmission {
            title: self.title.clone(),
            description: self.description.clone(),
            platforms,
            video,
        })
    }

    /// Shows the server's results as returned, in its order.
    pub fn complete(&mut self, results: Vec<PostResult>) {
        self.statuses = results;
        self.phase = Phase::Idle;
    }

    /// Marks every platform of the in-flight submission as failed.
    pub fn fail(&mut self) {
        if let Phase::Posting { platforms } = std::mem::replace(&mut self.phase, Phase::Idle) {
            self.statuses = platforms
                .into_iter()
                .map(|name| PostResult::error(name, FAILED_TO_POST))
                .collect();
        }
    }
}

/// Renders the status list the way the page does, one block per platform.
pub struct StatusReport<'a>(pub &'a [PostResult]);

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.0 {
            writeln!(f, "{:<12} {}", result.platform, result.status)?;
            if let Some(message) = &result.message {
                writeln!(f, "             {}", message)?;
            }
        }
        Ok(())
    }
}
