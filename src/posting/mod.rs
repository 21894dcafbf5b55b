mod poster;
mod simulated;
mod submission;
mod types;

pub use poster::Poster;
pub use simulated::SimulatedPoster;
pub use submission::{Submission, SubmissionDraft, ValidationError};
pub use types::{
    Credentials, Platform, PlatformDescriptor, PostResult, PostStatus, MISSING_CREDENTIALS,
    UNKNOWN_PLATFORM,
};

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Routes each selected platform of a submission to its poster.
pub struct Dispatcher {
    posters: Vec<Box<dyn Poster>>,
}

impl Dispatcher {
    pub fn new(latency: Duration) -> Self {
        info!(
            "Dispatcher initialized with simulated posters ({}ms latency)",
            latency.as_millis()
        );

        let posters: Vec<Box<dyn Poster>> = Platform::ALL
            .into_iter()
            .map(|platform| Box::new(SimulatedPoster::new(platform, latency)) as Box<dyn Poster>)
            .collect();

        Self { posters }
    }

    #[cfg(test)]
    pub fn with_posters(posters: Vec<Box<dyn Poster>>) -> Self {
        Self { posters }
    }

    fn poster_for(&self, id: &str) -> Option<&dyn Poster> {
        let platform = Platform::from_id(id)?;
        self.posters
            .iter()
            .find(|poster| poster.platform() == platform)
            .map(|poster| poster.as_ref())
    }

    /// Posts to every platform of the submission, one after the other, and
    /// returns one result per platform in submission order.
    pub async fn dispatch(&self, submission: &Submission) -> Result<Vec<PostResult>> {
        info!(
            "Dispatching \"{}\" ({}) to {} platform(s)",
            submission.title,
            submission.video,
            submission.platforms.len()
        );

        let mut results = Vec::with_capacity(submission.platforms.len());

        for descriptor in &submission.platforms {
            let result = match self.poster_for(&descriptor.id) {
                Some(poster) => poster
                    .post(submission, descriptor.credentials())
                    .await
                    .with_context(|| format!("Posting to {} failed", poster.platform()))?,
                None => {
                    warn!("Unknown platform identifier: {}", descriptor.id);
                    PostResult::error(descriptor.name.clone(), UNKNOWN_PLATFORM)
                }
            };

            match result.status {
                PostStatus::Error => warn!(
                    "{}: {}",
                    result.platform,
                    result.message.as_deref().unwrap_or("failed")
                ),
                _ => info!("{}: {:?}", result.platform, result.status),
            }

            results.push(result);
        }

        Ok(results)
    }
}
