use super::{Credentials, Platform, PostResult, Poster, Submission, MISSING_CREDENTIALS};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Stand-in for a real platform API client; nothing leaves the process.
pub struct SimulatedPoster {
    platform: Platform,
    latency: Duration,
}

impl SimulatedPoster {
    pub fn new(platform: Platform, latency: Duration) -> Self {
        Self { platform, latency }
    }
}

#[async_trait]
impl Poster for SimulatedPoster {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn post(
        &self,
        submission: &Submission,
        credentials: Credentials<'_>,
    ) -> Result<PostResult> {
        debug!(
            "Simulating {} upload of {} (description: {} chars)",
            self.platform,
            submission.video,
            submission.description.chars().count()
        );

        tokio::time::sleep(self.latency).await;

        let name = self.platform.display_name();

        if !credentials.is_complete() {
            return Ok(PostResult::error(name, MISSING_CREDENTIALS));
        }

        Ok(PostResult::success(
            name,
            format!(
                "Video \"{}\" would be posted to {}. (Demo mode - actual API integration required)",
                submission.title, name
            ),
        ))
    }
}
