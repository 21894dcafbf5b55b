use super::{Credentials, Platform, PostResult, Submission};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Poster: Send + Sync {
    /// Platform this poster publishes to
    fn platform(&self) -> Platform;

    /// Publish the submission with the given credentials.
    ///
    /// Rejections by the platform are reported as an error [`PostResult`];
    /// `Err` is reserved for faults that should abort the whole request.
    async fn post(&self, submission: &Submission, credentials: Credentials<'_>)
        -> Result<PostResult>;
}
