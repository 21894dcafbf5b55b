use crate::{
    form::{FormState, FormSubmission},
    media::VideoSource,
    posting::PostResult,
    server::{ErrorResponse, PostResponse, POST_ROUTE},
};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info};
use url::Url;

/// Submits forms to a running crosspost server.
pub struct PostClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl PostClient {
    pub fn new(server: &Url) -> Result<Self> {
        let endpoint = server
            .join(POST_ROUTE)
            .with_context(|| format!("Invalid server URL: {}", server))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn send(&self, submission: &FormSubmission) -> Result<Vec<PostResult>> {
        info!(
            "Posting \"{}\" to {} platform(s) via {}",
            submission.title,
            submission.platforms.len(),
            self.endpoint
        );

        let form = build_form(submission).await?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .context("Failed to reach server")?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(anyhow::anyhow!(
                "Server rejected the submission ({}): {}",
                status,
                message
            ));
        }

        let body: PostResponse = response
            .json()
            .await
            .context("Failed to parse server response")?;
        Ok(body.results)
    }

    /// Sends a submission started with [`FormState::begin_submit`] and settles the form.
    pub async fn deliver(&self, form: &mut FormState, submission: FormSubmission) {
        match self.send(&submission).await {
            Ok(results) => form.complete(results),
            Err(e) => {
                error!("Error posting video: {:#}", e);
                form.fail();
            }
        }
    }
}

async fn build_form(submission: &FormSubmission) -> Result<Form> {
    let platforms = serde_json::to_string(&submission.platforms)
        .context("Failed to encode platforms")?;

    let form = match &submission.video {
        VideoSource::File(file) => {
            let path = file
                .path
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("No local path for video {}", file.name))?;
            let video = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open video file {}", path.display()))?;
            let size = video
                .metadata()
                .await
                .with_context(|| format!("Failed to stat video file {}", path.display()))?
                .len();
            debug!("Streaming {} ({} bytes)", file.name, size);
            let part = Part::stream_with_length(reqwest::Body::from(video), size)
                .file_name(file.name.clone());
            Form::new().part("video", part)
        }
        VideoSource::Url(url) => Form::new().text("videoUrl", url.clone()),
    };

    Ok(form
        .text("title", submission.title.clone())
        .text("description", submission.description.clone())
        .text("platforms", platforms))
}
