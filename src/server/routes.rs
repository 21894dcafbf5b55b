use super::{error::ApiError, AppState, PostResponse};
use crate::{
    media::{VideoFile, VideoSource},
    posting::{Platform, PlatformDescriptor, Submission, SubmissionDraft},
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

const INDEX_HTML: &str = include_str!("index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Seed list for the form: every supported platform, disabled, without credentials.
pub async fn list_platforms() -> Json<Vec<PlatformDescriptor>> {
    Json(Platform::ALL.iter().map(Platform::descriptor).collect())
}

pub async fn post_video(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    let draft = read_draft(multipart?).await?;
    let submission = Submission::try_from(draft)?;

    let results = state
        .dispatcher
        .dispatch(&submission)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(PostResponse { results }))
}

/// Collects the known form fields. The uploaded video is only measured, never kept.
async fn read_draft(mut multipart: Multipart) -> Result<SubmissionDraft, ApiError> {
    let mut draft = SubmissionDraft::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => draft.title = Some(field.text().await?),
            "description" => draft.description = Some(field.text().await?),
            "platforms" => draft.platforms = Some(field.text().await?),
            "videoUrl" => draft.video_url = Some(field.text().await?),
            "video" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut size = 0u64;
                while let Some(chunk) = field.chunk().await? {
                    size += chunk.len() as u64;
                }

                // Browsers send an empty, nameless part when no file was picked.
                if file_name.is_empty() && size == 0 {
                    continue;
                }

                debug!("Received video upload {} ({} bytes)", file_name, size);
                draft.video = Some(VideoSource::File(VideoFile {
                    name: file_name,
                    size,
                    path: None,
                }));
            }
            other => debug!("Ignoring form field: {}", other),
        }
    }

    Ok(draft)
}
