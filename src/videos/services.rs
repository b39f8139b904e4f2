use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    pagination::{PageRequest, Paginated, Pagination},
    videos::{
        dto::CreateVideoRequest,
        repo::VideoRepo,
        repo_types::{NewVideo, SharedVideo, Video},
        youtube::{parse_video_id, VideoMetadataClient, VideoSnippet},
    },
};

/// Resolve the video id and snippet behind `url`.
///
/// The URL is checked before any network call is made.
pub async fn video_info(
    metadata: &dyn VideoMetadataClient,
    url: &str,
) -> AppResult<(String, VideoSnippet)> {
    let youtube_id = parse_video_id(url).ok_or_else(|| {
        warn!(%url, "invalid youtube url");
        AppError::BadRequest("Invalid YouTube URL".into())
    })?;

    let snippet = metadata
        .fetch_snippet(youtube_id)
        .await
        .map_err(|e| {
            error!(error = %e, %youtube_id, "fetching video metadata failed");
            AppError::Upstream("Error fetching video data".into())
        })?
        .ok_or_else(|| {
            warn!(%youtube_id, "video snippet not found");
            AppError::NotFound("Video snippet not found".into())
        })?;

    Ok((youtube_id.to_string(), snippet))
}

/// Share a YouTube link on behalf of `user_id`.
pub async fn create(
    videos: &dyn VideoRepo,
    metadata: &dyn VideoMetadataClient,
    user_id: Uuid,
    req: CreateVideoRequest,
) -> AppResult<Video> {
    let url = req.url.trim();
    if url.is_empty() {
        return Err(AppError::BadRequest("url should not be empty".into()));
    }

    let (youtube_id, snippet) = video_info(metadata, url).await?;
    let video = videos
        .create(NewVideo {
            youtube_url: req.url,
            youtube_id,
            title: snippet.title,
            description: snippet.description,
            user_id,
        })
        .await?;

    info!(video_id = %video.id, youtube_id = %video.youtube_id, %user_id, "video shared");
    Ok(video)
}

pub async fn find_many(videos: &dyn VideoRepo, page: PageRequest) -> AppResult<Paginated<SharedVideo>> {
    let (data, total) = videos.list_page(page).await?;
    Ok(Paginated {
        data,
        pagination: Pagination::new(page, total),
    })
}
