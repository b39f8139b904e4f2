use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::PublicUser;
use crate::videos::repo_types::{SharedVideo, Video};

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub url: String,
}

/// `GET /videos?page=&per_page=`
#[derive(Debug, Default, Deserialize)]
pub struct ListVideosQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: Uuid,
    pub youtube_url: String,
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_sharer: Option<PublicUser>,
}

impl From<Video> for VideoResponse {
    fn from(v: Video) -> Self {
        Self {
            id: v.id,
            youtube_url: v.youtube_url,
            youtube_id: v.youtube_id,
            title: v.title,
            description: v.description,
            user_id: v.user_id,
            created_at: v.created_at,
            updated_at: v.updated_at,
            video_sharer: None,
        }
    }
}

impl From<SharedVideo> for VideoResponse {
    fn from(s: SharedVideo) -> Self {
        Self {
            video_sharer: Some(s.sharer),
            ..Self::from(s.video)
        }
    }
}
