use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::PublicUser;

/// Video record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub youtube_url: String,
    pub youtube_id: String, // always 11 chars
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub youtube_url: String,
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
}

/// A video joined with the user who shared it.
#[derive(Debug, Clone)]
pub struct SharedVideo {
    pub video: Video,
    pub sharer: PublicUser,
}

/// Flat row of the `videos JOIN users` listing query.
#[derive(Debug, FromRow)]
pub struct SharedVideoRow {
    #[sqlx(flatten)]
    pub video: Video,
    pub sharer_email: String,
    pub sharer_created_at: OffsetDateTime,
    pub sharer_updated_at: OffsetDateTime,
}

impl From<SharedVideoRow> for SharedVideo {
    fn from(r: SharedVideoRow) -> Self {
        let sharer = PublicUser {
            id: r.video.user_id,
            email: r.sharer_email,
            created_at: r.sharer_created_at,
            updated_at: r.sharer_updated_at,
        };
        Self {
            video: r.video,
            sharer,
        }
    }
}
