use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::pagination::PageRequest;
use crate::videos::repo_types::{NewVideo, SharedVideo, SharedVideoRow, Video};

#[async_trait]
pub trait VideoRepo: Send + Sync {
    async fn create(&self, new: NewVideo) -> AppResult<Video>;
    /// One page of videos, newest first, plus the total video count.
    async fn list_page(&self, page: PageRequest) -> AppResult<(Vec<SharedVideo>, i64)>;
}

#[derive(Clone)]
pub struct PgVideoRepo {
    db: PgPool,
}

impl PgVideoRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoRepo for PgVideoRepo {
    async fn create(&self, new: NewVideo) -> AppResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, youtube_url, youtube_id, title, description, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, youtube_url, youtube_id, title, description, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.youtube_url)
        .bind(&new.youtube_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::Unauthorized("User not found".into())
            }
            e => AppError::Database(e),
        })?;
        Ok(video)
    }

    async fn list_page(&self, page: PageRequest) -> AppResult<(Vec<SharedVideo>, i64)> {
        let mut tx = self.db.begin().await?;
        // Count and page must see the same snapshot.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM videos"#)
            .fetch_one(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, SharedVideoRow>(
            r#"
            SELECT v.id, v.youtube_url, v.youtube_id, v.title, v.description, v.user_id,
                   v.created_at, v.updated_at,
                   u.email AS sharer_email,
                   u.created_at AS sharer_created_at,
                   u.updated_at AS sharer_updated_at
            FROM videos v
            JOIN users u ON u.id = v.user_id
            ORDER BY v.created_at DESC, v.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((rows.into_iter().map(SharedVideo::from).collect(), total))
    }
}
