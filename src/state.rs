use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::users::repo::{PgUserRepo, UserRepo};
use crate::videos::repo::{PgVideoRepo, VideoRepo};
use crate::videos::youtube::{VideoMetadataClient, YoutubeClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub videos: Arc<dyn VideoRepo>,
    pub metadata: Arc<dyn VideoMetadataClient>,
}

impl AppState {
    /// Connect to the database, apply migrations and wire the real clients.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run database migrations")?;

        let metadata = Arc::new(YoutubeClient::new(&config.youtube)?) as Arc<dyn VideoMetadataClient>;

        Ok(Self::from_parts(
            config,
            Arc::new(PgUserRepo::new(db.clone())),
            Arc::new(PgVideoRepo::new(db)),
            metadata,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        videos: Arc<dyn VideoRepo>,
        metadata: Arc<dyn VideoMetadataClient>,
    ) -> Self {
        Self {
            config,
            users,
            videos,
            metadata,
        }
    }
}
