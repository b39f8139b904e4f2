use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthUser,
    error::AppResult,
    extract::{AppJson, AppQuery},
    pagination::{PageRequest, Paginated},
    state::AppState,
    videos::{
        dto::{CreateVideoRequest, ListVideosQuery, VideoResponse},
        services,
    },
};

pub fn video_routes() -> Router<AppState> {
    Router::new().route("/videos", get(list_videos).post(create_video))
}

#[instrument(skip(state, payload))]
pub async fn create_video(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<VideoResponse>)> {
    let video = services::create(
        state.videos.as_ref(),
        state.metadata.as_ref(),
        user_id,
        payload,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(VideoResponse::from(video))))
}

#[instrument(skip(state))]
pub async fn list_videos(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<ListVideosQuery>,
) -> AppResult<Json<Paginated<VideoResponse>>> {
    let page = PageRequest::new(q.page, q.per_page);
    let videos = services::find_many(state.videos.as_ref(), page).await?;
    Ok(Json(videos.map(VideoResponse::from)))
}
