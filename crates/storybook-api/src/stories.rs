use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use storybook_db::models::StoryRow;
use storybook_db::share::new_share_id;
use storybook_types::api::{
    CreateStoryRequest, DeleteAllRequest, DeleteResponse, DeleteStoryRequest, StoryResponse,
};

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub owner: Option<String>,
}

pub async fn list_stories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require(query.owner, "owner is required")?;

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_by_owner(&owner))
        .await
        .map_err(join_error)??;

    let stories: Vec<StoryResponse> = rows.into_iter().map(story_response).collect();
    Ok(Json(stories))
}

pub async fn create_story(
    State(state): State<AppState>,
    Json(req): Json<CreateStoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require(req.owner, "owner is required")?;
    let story = require(req.story, "story is required")?;

    let id = Uuid::new_v4().to_string();
    let share_id = new_share_id();

    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || {
        db.db.insert_story(&id, &owner, &story, Some(&share_id))
    })
    .await
    .map_err(join_error)??;

    Ok((StatusCode::CREATED, Json(story_response(row))))
}

pub async fn delete_story(
    State(state): State<AppState>,
    Json(req): Json<DeleteStoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require(req.owner, "owner is required")?;
    let story = require(req.story, "story is required")?;

    // Zero matches is still a success; existence is not checked first.
    let db = state.clone();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_exact(&owner, &story))
        .await
        .map_err(join_error)??;

    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

pub async fn delete_all_stories(
    State(state): State<AppState>,
    Json(req): Json<DeleteAllRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = require(req.owner, "owner is required")?;

    let db = state.clone();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_all_for_owner(&owner))
        .await
        .map_err(join_error)??;

    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

pub async fn get_shared_story(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_by_share_id(&share_id))
        .await
        .map_err(join_error)??
        .ok_or(ApiError::NotFound)?;

    Ok(Json(story_response(row)))
}

fn require(field: Option<String>, msg: &'static str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::InvalidRequest(msg)),
    }
}

fn join_error(e: tokio::task::JoinError) -> ApiError {
    error!("spawn_blocking join error: {}", e);
    ApiError::Internal(e.into())
}

fn story_response(row: StoryRow) -> StoryResponse {
    StoryResponse {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt story id '{}': {}", row.id, e);
            Uuid::default()
        }),
        owner: row.owner,
        story: row.story,
        share_id: row.share_id,
        created_at: row
            .created_at
            .parse::<chrono::DateTime<chrono::Utc>>()
            .or_else(|_| {
                // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
                // Parse as naive UTC and convert.
                chrono::NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
                    .map(|ndt| ndt.and_utc())
            })
            .unwrap_or_else(|e| {
                warn!("Corrupt created_at '{}' on story '{}': {}", row.created_at, row.id, e);
                chrono::DateTime::default()
            }),
    }
}
