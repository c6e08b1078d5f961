pub mod error;
pub mod health;
pub mod stories;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use storybook_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/story", get(stories::list_stories))
        .route("/story", post(stories::create_story))
        .route("/story", delete(stories::delete_story))
        .route("/story/all", delete(stories::delete_all_stories))
        .route("/story/shared/{share_id}", get(stories::get_shared_story))
        .with_state(state)
}
