//! REST boundary
//!
//! The wire contract is intentionally small: two collections, no auth
//! headers, no pagination, no versioning. DELETE is no-op-safe and always
//! answers 204.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use uuid::Uuid;

use activityhub_core::{Activity, ActivityDraft, ActivityUpdate, Student, StudentDraft};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/api/activities/:id",
            put(update_activity).delete(delete_activity),
        )
        .route("/api/users", get(list_users).post(create_user))
        .with_state(state)
}

async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    Json(state.hub.engine.activities())
}

async fn create_activity(
    State(state): State<AppState>,
    Json(draft): Json<ActivityDraft>,
) -> Result<Json<Activity>, ApiError> {
    Ok(Json(state.hub.engine.create(draft)?))
}

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<ActivityUpdate>,
) -> Result<Json<Activity>, ApiError> {
    Ok(Json(state.hub.engine.edit(id, &updates)?))
}

async fn delete_activity(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    // Filter-based removal: unknown ids still answer 204
    let _ = state.hub.engine.remove(id);
    StatusCode::NO_CONTENT
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<Student>> {
    Json(state.hub.identity.students())
}

async fn create_user(
    State(state): State<AppState>,
    Json(draft): Json<StudentDraft>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.hub.identity.register_student(draft)?))
}
