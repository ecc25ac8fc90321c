//! Goal request handlers. All of them run behind `require_auth`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::auth::AuthenticatedUser;
use crate::goals::{
    errors::GoalError,
    types::{DeletedGoal, Goal, GoalRequest},
    GoalService,
};

/// `GET /api/goals`
pub async fn list_goals(
    State(service): State<Arc<GoalService>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Goal>>, GoalError> {
    Ok(Json(service.list(&user.id).await?))
}

/// `POST /api/goals`
pub async fn create_goal(
    State(service): State<Arc<GoalService>>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<GoalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Goal>), GoalError> {
    let Json(req) = body?;
    let goal = service.create(&user.id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// `PUT /api/goals/:id`
pub async fn update_goal(
    State(service): State<Arc<GoalService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<GoalRequest>, JsonRejection>,
) -> Result<Json<Goal>, GoalError> {
    let Json(req) = body?;
    Ok(Json(service.update(&user.id, &id, req).await?))
}

/// `DELETE /api/goals/:id`
pub async fn delete_goal(
    State(service): State<Arc<GoalService>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedGoal>, GoalError> {
    Ok(Json(service.delete(&user.id, &id).await?))
}
