/// Task CRUD endpoints
///
/// # Endpoints
///
/// - `POST /task/:user_id` - Create a task under an existing user
/// - `GET /task/:task_id` - Fetch a task
/// - `PUT /task/:task_id` - Replace a task's payload
/// - `DELETE /task/:task_id` - Delete a task and unlink it from its owner
///
/// Create and delete perform two store writes each: one on the owning
/// user's `task_ids` list and one on the `tasks` collection. The pair is
/// not atomic and the list write is a whole-list replacement, so a failure
/// or a concurrent writer between the two calls can leave the list and the
/// collection out of sync. Both gaps are intentional, documented behavior
/// (see DESIGN.md).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    models::{task::Task, user::User},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

const USER_NOT_FOUND: &str = "The user you are looking for was not found.";
const TASK_NOT_FOUND: &str = "The task you are looking for was not found.";

/// Request body for creating or updating a task
///
/// `task_data` must be a JSON object; any other JSON value is rejected at
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskBody {
    /// Opaque key-value payload
    pub task_data: Map<String, Value>,
}

/// Fetch a task by id
///
/// # Errors
///
/// - 404 Not Found: no task with this id
/// - 500 Internal Server Error: store failure
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(Json(task))
}

/// Create a task under an existing user
///
/// The path parameter is the owning user's id. Assigns the task a fresh
/// UUID, appends it to the user's `task_ids`, then inserts the task
/// document. When the user is absent nothing is written.
///
/// # Example Request
///
/// ```json
/// {
///   "task_data": { "id": 1, "title": "Hello World", "message": "Good Morning" }
/// }
/// ```
///
/// # Errors
///
/// - 404 Not Found: no user with this id
/// - 422 Unprocessable Entity: task_data is not a JSON object
/// - 500 Internal Server Error: store failure
pub async fn create_task(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<TaskBody>,
) -> ApiResult<Json<Task>> {
    let mut user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    let task = Task {
        task_id: Uuid::new_v4(),
        user_id,
        task_data: body.task_data,
    };

    // First write: link the id on the user. A failure in the second write
    // below leaves this id dangling.
    user.task_ids.push(task.task_id.to_string());
    User::set_task_ids(&state.db, user_id, &user.task_ids).await?;

    // Second write: persist the task itself.
    Task::insert(&state.db, &task).await?;

    tracing::info!(task_id = %task.task_id, user_id = %user_id, "Task created");
    Ok(Json(task))
}

/// Replace a task's payload
///
/// # Errors
///
/// - 404 Not Found: no task with this id
/// - 422 Unprocessable Entity: task_data is not a JSON object
/// - 500 Internal Server Error: store failure
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<TaskBody>,
) -> ApiResult<Json<Task>> {
    let task = Task::update(&state.db, task_id, body.task_data)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(Json(task))
}

/// Delete a task and unlink it from its owner
///
/// The owner is located by reverse lookup: the user whose `task_ids` list
/// contains this id. A task document that no user references cannot be
/// deleted through this endpoint and yields 404 (see DESIGN.md).
///
/// # Errors
///
/// - 404 Not Found: no user's task list references this id
/// - 500 Internal Server Error: store failure
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let task_id_str = task_id.to_string();

    let mut owner = User::find_by_task_id(&state.db, &task_id_str)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    // First write: unlink the id from the owner's list.
    owner.task_ids.retain(|id| id != &task_id_str);
    User::set_task_ids(&state.db, owner.user_id, &owner.task_ids).await?;

    // Second write: drop the task document.
    Task::delete(&state.db, task_id).await?;

    tracing::info!(task_id = %task_id, user_id = %owner.user_id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
