/// User CRUD endpoints
///
/// # Endpoints
///
/// - `POST /user` - Create a user
/// - `GET /user/:user_id` - Fetch a user
/// - `PUT /user/:user_id` - Replace a user's mutable fields
/// - `DELETE /user/:user_id` - Delete a user
///
/// Create and update share the same request body. User ids are always
/// generated server-side; a client can never supply one.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    models::user::{UpdateUser, User},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

const USER_NOT_FOUND: &str = "The user you are looking for was not found.";

/// Request body for creating or updating a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserBody {
    /// Display username
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    /// Optional full name
    #[validate(length(max = 128, message = "Full name must be at most 128 characters"))]
    pub full_name: Option<String>,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Fetch a user by id
///
/// # Errors
///
/// - 404 Not Found: no user with this id
/// - 500 Internal Server Error: store failure
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

/// Create a user
///
/// Assigns a fresh UUID and persists the user with an empty task list.
///
/// # Example Request
///
/// ```json
/// {
///   "username": "kajuma",
///   "full_name": "weak kajuma",
///   "email": "kajuma@example.com"
/// }
/// ```
///
/// # Errors
///
/// - 422 Unprocessable Entity: validation failed
/// - 500 Internal Server Error: store failure
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserBody>,
) -> ApiResult<Json<User>> {
    body.validate()?;

    let user = User {
        user_id: Uuid::new_v4(),
        username: body.username,
        full_name: body.full_name,
        email: body.email,
        task_ids: Vec::new(),
    };

    User::insert(&state.db, &user).await?;

    tracing::info!(user_id = %user.user_id, "User created");
    Ok(Json(user))
}

/// Replace a user's mutable fields
///
/// Full replacement of `username`, `full_name` and `email`; omitting
/// `full_name` clears it. The task list is never touched here.
///
/// # Errors
///
/// - 404 Not Found: no user with this id
/// - 422 Unprocessable Entity: validation failed
/// - 500 Internal Server Error: store failure
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserBody>,
) -> ApiResult<Json<User>> {
    body.validate()?;

    let data = UpdateUser {
        username: body.username,
        full_name: body.full_name,
        email: body.email,
    };

    let user = User::update(&state.db, user_id, data)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

/// Delete a user
///
/// Returns 204 whether or not the user existed. Tasks owned by the user
/// are left in place (see DESIGN.md).
///
/// # Errors
///
/// - 500 Internal Server Error: store failure
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = User::delete(&state.db, user_id).await?;

    tracing::debug!(user_id = %user_id, deleted, "User delete");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_body_validation() {
        let valid = UserBody {
            username: "kajuma".to_string(),
            full_name: Some("weak kajuma".to_string()),
            email: "kajuma@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let no_full_name = UserBody {
            full_name: None,
            ..valid.clone()
        };
        assert!(no_full_name.validate().is_ok());

        let bad_email = UserBody {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_username = UserBody {
            username: "".to_string(),
            ..valid.clone()
        };
        assert!(empty_username.validate().is_err());

        let long_username = UserBody {
            username: "a".repeat(65),
            ..valid
        };
        assert!(long_username.validate().is_err());
    }

    #[test]
    fn test_user_response_serialization() {
        let user = User {
            user_id: Uuid::new_v4(),
            username: "kajuma".to_string(),
            full_name: None,
            email: "kajuma@example.com".to_string(),
            task_ids: Vec::new(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "kajuma");
        assert_eq!(json["full_name"], serde_json::Value::Null);
        assert_eq!(json["task_ids"], serde_json::json!([]));
        assert_eq!(json["user_id"], user.user_id.to_string());
    }
}
