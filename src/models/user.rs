/// User model and collection operations
///
/// This module provides the User entity and CRUD operations against the
/// `users` collection. Each user carries `task_ids`, a denormalized list of
/// the ids of the tasks it owns; task creation and deletion rewrite that
/// list (see `routes::tasks`).
///
/// Ids are stored and compared as their string representation, so filters
/// always bind the hyphenated UUID string.
///
/// # Example
///
/// ```no_run
/// use taskhub::models::user::User;
/// use uuid::Uuid;
///
/// # async fn example(db: mongodb::Database) -> Result<(), mongodb::error::Error> {
/// let user = User {
///     user_id: Uuid::new_v4(),
///     username: "kajuma".to_string(),
///     full_name: None,
///     email: "kajuma@example.com".to_string(),
///     task_ids: Vec::new(),
/// };
///
/// User::insert(&db, &user).await?;
/// let found = User::find_by_id(&db, user.user_id).await?;
/// # Ok(())
/// # }
/// ```

use mongodb::{
    bson::{doc, Bson},
    options::ReturnDocument,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the backing collection
const COLLECTION: &str = "users";

/// User entity
///
/// `task_ids` holds the string ids of the tasks owned by this user, in
/// creation order. The list and the `tasks` collection are kept in sync by
/// handler code only; there is no enforcement in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4, generated server-side)
    pub user_id: Uuid,

    /// Display username
    pub username: String,

    /// Optional full name
    pub full_name: Option<String>,

    /// Email address
    pub email: String,

    /// Ids of tasks owned by this user, as strings
    pub task_ids: Vec<String>,
}

/// Input for updating an existing user
///
/// Carries the full set of mutable fields; an update replaces all three,
/// clearing `full_name` when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username
    pub username: String,

    /// New full name (None clears the field)
    pub full_name: Option<String>,

    /// New email address
    pub email: String,
}

impl User {
    fn collection(db: &Database) -> Collection<User> {
        db.collection(COLLECTION)
    }

    /// Inserts a new user document
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails
    pub async fn insert(db: &Database, user: &User) -> Result<(), mongodb::error::Error> {
        Self::collection(db).insert_one(user).await?;
        Ok(())
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(
        db: &Database,
        id: Uuid,
    ) -> Result<Option<Self>, mongodb::error::Error> {
        Self::collection(db)
            .find_one(doc! { "user_id": id.to_string() })
            .await
    }

    /// Updates a user's mutable fields
    ///
    /// Replaces `username`, `full_name` and `email` in one write; the
    /// `task_ids` list is untouched.
    ///
    /// # Returns
    ///
    /// The post-update user if found, None if the user doesn't exist
    pub async fn update(
        db: &Database,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, mongodb::error::Error> {
        let full_name = data.full_name.map(Bson::String).unwrap_or(Bson::Null);

        Self::collection(db)
            .find_one_and_update(
                doc! { "user_id": id.to_string() },
                doc! { "$set": {
                    "username": data.username,
                    "full_name": full_name,
                    "email": data.email,
                } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Deletes a user by ID
    ///
    /// # Returns
    ///
    /// True if a user was deleted, false if none existed
    pub async fn delete(db: &Database, id: Uuid) -> Result<bool, mongodb::error::Error> {
        let result = Self::collection(db)
            .delete_one(doc! { "user_id": id.to_string() })
            .await?;

        Ok(result.deleted_count > 0)
    }

    /// Replaces a user's entire `task_ids` list
    ///
    /// This is a whole-list write: callers read the current list, modify it
    /// in memory and write it back. Two concurrent callers can overwrite
    /// each other's change (see DESIGN.md).
    ///
    /// # Returns
    ///
    /// True if the user was found and updated, false otherwise
    pub async fn set_task_ids(
        db: &Database,
        id: Uuid,
        task_ids: &[String],
    ) -> Result<bool, mongodb::error::Error> {
        let result = Self::collection(db)
            .update_one(
                doc! { "user_id": id.to_string() },
                doc! { "$set": { "task_ids": task_ids.to_vec() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Finds the user whose `task_ids` list contains the given task id
    ///
    /// Matching a scalar against an array field is an array-containment
    /// query in MongoDB, so this is the reverse lookup from a task to its
    /// owning user.
    ///
    /// # Returns
    ///
    /// The owning user if any references the id, None otherwise
    pub async fn find_by_task_id(
        db: &Database,
        task_id: &str,
    ) -> Result<Option<Self>, mongodb::error::Error> {
        Self::collection(db)
            .find_one(doc! { "task_ids": task_id })
            .await
    }
}
