/// Task model and collection operations
///
/// Tasks live in the `tasks` collection and carry an opaque JSON object as
/// their payload. The owning user is recorded twice: as `user_id` here and
/// as an entry in the owner's `task_ids` list.

use mongodb::{bson::doc, options::ReturnDocument, Collection, Database};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

const COLLECTION: &str = "tasks";

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID (UUID v4, generated server-side)
    pub task_id: Uuid,

    /// ID of the owning user
    pub user_id: Uuid,

    /// Opaque key-value payload
    pub task_data: Map<String, Value>,
}

impl Task {
    fn collection(db: &Database) -> Collection<Task> {
        db.collection(COLLECTION)
    }

    /// Inserts a new task document
    pub async fn insert(db: &Database, task: &Task) -> Result<(), mongodb::error::Error> {
        Self::collection(db).insert_one(task).await?;
        Ok(())
    }

    /// Finds a task by ID
    pub async fn find_by_id(
        db: &Database,
        id: Uuid,
    ) -> Result<Option<Self>, mongodb::error::Error> {
        Self::collection(db)
            .find_one(doc! { "task_id": id.to_string() })
            .await
    }

    /// Replaces a task's payload
    ///
    /// # Returns
    ///
    /// The post-update task if found, None if the task doesn't exist
    pub async fn update(
        db: &Database,
        id: Uuid,
        task_data: Map<String, Value>,
    ) -> Result<Option<Self>, mongodb::error::Error> {
        let task_data = mongodb::bson::to_bson(&task_data)?;

        Self::collection(db)
            .find_one_and_update(
                doc! { "task_id": id.to_string() },
                doc! { "$set": { "task_data": task_data } },
            )
            .return_document(ReturnDocument::After)
            .await
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if a task was deleted, false if none existed
    pub async fn delete(db: &Database, id: Uuid) -> Result<bool, mongodb::error::Error> {
        let result = Self::collection(db)
            .delete_one(doc! { "task_id": id.to_string() })
            .await?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_bson_round_trip() {
        let mut task_data = Map::new();
        task_data.insert("title".to_string(), json!("Hello World"));
        task_data.insert("message".to_string(), json!("Good Morning"));

        let task = Task {
            task_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            task_data,
        };

        let doc = mongodb::bson::to_document(&task).unwrap();
        assert_eq!(doc.get_str("task_id").unwrap(), task.task_id.to_string());
        assert_eq!(doc.get_str("user_id").unwrap(), task.user_id.to_string());

        let back: Task = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(back.task_id, task.task_id);
        assert_eq!(back.task_data["title"], json!("Hello World"));
    }
}
