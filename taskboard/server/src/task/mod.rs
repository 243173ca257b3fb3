use crate::entities::*;
use crate::payload::{null_as_default, optional_date};
use crate::service::{ServiceError, require_text};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Display name used in not-found errors.
pub const RESOURCE: &str = "Task";

/// Accepted task priorities. Stored as their lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A task as returned by the API.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// Project name; not checked against the projects table.
    pub project: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<FixedOffset>,
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            priority: model.priority,
            tags: model.tags,
            category: model.category,
            project: model.project,
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Writable fields of a task. Omitted or null `completed`, `priority` and
/// `tags` fall back to `false`, `medium` and `[]`.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    fn validate(&self) -> Result<(), ServiceError> {
        require_text("title", &self.title)
    }
}

pub struct TaskService<'a> {
    db: &'a DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Retrieves all tasks, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        let tasks = task::Entity::find()
            .order_by_desc(task::Column::CreatedAt)
            .order_by_desc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Creates a new task.
    ///
    /// # Returns
    ///
    /// The stored task, including its generated ID and timestamps.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, ServiceError> {
        draft.validate()?;

        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await?;
        let created_model = task::ActiveModel {
            title: ActiveValue::Set(draft.title),
            description: ActiveValue::Set(draft.description),
            completed: ActiveValue::Set(draft.completed),
            priority: ActiveValue::Set(draft.priority.as_str().to_string()),
            tags: ActiveValue::Set(draft.tags),
            category: ActiveValue::Set(draft.category),
            project: ActiveValue::Set(draft.project),
            due_date: ActiveValue::Set(draft.due_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(Task::from(created_model))
    }

    /// Replaces every writable field of the task with the given ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to overwrite.
    /// * `draft` - The replacement fields; omitted optional fields become null.
    #[tracing::instrument(skip(self))]
    pub async fn update_task_by_id(&self, id: i32, draft: TaskDraft) -> Result<Task, ServiceError> {
        draft.validate()?;

        let txn = self.db.begin().await?;
        let updated_model = task::ActiveModel {
            id: ActiveValue::Unchanged(id),
            title: ActiveValue::Set(draft.title),
            description: ActiveValue::Set(draft.description),
            completed: ActiveValue::Set(draft.completed),
            priority: ActiveValue::Set(draft.priority.as_str().to_string()),
            tags: ActiveValue::Set(draft.tags),
            category: ActiveValue::Set(draft.category),
            project: ActiveValue::Set(draft.project),
            due_date: ActiveValue::Set(draft.due_date),
            updated_at: ActiveValue::Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|err| match err {
            DbErr::RecordNotUpdated => ServiceError::not_found(RESOURCE, id),
            err => ServiceError::Database(err),
        })?;
        txn.commit().await?;

        Ok(Task::from(updated_model))
    }

    /// Deletes the task with the given ID and returns that ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(&self, id: i32) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await?;
        let result = task::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(RESOURCE, id));
        }
        txn.commit().await?;

        Ok(id)
    }
}
