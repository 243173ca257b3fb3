use crate::entities::*;
use crate::service::{ServiceError, require_text};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Display name used in not-found errors.
pub const RESOURCE: &str = "Project";

/// A project as returned by the API.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Display colour, typically a hex code.
    pub color: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<FixedOffset>,
}

impl From<project::Model> for Project {
    fn from(model: project::Model) -> Self {
        Project {
            id: model.id,
            name: model.name,
            description: model.description,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Writable fields of a project, used for both create and full replace.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ProjectDraft {
    fn validate(&self) -> Result<(), ServiceError> {
        require_text("name", &self.name)
    }
}

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl ProjectService<'_> {
    pub fn new(db: &DatabaseConnection) -> ProjectService<'_> {
        ProjectService { db }
    }

    /// Retrieves all projects ordered by name.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_projects(&self) -> Result<Vec<Project>, ServiceError> {
        let projects = project::Entity::find()
            .order_by_asc(project::Column::Name)
            .order_by_asc(project::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Project::from)
            .collect();
        Ok(projects)
    }

    /// Creates a new project.
    ///
    /// # Returns
    ///
    /// The stored project, including its generated ID and timestamps.
    #[tracing::instrument(skip(self))]
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<Project, ServiceError> {
        draft.validate()?;

        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await?;
        let created_model = project::ActiveModel {
            name: ActiveValue::Set(draft.name),
            description: ActiveValue::Set(draft.description),
            color: ActiveValue::Set(draft.color),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(Project::from(created_model))
    }

    /// Replaces every writable field of the project with the given ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the project to overwrite.
    /// * `draft` - The replacement fields; omitted optional fields become null.
    #[tracing::instrument(skip(self))]
    pub async fn update_project_by_id(
        &self,
        id: i32,
        draft: ProjectDraft,
    ) -> Result<Project, ServiceError> {
        draft.validate()?;

        let txn = self.db.begin().await?;
        let updated_model = project::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(draft.name),
            description: ActiveValue::Set(draft.description),
            color: ActiveValue::Set(draft.color),
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

        Ok(Project::from(updated_model))
    }

    /// Deletes the project with the given ID and returns that ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete_project_by_id(&self, id: i32) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await?;
        let result = project::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(RESOURCE, id));
        }
        txn.commit().await?;

        Ok(id)
    }
}
