use crate::entities::*;
use crate::service::{ServiceError, require_text};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod api;

/// Display name used in not-found errors.
pub const RESOURCE: &str = "Tag";

/// A tag as returned by the API.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<FixedOffset>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<FixedOffset>,
}

impl From<tag::Model> for Tag {
    fn from(model: tag::Model) -> Self {
        Tag {
            id: model.id,
            name: model.name,
            color: model.color,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Writable fields of a tag.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct TagDraft {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TagDraft {
    fn validate(&self) -> Result<(), ServiceError> {
        require_text("name", &self.name)
    }
}

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl TagService<'_> {
    pub fn new(db: &DatabaseConnection) -> TagService<'_> {
        TagService { db }
    }

    /// Retrieves all tags ordered by name.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tags(&self) -> Result<Vec<Tag>, ServiceError> {
        let tags = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .order_by_asc(tag::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Tag::from)
            .collect();
        Ok(tags)
    }

    /// Creates a new tag.
    #[tracing::instrument(skip(self))]
    pub async fn create_tag(&self, draft: TagDraft) -> Result<Tag, ServiceError> {
        draft.validate()?;

        let now = Utc::now().fixed_offset();
        let txn = self.db.begin().await?;
        let created_model = tag::ActiveModel {
            name: ActiveValue::Set(draft.name),
            color: ActiveValue::Set(draft.color),
            description: ActiveValue::Set(draft.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(Tag::from(created_model))
    }

    /// Replaces every writable field of the tag with the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn update_tag_by_id(&self, id: i32, draft: TagDraft) -> Result<Tag, ServiceError> {
        draft.validate()?;

        let txn = self.db.begin().await?;
        let updated_model = tag::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(draft.name),
            color: ActiveValue::Set(draft.color),
            description: ActiveValue::Set(draft.description),
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

        Ok(Tag::from(updated_model))
    }

    /// Deletes the tag with the given ID and returns that ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete_tag_by_id(&self, id: i32) -> Result<i32, ServiceError> {
        let txn = self.db.begin().await?;
        let result = tag::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(RESOURCE, id));
        }
        txn.commit().await?;

        Ok(id)
    }
}
