use crate::tag::{Tag, TagDraft, TagService};
use crate::web::AppState;
use crate::web::api::{
    ApiError, DeleteParams, ErrorResponse, JsonBody, SuccessResponse, UpdateRequest,
    method_not_allowed_handler,
};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// API response for listing all tags.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TagsResponse {
    pub tags: Vec<Tag>,
}

/// API response carrying a single tag.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TagResponse {
    pub tag: Tag,
}

/// Handler for GET /tags - Returns all tags ordered by name.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "Successfully retrieved tags", body = TagsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn list_tags_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TagsResponse>, ApiError> {
    let tags = TagService::new(&state.db).get_all_tags().await?;
    Ok(Json(TagsResponse { tags }))
}

/// Handler for POST /tags - Creates a tag.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/tags",
    request_body = TagDraft,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn create_tag_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<TagDraft>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let tag = TagService::new(&state.db).create_tag(draft).await?;
    Ok((StatusCode::CREATED, Json(TagResponse { tag })))
}

/// Handler for PUT /tags - Replaces the tag named by the body's `id`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/tags",
    request_body(
        content = TagDraft,
        description = "Full replacement record plus the target `id`"
    ),
    responses(
        (status = 200, description = "Tag updated", body = TagResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn update_tag_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<UpdateRequest<TagDraft>>,
) -> Result<Json<TagResponse>, ApiError> {
    let (id, draft) = request.into_parts()?;
    let tag = TagService::new(&state.db).update_tag_by_id(id, draft).await?;
    Ok(Json(TagResponse { tag }))
}

/// Handler for DELETE /tags?id={id} - Deletes a tag.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/tags",
    params(
        ("id" = i32, Query, description = "ID of the tag to delete")
    ),
    responses(
        (status = 200, description = "Tag deleted", body = SuccessResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn delete_tag_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = DeleteParams::resolve(params)?;
    TagService::new(&state.db).delete_tag_by_id(id).await?;
    Ok(Json(SuccessResponse::new()))
}

/// Creates and returns the tags API router.
pub fn create_tag_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tags",
            get(list_tags_handler)
                .post(create_tag_handler)
                .put(update_tag_handler)
                .delete(delete_tag_handler)
                .head(method_not_allowed_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}
