use crate::project::{Project, ProjectDraft, ProjectService};
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

/// API response for listing all projects.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// API response carrying a single project.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub project: Project,
}

/// Handler for GET /projects - Returns all projects ordered by name.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "Successfully retrieved projects", body = ProjectsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn list_projects_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = ProjectService::new(&state.db).get_all_projects().await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// Handler for POST /projects - Creates a project.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/projects",
    request_body = ProjectDraft,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn create_project_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<ProjectDraft>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = ProjectService::new(&state.db).create_project(draft).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// Handler for PUT /projects - Replaces the project named by the body's `id`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/projects",
    request_body(
        content = ProjectDraft,
        description = "Full replacement record plus the target `id`"
    ),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn update_project_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<UpdateRequest<ProjectDraft>>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let (id, draft) = request.into_parts()?;
    let project = ProjectService::new(&state.db)
        .update_project_by_id(id, draft)
        .await?;
    Ok(Json(ProjectResponse { project }))
}

/// Handler for DELETE /projects?id={id} - Deletes a project.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/projects",
    params(
        ("id" = i32, Query, description = "ID of the project to delete")
    ),
    responses(
        (status = 200, description = "Project deleted", body = SuccessResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn delete_project_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = DeleteParams::resolve(params)?;
    ProjectService::new(&state.db)
        .delete_project_by_id(id)
        .await?;
    Ok(Json(SuccessResponse::new()))
}

/// Creates and returns the projects API router.
pub fn create_project_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/projects",
            get(list_projects_handler)
                .post(create_project_handler)
                .put(update_project_handler)
                .delete(delete_project_handler)
                .head(method_not_allowed_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}
