use crate::task::{Task, TaskDraft, TaskService};
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

/// API response for listing all tasks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

/// API response carrying a single task.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub task: Task,
}

/// Handler for GET /tasks - Returns all tasks, newest first.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = TasksResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = TaskService::new(&state.db).get_all_tasks().await?;
    Ok(Json(TasksResponse { tasks }))
}

/// Handler for POST /tasks - Creates a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = TaskDraft,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(draft): JsonBody<TaskDraft>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let task = TaskService::new(&state.db).create_task(draft).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Handler for PUT /tasks - Replaces the task named by the body's `id`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/tasks",
    request_body(
        content = TaskDraft,
        description = "Full replacement record plus the target `id`"
    ),
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<UpdateRequest<TaskDraft>>,
) -> Result<Json<TaskResponse>, ApiError> {
    let (id, draft) = request.into_parts()?;
    let task = TaskService::new(&state.db)
        .update_task_by_id(id, draft)
        .await?;
    Ok(Json(TaskResponse { task }))
}

/// Handler for DELETE /tasks?id={id} - Deletes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/tasks",
    params(
        ("id" = i32, Query, description = "ID of the task to delete")
    ),
    responses(
        (status = 200, description = "Task deleted", body = SuccessResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = DeleteParams::resolve(params)?;
    TaskService::new(&state.db).delete_task_by_id(id).await?;
    Ok(Json(SuccessResponse::new()))
}

/// Creates and returns the tasks API router.
pub fn create_task_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(list_tasks_handler)
                .post(create_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler)
                .head(method_not_allowed_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::task;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use chrono::{DateTime, NaiveDate};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    fn task_model(id: i32, title: &str) -> task::Model {
        let created_at = DateTime::parse_from_rfc3339("2026-10-18T09:00:00+00:00").unwrap();
        task::Model {
            id,
            title: title.to_string(),
            description: None,
            completed: false,
            priority: "medium".to_string(),
            tags: Vec::new(),
            category: None,
            project: None,
            due_date: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn app_with(db: MockDatabase) -> Router {
        create_task_router(Arc::new(AppState::new(db.into_connection())))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn can_create_task_with_defaults() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![task_model(1, "Buy milk")]]);

        let response = app_with(db)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .body(Body::from(r#"{"title":"Buy milk"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["task"]["id"], 1);
        assert_eq!(body["task"]["title"], "Buy milk");
        assert_eq!(body["task"]["completed"], false);
        assert_eq!(body["task"]["priority"], "medium");
        assert_eq!(body["task"]["tags"], serde_json::json!([]));
        assert!(body["task"]["due_date"].is_null());
        assert_eq!(body["task"]["created_at"], body["task"]["updated_at"]);
    }

    #[tokio::test]
    async fn can_serialize_due_date_and_tags() {
        let mut model = task_model(4, "Ship release");
        model.tags = vec!["release".to_string(), "ops".to_string()];
        model.due_date = NaiveDate::from_ymd_opt(2026, 10, 20);
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![model]]);

        let response = app_with(db)
            .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tasks"][0]["due_date"], "2026-10-20");
        assert_eq!(body["tasks"][0]["tags"], serde_json::json!(["release", "ops"]));
    }

    #[tokio::test]
    async fn cannot_create_task_with_unknown_priority() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let response = app_with(db)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .body(Body::from(r#"{"title":"Buy milk","priority":"urgent"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cannot_update_task_without_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        let response = app_with(db)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/tasks")
                    .body(Body::from(r#"{"title":"Buy milk"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "id is required"})
        );
    }

    #[tokio::test]
    async fn can_return_500_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())]);

        let response = app_with(db)
            .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }
}
