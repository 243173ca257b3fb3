use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::service::ServiceError;

/// JSON response for API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON response for a successful delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for the JSON resource handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The targeted record does not exist; carries the resource display name.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The request used a method the resource does not serve.
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// The request body or query could not be turned into a valid record.
    #[error("{0}")]
    BadRequest(String),
    /// Represents a database error. The details are logged, never returned.
    #[error("Internal server error")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { resource, id } => {
                tracing::warn!("{} with ID {} not found", resource, id);
                ApiError::NotFound(resource)
            }
            ServiceError::Validation(message) => ApiError::BadRequest(message),
            ServiceError::Database(err) => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(err) => {
                tracing::error!("Database operation failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}

/// JSON request body extractor.
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header, reads an
/// empty body as `{}`, and reports every failure as a JSON `400`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(JsonBody)
            .map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}")))
    }
}

/// A record identifier as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    fn into_id(self) -> Result<i32, ApiError> {
        let invalid = || ApiError::BadRequest("id must be an integer".to_string());
        match self {
            RecordId::Number(number) => i32::try_from(number).map_err(|_| invalid()),
            RecordId::Text(text) => text.trim().parse::<i32>().map_err(|_| invalid()),
        }
    }
}

/// Resolves an optional client-supplied identifier into a row ID.
pub fn require_record_id(raw: Option<RecordId>) -> Result<i32, ApiError> {
    raw.ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?
        .into_id()
}

/// PUT payload: the target `id` next to the full replacement record.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest<D> {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(flatten)]
    pub record: D,
}

impl<D> UpdateRequest<D> {
    /// Splits the request into the target row ID and the replacement record.
    pub fn into_parts(self) -> Result<(i32, D), ApiError> {
        let id = require_record_id(self.id)?;
        Ok((id, self.record))
    }
}

/// Query parameters of a DELETE request.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    id: Option<String>,
}

impl DeleteParams {
    /// Resolves the `id` query parameter, turning a malformed query string into a `400`.
    pub fn resolve(
        params: Result<axum::extract::Query<Self>, QueryRejection>,
    ) -> Result<i32, ApiError> {
        let axum::extract::Query(params) =
            params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        require_record_id(params.id.map(RecordId::Text))
    }
}

/// Fallback for any method a resource route does not serve.
#[tracing::instrument]
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
