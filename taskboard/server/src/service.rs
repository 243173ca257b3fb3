/// Error type shared by the project, tag and task services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No row with the given ID exists for the resource.
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    /// The submitted record breaks a field rule.
    #[error("{0}")]
    Validation(String),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        ServiceError::NotFound { resource, id }
    }
}

/// Rejects a required text field that is empty or only whitespace.
pub fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_accept_non_blank_text() {
        assert!(require_text("name", "Inbox").is_ok());
    }

    #[test]
    fn can_reject_blank_text() {
        let err = require_text("title", "   ").unwrap_err();
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn can_format_not_found_error() {
        let err = ServiceError::not_found("Tag", 999);
        assert_eq!(err.to_string(), "Tag with ID 999 not found");
    }
}
