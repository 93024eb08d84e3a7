use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::request_status::ApprovalStatus;

/// Body surfaced to the reviewer as an inline notification.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Field-level failures a reviewer can fix and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rejection reason required")]
    ReasonRequired,
    #[error("rejection reason must be at most {max} characters")]
    ReasonTooLong { max: usize },
    #[error("notes must be at most {max} characters")]
    NotesTooLong { max: usize },
    #[error("reviewer name is invalid: {0}")]
    InvalidActor(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("validation failed: {}", .0.join(", "))]
    InvalidInput(Vec<String>),
    #[error("cannot {action} a request that is {status}")]
    InvalidTransition {
        status: ApprovalStatus,
        action: String,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_transition(status: ApprovalStatus, action: impl Into<String>) -> Self {
        AppError::InvalidTransition {
            status,
            action: action.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) | AppError::InvalidInput(_) => "VALIDATION_ERROR",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Validation failures are recoverable by the caller supplying corrected input.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::InvalidInput(_))
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                ("Internal error".to_string(), None)
            }
            AppError::InvalidInput(errors) => (
                "Validation failed".to_string(),
                Some(serde_json::json!({ "errors": errors })),
            ),
            AppError::InvalidTransition { status, action } => (
                self.to_string(),
                Some(serde_json::json!({ "status": status, "action": action })),
            ),
            other => (other.to_string(), None),
        };

        ErrorResponse {
            error,
            code: self.code().to_string(),
            details,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        messages.sort();
        AppError::InvalidInput(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_inline_notification() {
        let response = AppError::from(ValidationError::ReasonRequired).to_response();
        assert_eq!(response.error, "rejection reason required");
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert!(response.details.is_none());
    }

    #[test]
    fn invalid_input_includes_details() {
        let response = AppError::InvalidInput(vec!["actor: length".to_string()]).to_response();
        let json = serde_json::to_value(response).expect("json");
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0], "actor: length");
    }

    #[test]
    fn invalid_transition_reports_current_status() {
        let err = AppError::invalid_transition(ApprovalStatus::Approved, "reject");
        assert_eq!(err.code(), "INVALID_TRANSITION");
        assert!(!err.is_validation());
        let json = serde_json::to_value(err.to_response()).expect("json");
        assert_eq!(json["error"], "cannot reject a request that is Approved");
        assert_eq!(json["details"]["status"], "approved");
    }

    #[test]
    fn internal_maps_to_generic_message() {
        let response = AppError::Internal(anyhow::anyhow!("boom")).to_response();
        assert_eq!(response.error, "Internal error");
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert!(response.details.is_none());
    }

    #[test]
    fn not_found_keeps_message() {
        let response = AppError::NotFound("Request not found".into()).to_response();
        assert_eq!(response.error, "Request not found");
        assert_eq!(response.code, "NOT_FOUND");
    }
}
