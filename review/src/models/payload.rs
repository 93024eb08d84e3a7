use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::models::request::{ReviewAction, ReviewerRole};
use crate::validation::rules;

/// Decision submitted from a review screen.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPayload {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "rules::validate_actor_name")
    )]
    pub actor: String,
    pub role: ReviewerRole,
    #[serde(flatten)]
    pub action: ReviewAction,
}

impl DecisionPayload {
    /// Validates the payload and returns the action with normalized text fields.
    pub fn validated_action(&self, config: &Config) -> Result<ReviewAction, AppError> {
        self.validate()?;
        normalize_action(&self.action, config)
    }
}

pub(crate) fn normalize_action(
    action: &ReviewAction,
    config: &Config,
) -> Result<ReviewAction, AppError> {
    match action {
        ReviewAction::Approve { notes } => Ok(ReviewAction::Approve {
            notes: rules::validate_notes(notes.as_deref(), config.max_notes_length)?,
        }),
        ReviewAction::Reject { reason } => Ok(ReviewAction::Reject {
            reason: rules::validate_rejection_reason(reason, config.max_reason_length)?,
        }),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgePayload {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "rules::validate_actor_name")
    )]
    pub actor: String,
    pub notes: Option<String>,
}

impl AcknowledgePayload {
    pub fn validated_notes(&self, config: &Config) -> Result<Option<String>, AppError> {
        self.validate()?;
        Ok(rules::validate_notes(
            self.notes.as_deref(),
            config.max_notes_length,
        )?)
    }
}
