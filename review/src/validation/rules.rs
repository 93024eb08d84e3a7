//! Common validation rules shared across review inputs.

use crate::error::ValidationError;

/// Returns the trimmed reason, refusing empty or whitespace-only input.
pub fn require_reason(reason: &str) -> Result<String, ValidationError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::ReasonRequired);
    }
    Ok(trimmed.to_string())
}

/// Validates a rejection reason against the configured length cap.
pub fn validate_rejection_reason(reason: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = require_reason(reason)?;
    if trimmed.chars().count() > max {
        return Err(ValidationError::ReasonTooLong { max });
    }
    Ok(trimmed)
}

/// Free-text notes are optional; blank notes collapse to `None`.
pub fn validate_notes(notes: Option<&str>, max: usize) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > max {
        return Err(ValidationError::NotesTooLong { max });
    }
    Ok(Some(trimmed.to_string()))
}

pub const MAX_ACTOR_LENGTH: usize = 100;

/// Returns the trimmed reviewer name, applying the same checks as the payload types.
pub fn require_actor(actor: &str) -> Result<String, ValidationError> {
    let trimmed = actor.trim();
    validate_actor_name(trimmed).map_err(|e| ValidationError::InvalidActor(e.code.to_string()))?;
    if trimmed.chars().count() > MAX_ACTOR_LENGTH {
        return Err(ValidationError::InvalidActor("actor_too_long".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validates reviewer display names.
///
/// Requirements:
/// - Not blank
/// - No control characters
pub fn validate_actor_name(actor: &str) -> Result<(), validator::ValidationError> {
    if actor.trim().is_empty() {
        return Err(validator::ValidationError::new("actor_blank"));
    }
    if actor.chars().any(char::is_control) {
        return Err(validator::ValidationError::new("actor_invalid_characters"));
    }
    Ok(())
}
