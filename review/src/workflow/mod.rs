//! Review pipeline state machine.
//!
//! ```text
//! PendingEmployeeReview --employee approve--> PendingManagerApproval --manager approve--> Approved
//!          |        \                                   \
//!          |         employee reject                     manager reject
//!          |            v                                   v
//!          |     RejectedByEmployee                   RejectedByManager
//!          +--deadline elapsed--> ExpiredUnreviewed
//! ```
//!
//! Every function here is pure: the input request is borrowed and a new value is
//! returned. Persistence, logging and notifications belong to the caller.

use chrono::{DateTime, Utc};

use crate::config::ReviewWindows;
use crate::error::AppError;
use crate::models::{Acknowledgment, ApprovalStatus, Request, ReviewAction, ReviewerRole};
use crate::utils::time;
use crate::validation::rules;

/// Fails with `InvalidTransition` unless `request` is waiting on `role`.
pub fn check_stage(
    request: &Request,
    role: ReviewerRole,
    action: &ReviewAction,
) -> Result<(), AppError> {
    if request.status.is_terminal() || request.status != role.reviewable_status() {
        return Err(AppError::invalid_transition(request.status, action.verb()));
    }
    Ok(())
}

/// Applies a reviewer decision to `request`.
///
/// Fails with `InvalidTransition` when the request is terminal or not at the
/// stage `role` reviews, and with a validation error when a rejection has no
/// reason. The input is left untouched on failure.
pub fn transition(
    request: &Request,
    role: ReviewerRole,
    actor: &str,
    action: &ReviewAction,
    now: DateTime<Utc>,
) -> Result<Request, AppError> {
    check_stage(request, role, action)?;

    let mut next = request.clone();
    match (role, action) {
        (ReviewerRole::Employee, ReviewAction::Approve { notes }) => {
            next.status = ApprovalStatus::PendingManagerApproval;
            next.reviewed_by = Some(actor.to_string());
            next.reviewed_at = Some(now);
            next.employee_notes = notes.clone();
        }
        (ReviewerRole::Employee, ReviewAction::Reject { reason }) => {
            let reason = rules::require_reason(reason)?;
            next.status = ApprovalStatus::RejectedByEmployee;
            next.reviewed_by = Some(actor.to_string());
            next.reviewed_at = Some(now);
            next.rejected_by = Some(actor.to_string());
            next.rejected_at = Some(now);
            next.rejection_reason = Some(reason);
        }
        (ReviewerRole::Manager, ReviewAction::Approve { .. }) => {
            next.status = ApprovalStatus::Approved;
            next.approved_by = Some(actor.to_string());
            next.approved_at = Some(now);
        }
        (ReviewerRole::Manager, ReviewAction::Reject { reason }) => {
            let reason = rules::require_reason(reason)?;
            next.status = ApprovalStatus::RejectedByManager;
            next.rejected_by = Some(actor.to_string());
            next.rejected_at = Some(now);
            next.rejection_reason = Some(reason);
        }
    }
    next.updated_at = now;
    Ok(next)
}

/// Returns the expired request when an employee review deadline has passed.
pub fn expire(
    request: &Request,
    now: DateTime<Utc>,
    windows: &ReviewWindows,
) -> Result<Option<Request>, AppError> {
    if request.status != ApprovalStatus::PendingEmployeeReview {
        return Ok(None);
    }
    if !time::is_overdue(now, request.submitted_at, request.submission_class, windows)? {
        return Ok(None);
    }
    let mut next = request.clone();
    next.status = ApprovalStatus::ExpiredUnreviewed;
    next.updated_at = now;
    Ok(Some(next))
}

pub fn check_acknowledgeable(request: &Request) -> Result<(), AppError> {
    if request.status.is_terminal() {
        return Err(AppError::invalid_transition(request.status, "acknowledge"));
    }
    Ok(())
}

/// Attaches (or replaces) an acknowledgment without changing status.
pub fn acknowledge(
    request: &Request,
    actor: &str,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<Request, AppError> {
    check_acknowledgeable(request)?;
    let mut next = request.clone();
    next.acknowledgment = Some(Acknowledgment {
        acknowledged_by: actor.to_string(),
        acknowledged_at: now,
        notes,
    });
    next.updated_at = now;
    Ok(next)
}
