//! Payload emitted whenever the pipeline moves a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::request::{Request, ReviewerRole};
use crate::models::request_status::ApprovalStatus;
use crate::types::RequestId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEvent {
    pub request_id: RequestId,
    /// `None` for clock-driven transitions.
    pub actor_role: Option<ReviewerRole>,
    pub actor: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub resulting_status: ApprovalStatus,
}

impl DecisionEvent {
    /// Builds the event describing how `request` reached its current status.
    pub fn for_review(request: &Request, role: ReviewerRole, actor: &str) -> Self {
        let decision = match request.status {
            ApprovalStatus::RejectedByEmployee | ApprovalStatus::RejectedByManager => {
                Decision::Rejected
            }
            _ => Decision::Approved,
        };
        let notes = match role {
            ReviewerRole::Employee if decision == Decision::Approved => {
                request.employee_notes.clone()
            }
            _ => None,
        };
        Self {
            request_id: request.id,
            actor_role: Some(role),
            actor: Some(actor.to_string()),
            timestamp: request.updated_at,
            decision,
            reason: match decision {
                Decision::Rejected => request.rejection_reason.clone(),
                _ => None,
            },
            notes,
            resulting_status: request.status,
        }
    }

    pub fn for_expiry(request: &Request) -> Self {
        Self {
            request_id: request.id,
            actor_role: None,
            actor: None,
            timestamp: request.updated_at,
            decision: Decision::Expired,
            reason: None,
            notes: None,
            resulting_status: request.status,
        }
    }
}
