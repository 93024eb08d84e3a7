use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::request_status::ApprovalStatus;
use crate::types::RequestId;

/// Kind of record that was uploaded for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    MaintenanceReport,
    ConsumptionData,
    VehicleEntry,
    Other,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::MaintenanceReport => "maintenance_report",
            RequestKind::ConsumptionData => "consumption_data",
            RequestKind::VehicleEntry => "vehicle_entry",
            RequestKind::Other => "other",
        }
    }
}

/// Informational only; never affects which transitions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts first in review queues.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 3,
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(label)
    }
}

/// Reporting cadence of the submission; selects the review window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionClass {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Employee,
    Manager,
}

impl ReviewerRole {
    /// The only status this role is allowed to decide on.
    pub fn reviewable_status(&self) -> ApprovalStatus {
        match self {
            ReviewerRole::Employee => ApprovalStatus::PendingEmployeeReview,
            ReviewerRole::Manager => ApprovalStatus::PendingManagerApproval,
        }
    }
}

impl fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewerRole::Employee => f.write_str("employee"),
            ReviewerRole::Manager => f.write_str("manager"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReviewAction {
    Approve {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    Reject {
        reason: String,
    },
}

impl ReviewAction {
    pub fn approve() -> Self {
        ReviewAction::Approve { notes: None }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        ReviewAction::Reject {
            reason: reason.into(),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ReviewAction::Approve { .. } => "approve",
            ReviewAction::Reject { .. } => "reject",
        }
    }
}

/// Non-blocking "seen by" annotation; never changes the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub acknowledged_by: String,
    pub acknowledged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub kind: RequestKind,
    pub title: String,
    pub status: ApprovalStatus,
    pub priority: Priority,
    pub submission_class: SubmissionClass,
    pub submitted_by: String,
    pub department: String,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub employee_notes: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub acknowledgment: Option<Acknowledgment>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    pub fn new(
        kind: RequestKind,
        title: impl Into<String>,
        priority: Priority,
        submission_class: SubmissionClass,
        submitted_by: impl Into<String>,
        department: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RequestId::new(),
            kind,
            title: title.into(),
            status: ApprovalStatus::PendingEmployeeReview,
            priority,
            submission_class,
            submitted_by: submitted_by.into(),
            department: department.into(),
            submitted_at,
            reviewed_by: None,
            reviewed_at: None,
            employee_notes: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            acknowledgment: None,
            updated_at: submitted_at,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledgment.is_some()
    }
}
