//! Review pipeline status shared by every submitted request.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
/// Where a request sits in the employee review / manager approval pipeline.
pub enum ApprovalStatus {
    #[default]
    PendingEmployeeReview,
    PendingManagerApproval,
    RejectedByEmployee,
    Approved,
    RejectedByManager,
    ExpiredUnreviewed,
}

impl ApprovalStatus {
    pub const ALL: [ApprovalStatus; 6] = [
        ApprovalStatus::PendingEmployeeReview,
        ApprovalStatus::PendingManagerApproval,
        ApprovalStatus::RejectedByEmployee,
        ApprovalStatus::Approved,
        ApprovalStatus::RejectedByManager,
        ApprovalStatus::ExpiredUnreviewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::PendingEmployeeReview => "pending_employee_review",
            ApprovalStatus::PendingManagerApproval => "pending_manager_approval",
            ApprovalStatus::RejectedByEmployee => "rejected_by_employee",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::RejectedByManager => "rejected_by_manager",
            ApprovalStatus::ExpiredUnreviewed => "expired_unreviewed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApprovalStatus::PendingEmployeeReview => "Pending Employee Review",
            ApprovalStatus::PendingManagerApproval => "Pending Manager Approval",
            ApprovalStatus::RejectedByEmployee => "Rejected by Employee",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::RejectedByManager => "Rejected by Manager",
            ApprovalStatus::ExpiredUnreviewed => "Expired (Unreviewed)",
        }
    }

    /// Terminal requests are never mutated again.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ApprovalStatus::PendingEmployeeReview | ApprovalStatus::PendingManagerApproval
        )
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ApprovalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Invalid approval status: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_snake_case() {
        let status: ApprovalStatus =
            serde_json::from_str("\"pending_manager_approval\"").unwrap();
        assert_eq!(status, ApprovalStatus::PendingManagerApproval);
        let value = serde_json::to_value(ApprovalStatus::ExpiredUnreviewed).unwrap();
        assert_eq!(value, serde_json::json!("expired_unreviewed"));
    }

    #[test]
    fn as_str_matches_serde_representation() {
        for status in ApprovalStatus::ALL {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value, serde_json::json!(status.as_str()));
            assert_eq!(status.as_str().parse::<ApprovalStatus>(), Ok(status));
        }
    }

    #[test]
    fn only_the_two_pending_states_are_non_terminal() {
        let open: Vec<_> = ApprovalStatus::ALL
            .into_iter()
            .filter(|status| !status.is_terminal())
            .collect();
        assert_eq!(
            open,
            vec![
                ApprovalStatus::PendingEmployeeReview,
                ApprovalStatus::PendingManagerApproval
            ]
        );
    }

    #[test]
    fn default_is_pending_employee_review() {
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::PendingEmployeeReview);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!("cancelled".parse::<ApprovalStatus>().is_err());
    }
}
