//! List filters and ordering for review queues.

use serde::{Deserialize, Serialize};

use crate::models::{ApprovalStatus, Priority, Request, RequestKind};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestListFilters {
    pub status: Option<ApprovalStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub kind: Option<RequestKind>,
    /// Case-insensitive substring match on title, submitter or department.
    pub search: Option<String>,
}

impl RequestListFilters {
    pub fn with_status(status: ApprovalStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn matches(&self, request: &Request) -> bool {
        if self.status.is_some_and(|status| status != request.status) {
            return false;
        }
        if self.priority.is_some_and(|priority| priority != request.priority) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != request.kind) {
            return false;
        }
        if let Some(department) = self.department.as_deref() {
            if !request.department.eq_ignore_ascii_case(department.trim()) {
                return false;
            }
        }
        if let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = needle.to_lowercase();
            let haystacks = [&request.title, &request.submitted_by, &request.department];
            if !haystacks
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}

/// Queue order: highest priority first, then oldest submission.
pub fn sort_for_queue(requests: &mut [Request]) {
    requests.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then(a.submitted_at.cmp(&b.submitted_at))
            .then(a.id.cmp(&b.id))
    });
}
