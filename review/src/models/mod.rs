//! Data models for the review pipeline.

pub mod decision;
pub mod payload;
pub mod request;
pub mod request_status;

pub use decision::{Decision, DecisionEvent};
pub use payload::{AcknowledgePayload, DecisionPayload};
pub use request::{
    Acknowledgment, Priority, Request, RequestKind, ReviewAction, ReviewerRole, SubmissionClass,
};
pub use request_status::ApprovalStatus;
