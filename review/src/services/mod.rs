pub mod decision_log;
pub mod review;

pub use decision_log::DecisionLog;
pub use review::{QueueSummary, ReviewService};
