use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::DecisionEvent;
use crate::types::RequestId;

/// Append-only record of every decision payload the pipeline emitted.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    events: Arc<RwLock<Vec<DecisionEvent>>>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, event: DecisionEvent) {
        tracing::info!(
            request_id = %event.request_id,
            actor_role = ?event.actor_role,
            actor = event.actor.as_deref().unwrap_or("system"),
            decision = ?event.decision,
            reason = event.reason.as_deref(),
            resulting_status = event.resulting_status.as_str(),
            timestamp = %event.timestamp,
            "review decision recorded"
        );
        self.events.write().await.push(event);
    }

    pub async fn events(&self) -> Vec<DecisionEvent> {
        self.events.read().await.clone()
    }

    pub async fn events_for(&self, id: RequestId) -> Vec<DecisionEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.request_id == id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, Decision};
    use chrono::Utc;

    fn event(id: RequestId, decision: Decision) -> DecisionEvent {
        DecisionEvent {
            request_id: id,
            actor_role: None,
            actor: None,
            timestamp: Utc::now(),
            decision,
            reason: None,
            notes: None,
            resulting_status: ApprovalStatus::ExpiredUnreviewed,
        }
    }

    #[tokio::test]
    async fn records_in_order_and_filters_by_request() {
        let log = DecisionLog::new();
        let first = RequestId::new();
        let second = RequestId::new();
        log.record(event(first, Decision::Expired)).await;
        log.record(event(second, Decision::Approved)).await;
        log.record(event(first, Decision::Rejected)).await;

        assert_eq!(log.len().await, 3);
        let for_first: Vec<_> = log
            .events_for(first)
            .await
            .into_iter()
            .map(|e| e.decision)
            .collect();
        assert_eq!(for_first, vec![Decision::Expired, Decision::Rejected]);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let log = DecisionLog::new();
        let clone = log.clone();
        clone.record(event(RequestId::new(), Decision::Expired)).await;
        assert!(!log.is_empty().await);
    }
}
