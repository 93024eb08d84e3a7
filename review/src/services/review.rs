use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::config::{Config, ExpiryPolicy};
use crate::error::AppError;
use crate::models::payload::normalize_action;
use crate::models::{
    AcknowledgePayload, ApprovalStatus, DecisionEvent, DecisionPayload, Request, ReviewAction,
    ReviewerRole,
};
use crate::repositories::{RequestListFilters, RequestRepositoryTrait};
use crate::services::decision_log::DecisionLog;
use crate::types::RequestId;
use crate::utils::time;
use crate::validation::rules;
use crate::workflow;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Per-status counts for the review dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub total: usize,
    pub pending_employee_review: usize,
    pub pending_manager_approval: usize,
    pub approved: usize,
    pub rejected_by_employee: usize,
    pub rejected_by_manager: usize,
    pub expired_unreviewed: usize,
    /// Pending employee reviews past their deadline but not yet expired.
    pub overdue: usize,
    pub acknowledged: usize,
}

/// Runs reviewer decisions against an injected repository.
///
/// Owns the side effects the pure state machine leaves out: loading and
/// saving, expiry on access, and emitting decision events.
#[derive(Clone)]
pub struct ReviewService<R> {
    repo: R,
    config: Config,
    log: DecisionLog,
    clock: Clock,
}

impl<R: RequestRepositoryTrait> ReviewService<R> {
    pub fn new(repo: R, config: Config) -> Self {
        let tz = config.time_zone;
        Self {
            repo,
            config,
            log: DecisionLog::new(),
            clock: Arc::new(move || time::now_utc(&tz)),
        }
    }

    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_decision_log(mut self, log: DecisionLog) -> Self {
        self.log = log;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn decision_log(&self) -> &DecisionLog {
        &self.log
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Applies `action` for `role` to the stored request.
    ///
    /// Stage checks run before input validation, so a request that can no
    /// longer be decided reports `InvalidTransition` whatever the input. On
    /// any error the stored request is left as it was, except that an overdue
    /// employee review is expired first under `ExpiryPolicy::OnAccess`.
    pub async fn decide(
        &self,
        id: RequestId,
        role: ReviewerRole,
        actor: &str,
        action: ReviewAction,
    ) -> Result<Request, AppError> {
        let request = self.repo.get(id).await?;
        let now = self.now();
        self.expire_on_access(&request, now, action.verb()).await?;

        let (actor, next) = self
            .prepare_decision(&request, role, actor, &action, now)
            .inspect_err(|err| {
                tracing::warn!(
                    request_id = %id,
                    %role,
                    status = request.status.as_str(),
                    error = %err,
                    "review decision refused"
                );
            })?;

        let saved = self
            .repo
            .update_if_status(&next, request.status)
            .await
            .map_err(|err| relabel_conflict(err, action.verb()))?;
        self.log
            .record(DecisionEvent::for_review(&saved, role, &actor))
            .await;
        Ok(saved)
    }

    fn prepare_decision(
        &self,
        request: &Request,
        role: ReviewerRole,
        actor: &str,
        action: &ReviewAction,
        now: DateTime<Utc>,
    ) -> Result<(String, Request), AppError> {
        workflow::check_stage(request, role, action)?;
        let actor = rules::require_actor(actor)?;
        let action = normalize_action(action, &self.config)?;
        let next = workflow::transition(request, role, &actor, &action, now)?;
        Ok((actor, next))
    }

    /// Applies a decision payload. Its fields are validated by `decide` after the stage check.
    pub async fn submit(&self, id: RequestId, payload: DecisionPayload) -> Result<Request, AppError> {
        self.decide(id, payload.role, &payload.actor, payload.action)
            .await
    }

    pub async fn approve(
        &self,
        id: RequestId,
        role: ReviewerRole,
        actor: &str,
    ) -> Result<Request, AppError> {
        self.decide(id, role, actor, ReviewAction::approve()).await
    }

    /// Employee approval carrying review notes forward to the manager.
    pub async fn approve_with_notes(
        &self,
        id: RequestId,
        actor: &str,
        notes: impl Into<String>,
    ) -> Result<Request, AppError> {
        let action = ReviewAction::Approve {
            notes: Some(notes.into()),
        };
        self.decide(id, ReviewerRole::Employee, actor, action).await
    }

    pub async fn reject(
        &self,
        id: RequestId,
        role: ReviewerRole,
        actor: &str,
        reason: &str,
    ) -> Result<Request, AppError> {
        self.decide(id, role, actor, ReviewAction::reject(reason))
            .await
    }

    pub async fn acknowledge(
        &self,
        id: RequestId,
        payload: &AcknowledgePayload,
    ) -> Result<Request, AppError> {
        let request = self.repo.get(id).await?;
        let now = self.now();
        self.expire_on_access(&request, now, "acknowledge").await?;
        workflow::check_acknowledgeable(&request)?;

        let notes = payload.validated_notes(&self.config)?;
        let actor = rules::require_actor(&payload.actor)?;
        let next = workflow::acknowledge(&request, &actor, notes, now)?;
        let saved = self
            .repo
            .update_if_status(&next, request.status)
            .await
            .map_err(|err| relabel_conflict(err, "acknowledge"))?;
        tracing::info!(
            request_id = %id,
            actor = actor.as_str(),
            status = saved.status.as_str(),
            "request acknowledged"
        );
        Ok(saved)
    }

    /// Expires `request` if overdue and the policy enacts expiry on access.
    async fn expire_on_access(
        &self,
        request: &Request,
        now: DateTime<Utc>,
        verb: &str,
    ) -> Result<(), AppError> {
        if self.config.expiry_policy != ExpiryPolicy::OnAccess {
            return Ok(());
        }
        let Some(expired) = workflow::expire(request, now, &self.config.review_windows)? else {
            return Ok(());
        };
        self.persist_expiry(&expired)
            .await
            .map_err(|err| relabel_conflict(err, verb))?;
        tracing::warn!(
            request_id = %request.id,
            action = verb,
            "review deadline elapsed before action"
        );
        Err(AppError::invalid_transition(expired.status, verb))
    }

    /// Expires every overdue employee review as of `now`.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<Vec<Request>, AppError> {
        let pending = self
            .repo
            .list(&RequestListFilters::with_status(
                ApprovalStatus::PendingEmployeeReview,
            ))
            .await?;

        let mut expired = Vec::new();
        for request in pending {
            let Some(next) = workflow::expire(&request, now, &self.config.review_windows)? else {
                continue;
            };
            match self.persist_expiry(&next).await {
                Ok(saved) => expired.push(saved),
                // Decided by someone else since the listing.
                Err(AppError::InvalidTransition { status, .. }) => {
                    tracing::debug!(request_id = %request.id, status = status.as_str(), "skipping expiry");
                }
                Err(err) => return Err(err),
            }
        }
        tracing::debug!(expired = expired.len(), "expiry sweep finished");
        Ok(expired)
    }

    async fn persist_expiry(&self, expired: &Request) -> Result<Request, AppError> {
        let saved = self
            .repo
            .update_if_status(expired, ApprovalStatus::PendingEmployeeReview)
            .await?;
        self.log.record(DecisionEvent::for_expiry(&saved)).await;
        Ok(saved)
    }

    pub async fn get(&self, id: RequestId) -> Result<Request, AppError> {
        self.repo.get(id).await
    }

    pub async fn list(&self, filters: &RequestListFilters) -> Result<Vec<Request>, AppError> {
        self.repo.list(filters).await
    }

    /// Requests waiting on `role`, highest priority first.
    pub async fn queue(&self, role: ReviewerRole) -> Result<Vec<Request>, AppError> {
        self.repo
            .list(&RequestListFilters::with_status(role.reviewable_status()))
            .await
    }

    pub async fn queue_summary(&self) -> Result<QueueSummary, AppError> {
        let now = self.now();
        let requests = self.repo.find_all().await?;
        let mut summary = QueueSummary {
            total: requests.len(),
            ..QueueSummary::default()
        };
        for request in &requests {
            match request.status {
                ApprovalStatus::PendingEmployeeReview => {
                    summary.pending_employee_review += 1;
                    if time::is_overdue(
                        now,
                        request.submitted_at,
                        request.submission_class,
                        &self.config.review_windows,
                    )? {
                        summary.overdue += 1;
                    }
                }
                ApprovalStatus::PendingManagerApproval => summary.pending_manager_approval += 1,
                ApprovalStatus::Approved => summary.approved += 1,
                ApprovalStatus::RejectedByEmployee => summary.rejected_by_employee += 1,
                ApprovalStatus::RejectedByManager => summary.rejected_by_manager += 1,
                ApprovalStatus::ExpiredUnreviewed => summary.expired_unreviewed += 1,
            }
            if request.is_acknowledged() {
                summary.acknowledged += 1;
            }
        }
        Ok(summary)
    }

    /// Deadline badge text; only employee reviews run against a clock.
    pub fn deadline_label(&self, request: &Request) -> Result<String, AppError> {
        match request.status {
            ApprovalStatus::PendingEmployeeReview => {
                let remaining = time::time_remaining(
                    self.now(),
                    request.submitted_at,
                    request.submission_class,
                    &self.config.review_windows,
                )?;
                Ok(time::format_time_remaining(remaining))
            }
            status => Ok(status.label().to_string()),
        }
    }
}

/// Reports a lost status-guarded write against the caller's action.
fn relabel_conflict(err: AppError, verb: &str) -> AppError {
    match err {
        AppError::InvalidTransition { status, .. } => AppError::invalid_transition(status, verb),
        other => other,
    }
}
