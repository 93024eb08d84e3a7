//! Request repository trait for dependency injection and testing.
//!
//! This module defines the RequestRepositoryTrait which can be mocked
//! using mockall for testing purposes.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{ApprovalStatus, Request};
use crate::repositories::request::{sort_for_queue, RequestListFilters};
use crate::types::RequestId;

/// Repository trait for review requests.
///
/// Any backing store satisfies it identically. Use `MockRequestRepositoryTrait`
/// in tests to mock the behavior.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepositoryTrait: Send + Sync {
    /// Find a request by ID
    async fn get(&self, id: RequestId) -> Result<Request, AppError>;

    /// Insert or replace a request
    async fn save(&self, request: &Request) -> Result<Request, AppError>;

    /// Replace a stored request only while it is still in `expected` status.
    ///
    /// Fails with `InvalidTransition` carrying the stored status when another
    /// writer moved the request first, so a stale decision cannot overwrite it.
    async fn update_if_status(
        &self,
        request: &Request,
        expected: ApprovalStatus,
    ) -> Result<Request, AppError>;

    /// Find all requests in queue order
    async fn find_all(&self) -> Result<Vec<Request>, AppError>;

    /// Find requests matching the filters, in queue order
    async fn list(&self, filters: &RequestListFilters) -> Result<Vec<Request>, AppError>;
}

/// In-memory implementation of RequestRepositoryTrait
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequestRepository {
    requests: Arc<RwLock<HashMap<RequestId, Request>>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests<I>(requests: I) -> Self
    where
        I: IntoIterator<Item = Request>,
    {
        let map = requests.into_iter().map(|r| (r.id, r)).collect();
        Self {
            requests: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.requests.read().await.is_empty()
    }
}

#[async_trait]
impl RequestRepositoryTrait for InMemoryRequestRepository {
    async fn get(&self, id: RequestId) -> Result<Request, AppError> {
        self.requests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Request not found".into()))
    }

    async fn save(&self, request: &Request) -> Result<Request, AppError> {
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn update_if_status(
        &self,
        request: &Request,
        expected: ApprovalStatus,
    ) -> Result<Request, AppError> {
        let mut requests = self.requests.write().await;
        let stored = requests
            .get_mut(&request.id)
            .ok_or_else(|| AppError::NotFound("Request not found".into()))?;
        if stored.status != expected {
            return Err(AppError::invalid_transition(stored.status, "update"));
        }
        *stored = request.clone();
        Ok(request.clone())
    }

    async fn find_all(&self) -> Result<Vec<Request>, AppError> {
        let mut rows: Vec<Request> = self.requests.read().await.values().cloned().collect();
        sort_for_queue(&mut rows);
        Ok(rows)
    }

    async fn list(&self, filters: &RequestListFilters) -> Result<Vec<Request>, AppError> {
        let mut rows: Vec<Request> = self
            .requests
            .read()
            .await
            .values()
            .filter(|request| filters.matches(request))
            .cloned()
            .collect();
        sort_for_queue(&mut rows);
        Ok(rows)
    }
}
