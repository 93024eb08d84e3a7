pub mod request;
pub mod request_repository;

pub use request::{sort_for_queue, RequestListFilters};
pub use request_repository::{InMemoryRequestRepository, RequestRepositoryTrait};

// MockRequestRepositoryTrait is only available in test builds via #[cfg(test)]
#[cfg(test)]
pub use request_repository::MockRequestRepositoryTrait;
