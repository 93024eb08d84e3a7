#![allow(dead_code)]
use chrono::{DateTime, Duration, TimeZone, Utc};
use utility_review::{
    config::Config,
    models::{ApprovalStatus, Priority, Request, RequestKind, SubmissionClass},
    repositories::InMemoryRequestRepository,
    services::ReviewService,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

pub fn request_with(
    status: ApprovalStatus,
    class: SubmissionClass,
    submitted_hours_ago: i64,
) -> Request {
    let mut request = Request::new(
        RequestKind::MaintenanceReport,
        "Clarifier 2 drive inspection",
        Priority::High,
        class,
        "t.nguyen",
        "Wastewater Treatment",
        fixed_now() - Duration::hours(submitted_hours_ago),
    );
    request.status = status;
    request
}

pub fn request_in(status: ApprovalStatus) -> Request {
    request_with(status, SubmissionClass::Weekly, 1)
}

pub fn service_with(
    requests: Vec<Request>,
    config: Config,
) -> ReviewService<InMemoryRequestRepository> {
    ReviewService::new(InMemoryRequestRepository::with_requests(requests), config)
        .with_clock(fixed_now)
}

pub fn service(requests: Vec<Request>) -> ReviewService<InMemoryRequestRepository> {
    service_with(requests, Config::default())
}
