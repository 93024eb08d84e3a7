use chrono::{DateTime, Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utility_review::{
    config::Config,
    models::{Priority, Request, RequestKind, ReviewerRole, SubmissionClass},
    repositories::InMemoryRequestRepository,
    services::ReviewService,
    utils::time,
};

fn seed_requests(now: DateTime<Utc>) -> Vec<Request> {
    vec![
        Request::new(
            RequestKind::MaintenanceReport,
            "Lift station 2 pump seal replacement",
            Priority::Urgent,
            SubmissionClass::Daily,
            "t.nguyen",
            "Wastewater Collection",
            now - Duration::hours(3),
        ),
        Request::new(
            RequestKind::ConsumptionData,
            "North district meter reads, week 41",
            Priority::Medium,
            SubmissionClass::Weekly,
            "j.alvarez",
            "Water Distribution",
            now - Duration::hours(20),
        ),
        Request::new(
            RequestKind::ConsumptionData,
            "Canal lateral 7 monthly diversion totals",
            Priority::High,
            SubmissionClass::Monthly,
            "a.ibrahim",
            "Irrigation",
            now - Duration::hours(50),
        ),
        Request::new(
            RequestKind::VehicleEntry,
            "Unit 114 fuel and mileage log",
            Priority::Low,
            SubmissionClass::Daily,
            "k.santos",
            "Fleet Services",
            now - Duration::hours(26),
        ),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "utility_review=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        time_zone = %config.time_zone,
        daily_window_hours = config.review_windows.daily_hours,
        periodic_window_hours = config.review_windows.periodic_hours,
        expiry_policy = ?config.expiry_policy,
        "Loaded configuration from environment/.env"
    );

    let now = time::now_utc(&config.time_zone);
    let repo = InMemoryRequestRepository::with_requests(seed_requests(now));
    let service = ReviewService::new(repo, config);

    let expired = service.sweep_expired(now).await?;
    tracing::info!(expired = expired.len(), "expiry sweep complete");

    for role in [ReviewerRole::Employee, ReviewerRole::Manager] {
        for request in service.queue(role).await? {
            let deadline = service.deadline_label(&request)?;
            tracing::info!(
                %role,
                request_id = %request.id,
                title = %request.title,
                priority = %request.priority,
                %deadline,
                "awaiting review"
            );
        }
    }

    let summary = serde_json::to_string(&service.queue_summary().await?)?;
    tracing::info!(%summary, "review queue summary");

    Ok(())
}
