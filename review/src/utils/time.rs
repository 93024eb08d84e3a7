use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::config::ReviewWindows;
use crate::error::AppError;
use crate::models::SubmissionClass;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns the current UTC time, aligned with the configured timezone.
pub fn now_utc(tz: &Tz) -> DateTime<Utc> {
    now_in_timezone(tz).with_timezone(&Utc)
}

/// Length of the employee review window for a submission cadence.
pub fn review_window(class: SubmissionClass, windows: &ReviewWindows) -> Result<Duration, AppError> {
    let window = match class {
        SubmissionClass::Daily => windows.daily(),
        SubmissionClass::Weekly | SubmissionClass::Monthly => windows.periodic(),
    };
    window.ok_or_else(|| AppError::Internal(anyhow!("review window out of range for {:?}", class)))
}

pub fn deadline(
    submitted_at: DateTime<Utc>,
    class: SubmissionClass,
    windows: &ReviewWindows,
) -> Result<DateTime<Utc>, AppError> {
    submitted_at
        .checked_add_signed(review_window(class, windows)?)
        .ok_or_else(|| AppError::Internal(anyhow!("review deadline out of range")))
}

/// Time left before the review deadline; negative once it has passed.
pub fn time_remaining(
    now: DateTime<Utc>,
    submitted_at: DateTime<Utc>,
    class: SubmissionClass,
    windows: &ReviewWindows,
) -> Result<Duration, AppError> {
    Ok(deadline(submitted_at, class, windows)?.signed_duration_since(now))
}

pub fn is_overdue(
    now: DateTime<Utc>,
    submitted_at: DateTime<Utc>,
    class: SubmissionClass,
    windows: &ReviewWindows,
) -> Result<bool, AppError> {
    Ok(time_remaining(now, submitted_at, class, windows)? <= Duration::zero())
}

/// Display text for the deadline badge.
pub fn format_time_remaining(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "Expired".to_string();
    }
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    if hours == 0 {
        format!("{}m remaining", minutes)
    } else {
        format!("{}h {}m remaining", hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submitted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap()
    }

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let tz = chrono_tz::UTC;
        let result = now_in_timezone(&tz);
        assert_eq!(result.timezone(), tz);
    }

    #[test]
    fn now_utc_is_close_to_utc_now() {
        let tz = chrono_tz::Asia::Tokyo;
        let result = now_utc(&tz);
        let diff = (result - Utc::now()).num_seconds().abs();
        assert!(diff < 2, "Difference should be less than 2 seconds");
    }

    #[test]
    fn daily_window_is_24_hours_and_periodic_is_48() {
        let windows = ReviewWindows::default();
        assert_eq!(
            deadline(submitted(), SubmissionClass::Daily, &windows).unwrap(),
            submitted() + Duration::hours(24)
        );
        assert_eq!(
            deadline(submitted(), SubmissionClass::Weekly, &windows).unwrap(),
            submitted() + Duration::hours(48)
        );
        assert_eq!(
            deadline(submitted(), SubmissionClass::Monthly, &windows).unwrap(),
            submitted() + Duration::hours(48)
        );
    }

    #[test]
    fn time_remaining_goes_negative_after_deadline() {
        let windows = ReviewWindows::default();
        let now = submitted() + Duration::hours(30);
        let remaining =
            time_remaining(now, submitted(), SubmissionClass::Daily, &windows).unwrap();
        assert_eq!(remaining, Duration::hours(-6));
        assert!(is_overdue(now, submitted(), SubmissionClass::Daily, &windows).unwrap());
        assert!(!is_overdue(now, submitted(), SubmissionClass::Weekly, &windows).unwrap());
    }

    #[test]
    fn deadline_instant_counts_as_overdue() {
        let windows = ReviewWindows::default();
        let now = submitted() + Duration::hours(24);
        assert!(is_overdue(now, submitted(), SubmissionClass::Daily, &windows).unwrap());
    }

    #[test]
    fn oversized_window_is_an_error_not_a_panic() {
        let unconvertible = ReviewWindows {
            daily_hours: i64::MAX,
            periodic_hours: 48,
        };
        assert!(matches!(
            deadline(submitted(), SubmissionClass::Daily, &unconvertible),
            Err(AppError::Internal(_))
        ));

        let past_calendar_end = ReviewWindows {
            daily_hours: 1_000_000_000_000,
            periodic_hours: 48,
        };
        assert!(matches!(
            deadline(submitted(), SubmissionClass::Daily, &past_calendar_end),
            Err(AppError::Internal(_))
        ));
        assert!(is_overdue(
            submitted(),
            submitted(),
            SubmissionClass::Daily,
            &past_calendar_end
        )
        .is_err());
        assert!(deadline(submitted(), SubmissionClass::Weekly, &past_calendar_end).is_ok());
    }

    #[test]
    fn format_time_remaining_variants() {
        assert_eq!(
            format_time_remaining(Duration::minutes(5 * 60 + 30)),
            "5h 30m remaining"
        );
        assert_eq!(format_time_remaining(Duration::minutes(45)), "45m remaining");
        assert_eq!(format_time_remaining(Duration::zero()), "Expired");
        assert_eq!(format_time_remaining(Duration::hours(-3)), "Expired");
    }
}
