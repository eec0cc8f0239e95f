//! Attendance status constants and the pure arithmetic behind the
//! dashboards (percentages, streaks, trends, lateness).
//!
//! Status strings must match the `CHECK` constraint on `attendance.status`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_PRESENT: &str = "Present";
pub const STATUS_ABSENT: &str = "Absent";
pub const STATUS_LATE: &str = "Late";

/// All valid attendance statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_PRESENT, STATUS_ABSENT, STATUS_LATE];

/// Placeholder shown for a session the student has no attendance row for.
pub const STATUS_NOT_RECORDED: &str = "Not Recorded";

/// Length of each window compared by [`attendance_trend`], in days.
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Validate that a status string is one of the known attendance statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid attendance status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Whether a status counts as having attended (on time or late).
pub fn is_attended(status: &str) -> bool {
    status == STATUS_PRESENT || status == STATUS_LATE
}

// ---------------------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------------------

/// `round(part / total * 100)`, or 0 when `total` is zero.
pub fn rounded_percentage(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as i64
}

/// Number of consecutive attended rows at the head of `statuses`.
///
/// `statuses` must be ordered most recent first.
pub fn current_streak<S: AsRef<str>>(statuses: &[S]) -> i64 {
    statuses
        .iter()
        .take_while(|s| is_attended(s.as_ref()))
        .count() as i64
}

/// Attended-rate difference (percentage points) between the most recent
/// window and the one before it.
///
/// Returns 0 when either window has no rows, since there is nothing to
/// compare against.
pub fn attendance_trend(
    recent_attended: i64,
    recent_total: i64,
    prior_attended: i64,
    prior_total: i64,
) -> i64 {
    if recent_total <= 0 || prior_total <= 0 {
        return 0;
    }
    let recent = recent_attended as f64 / recent_total as f64;
    let prior = prior_attended as f64 / prior_total as f64;
    ((recent - prior) * 100.0).round() as i64
}

/// Status recorded for a session clock-in happening at `local_now`.
///
/// A clock-in later than `start_time + grace_mins` on the session date is
/// `Late`; anything earlier is `Present`.
pub fn clock_in_status(
    local_now: NaiveDateTime,
    session_date: NaiveDate,
    start_time: NaiveTime,
    grace_mins: i64,
) -> &'static str {
    let deadline = session_date.and_time(start_time) + Duration::minutes(grace_mins);
    if local_now > deadline {
        STATUS_LATE
    } else {
        STATUS_PRESENT
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn all_statuses_are_valid() {
        for s in VALID_STATUSES {
            assert!(validate_status(s).is_ok(), "status '{s}' should be valid");
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        assert!(validate_status("present").is_err());
        assert!(validate_status(STATUS_NOT_RECORDED).is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(4, 10), 40);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
    }

    #[test]
    fn percentage_of_empty_total_is_zero() {
        assert_eq!(rounded_percentage(0, 0), 0);
        assert_eq!(rounded_percentage(5, 0), 0);
    }

    #[test]
    fn streak_counts_leading_attended_rows() {
        let rows = [STATUS_PRESENT, STATUS_LATE, STATUS_PRESENT, STATUS_ABSENT, STATUS_PRESENT];
        assert_eq!(current_streak(&rows), 3);
    }

    #[test]
    fn streak_is_zero_after_recent_absence() {
        assert_eq!(current_streak(&[STATUS_ABSENT, STATUS_PRESENT]), 0);
        assert_eq!(current_streak::<&str>(&[]), 0);
    }

    #[test]
    fn streak_accepts_owned_strings() {
        let rows = vec!["Present".to_string(), "Present".to_string()];
        assert_eq!(current_streak(&rows), 2);
    }

    #[test]
    fn trend_compares_windows() {
        // 9/10 recently vs 6/10 before: +30 points.
        assert_eq!(attendance_trend(9, 10, 6, 10), 30);
        // 1/4 recently vs 3/4 before: -50 points.
        assert_eq!(attendance_trend(1, 4, 3, 4), -50);
    }

    #[test]
    fn trend_without_history_is_flat() {
        assert_eq!(attendance_trend(5, 5, 0, 0), 0);
        assert_eq!(attendance_trend(0, 0, 5, 5), 0);
    }

    #[test]
    fn clock_in_within_grace_is_present() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(clock_in_status(at("2025-03-10", "08:45:00"), date, start, 10), STATUS_PRESENT);
        assert_eq!(clock_in_status(at("2025-03-10", "09:10:00"), date, start, 10), STATUS_PRESENT);
    }

    #[test]
    fn clock_in_after_grace_is_late() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(clock_in_status(at("2025-03-10", "09:10:01"), date, start, 10), STATUS_LATE);
        assert_eq!(clock_in_status(at("2025-03-11", "08:00:00"), date, start, 10), STATUS_LATE);
    }
}
