//! Age in whole days of a record, from its creation timestamp.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};

const SECONDS_PER_DAY: i64 = 86_400;
/// Width of the `+08:00` style offset suffix.
const OFFSET_SUFFIX_LEN: usize = 6;
const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whole days between `created_at` and `now`, rounded down.
///
/// The offset suffix is dropped and the remaining wall-clock time is read as
/// UTC, so two records stamped in the same zone compare consistently.
pub fn age_in_days(created_at: &str, now: DateTime<Utc>) -> DomainResult<i64> {
    let created = parse_created_at(created_at)?;
    let elapsed = now.timestamp() - created.and_utc().timestamp();
    Ok(elapsed.div_euclid(SECONDS_PER_DAY))
}

fn parse_created_at(created_at: &str) -> DomainResult<NaiveDateTime> {
    let invalid = || DomainError::InvalidTimestamp(created_at.to_string());
    let cut = created_at
        .len()
        .checked_sub(OFFSET_SUFFIX_LEN)
        .ok_or_else(invalid)?;
    let local = created_at.get(..cut).ok_or_else(invalid)?.replace('T', " ");
    NaiveDateTime::parse_from_str(&local, NAIVE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_exactly_two_days() {
        assert_eq!(age_in_days("2024-03-08T12:00:00+08:00", now()).unwrap(), 2);
    }

    #[test]
    fn test_floor_not_round() {
        assert_eq!(age_in_days("2024-03-08T11:59:59+08:00", now()).unwrap(), 2);
        assert_eq!(age_in_days("2024-03-08T12:00:01+08:00", now()).unwrap(), 1);
    }

    #[test]
    fn test_same_instant_is_zero() {
        assert_eq!(age_in_days("2024-03-10T12:00:00+00:00", now()).unwrap(), 0);
    }

    #[test]
    fn test_future_timestamp_floors_negative() {
        assert_eq!(age_in_days("2024-03-10T12:00:01+08:00", now()).unwrap(), -1);
    }

    #[test]
    fn test_offset_is_ignored() {
        let a = age_in_days("2024-01-01T00:00:00+08:00", now()).unwrap();
        let b = age_in_days("2024-01-01T00:00:00-05:00", now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_timestamps_are_errors() {
        for bad in ["", "+08:00", "2024-03-08", "yesterday at noon", "2024-13-40T99:00:00+08:00"] {
            let err = age_in_days(bad, now()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTimestamp(_)), "{bad}");
        }
    }
}
