use chrono::{DateTime, Duration, Utc};

use crate::services::reservation_service::BookingError;

const MS_PER_DAY: i64 = 86_400_000;

pub struct StayDates;

impl StayDates {
    /// A stay must end strictly after it begins.
    pub fn validate(
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<(), BookingError> {
        if check_out <= check_in {
            return Err(BookingError::InvalidRange);
        }
        Ok(())
    }

    /// Nights charged for a stay. Any started day counts as a full night,
    /// so a 25-hour stay is two nights.
    pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
        let diff_ms = (check_out - check_in).num_milliseconds().abs();
        (diff_ms + MS_PER_DAY - 1) / MS_PER_DAY
    }

    /// Earliest checkout the booking form falls back to when a newly picked
    /// check-in reaches or passes the current checkout.
    pub fn default_checkout(check_in: DateTime<Utc>) -> DateTime<Utc> {
        check_in + Duration::days(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(n * MS_PER_DAY).unwrap()
    }

    #[test]
    fn test_whole_days_count_exactly() {
        assert_eq!(StayDates::nights(day(0), day(3)), 3);
        assert_eq!(StayDates::nights(day(0), day(1)), 1);
    }

    #[test]
    fn test_partial_days_round_up() {
        let check_in = day(0);
        let check_out = day(1) + Duration::hours(1); // 25 hours
        assert_eq!(StayDates::nights(check_in, check_out), 2);

        let one_minute = day(0) + Duration::minutes(1);
        assert_eq!(StayDates::nights(day(0), one_minute), 1);
    }

    #[test]
    fn test_checkout_must_follow_checkin() {
        assert!(StayDates::validate(day(0), day(1)).is_ok());
        assert!(matches!(
            StayDates::validate(day(1), day(1)),
            Err(BookingError::InvalidRange)
        ));
        assert!(matches!(
            StayDates::validate(day(2), day(1)),
            Err(BookingError::InvalidRange)
        ));
    }

    #[test]
    fn test_default_checkout_is_one_night_later() {
        let check_in = day(5);
        let fallback = StayDates::default_checkout(check_in);
        assert_eq!(StayDates::nights(check_in, fallback), 1);
        assert!(StayDates::validate(check_in, fallback).is_ok());
    }
}
