//! Instants relative to the configured clock.

use chrono::{DateTime, Utc};

use crate::constraint::{Check, ConstraintContext};

/// Id of [`past`].
pub const PAST: &str = "kova.temporal.past";
/// Id of [`future`].
pub const FUTURE: &str = "kova.temporal.future";
/// Id of [`past_or_present`].
pub const PAST_OR_PRESENT: &str = "kova.temporal.pastOrPresent";
/// Id of [`future_or_present`].
pub const FUTURE_OR_PRESENT: &str = "kova.temporal.futureOrPresent";

fn relative<P>(id: &'static str, text: &'static str, holds: P) -> Check<DateTime<Utc>>
where
    P: Fn(&DateTime<Utc>, &DateTime<Utc>) -> bool + Send + Sync + 'static,
{
    Check::with_context(id, move |instant: &DateTime<Utc>, cx: &ConstraintContext<'_>| {
        holds(instant, &cx.clock().now())
    })
    .message(text)
}

/// The instant is strictly before now.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use kova::{catalog::temporal, try_validate, Config, FixedClock};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let config = Config::new().with_clock(FixedClock(now));
///
/// assert!(try_validate(&config, |cx| cx.check(&now, &temporal::past())).is_failure());
/// assert!(try_validate(&config, |cx| cx.check(&now, &temporal::past_or_present())).is_success());
/// ```
pub fn past() -> Check<DateTime<Utc>> {
    relative(PAST, "must be in the past", |instant, now| instant < now)
}

/// The instant is strictly after now.
pub fn future() -> Check<DateTime<Utc>> {
    relative(FUTURE, "must be in the future", |instant, now| instant > now)
}

/// The instant is not after now.
pub fn past_or_present() -> Check<DateTime<Utc>> {
    relative(PAST_OR_PRESENT, "must be in the past or present", |instant, now| {
        instant <= now
    })
}

/// The instant is not before now.
pub fn future_or_present() -> Check<DateTime<Utc>> {
    relative(
        FUTURE_OR_PRESENT,
        "must be in the future or present",
        |instant, now| instant >= now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FixedClock};
    use crate::session::try_validate;
    use chrono::{Duration, TimeZone};

    fn holds(instant: DateTime<Utc>, check: &Check<DateTime<Utc>>) -> bool {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let config = Config::new().with_clock(FixedClock(now));
        try_validate(&config, |cx| cx.check(&instant, check)).is_success()
    }

    #[test]
    fn test_relative_to_fixed_clock() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let before = now - Duration::seconds(1);
        let after = now + Duration::seconds(1);

        assert!(holds(before, &past()));
        assert!(!holds(now, &past()));
        assert!(holds(after, &future()));
        assert!(!holds(now, &future()));
        assert!(holds(now, &past_or_present()));
        assert!(!holds(after, &past_or_present()));
        assert!(holds(now, &future_or_present()));
        assert!(!holds(before, &future_or_present()));
    }
}
