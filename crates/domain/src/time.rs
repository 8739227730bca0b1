//! Time and timestamp helpers.
//!
//! Two clocks coexist: the **logical** clock that drives scheduling (an
//! integer advanced only by explicit ticks) and the **wall** clock used to
//! stamp audit records.

use chrono::{DateTime, Utc};

/// UTC timestamp used for audit records.
pub type Timestamp = DateTime<Utc>;

/// A point on the simulated clock. Starts at `0` and never decreases.
pub type LogicalTime = u64;

/// A signed distance on the logical clock as supplied by callers.
///
/// Negative spans are invalid input and are ignored by every consumer.
pub type Span = i64;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Offset `origin` by `span`, returning `None` when `span` is negative.
///
/// Saturates at [`LogicalTime::MAX`] instead of overflowing.
#[must_use]
pub fn offset(origin: LogicalTime, span: Span) -> Option<LogicalTime> {
    let span = LogicalTime::try_from(span).ok()?;
    Some(origin.saturating_add(span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_offset_by_positive_span() {
        assert_eq!(offset(10, 5), Some(15));
    }

    #[test]
    fn should_offset_by_zero_span() {
        assert_eq!(offset(42, 0), Some(42));
    }

    #[test]
    fn should_reject_negative_span() {
        assert_eq!(offset(10, -1), None);
    }

    #[test]
    fn should_saturate_instead_of_overflowing() {
        assert_eq!(offset(LogicalTime::MAX - 1, 10), Some(LogicalTime::MAX));
    }
}
