//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if more than `age` has passed since this timestamp.
    ///
    /// An `age` too large for chrono never elapses.
    pub fn is_older_than(&self, age: std::time::Duration) -> bool {
        chrono::Duration::from_std(age)
            .map(|age| Utc::now() - self.0 > age)
            .unwrap_or(false)
    }

    /// Formats as RFC 3339, used in hand-off bodies.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(5));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn timestamp_round_trips_through_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
        assert!(serde_json::to_string(&ts).unwrap().contains("2024-01-15"));
    }

    #[test]
    fn is_older_than_compares_against_now() {
        let hour_ago = Timestamp::from_datetime(Utc::now() - chrono::Duration::hours(1));

        assert!(hour_ago.is_older_than(Duration::from_secs(60)));
        assert!(!hour_ago.is_older_than(Duration::from_secs(2 * 3600)));
        assert!(!Timestamp::now().is_older_than(Duration::MAX));
    }

    #[test]
    fn rfc3339_output_keeps_the_date() {
        let dt = DateTime::parse_from_rfc3339("2024-03-02T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(Timestamp::from_datetime(dt).to_rfc3339().starts_with("2024-03-02T08:00:00"));
    }
}
