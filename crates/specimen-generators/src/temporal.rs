//! Date and time generators
//!
//! All three produce instants drawn uniformly from a window reaching
//! `span_days` into the past from "now".

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use specimen_core::{GeneratorError, ValueGenerator};

const DEFAULT_SPAN_DAYS: i64 = 365;

fn random_instant(span_days: i64) -> DateTime<Utc> {
    let span_secs = span_days.saturating_mul(24 * 60 * 60).max(1);
    let offset = rand::thread_rng().gen_range(0..span_secs);
    Utc::now() - Duration::seconds(offset)
}

/// Random `DateTime<Utc>` within the past `span_days`
#[derive(Debug, Clone, Copy)]
pub struct RandomDateTime {
    span_days: i64,
}

impl RandomDateTime {
    /// Create a generator with the given window size in days
    #[must_use]
    pub fn new(span_days: i64) -> Self {
        Self { span_days }
    }
}

impl Default for RandomDateTime {
    fn default() -> Self {
        Self::new(DEFAULT_SPAN_DAYS)
    }
}

impl ValueGenerator for RandomDateTime {
    type Output = DateTime<Utc>;

    fn generate(&self) -> Result<DateTime<Utc>, GeneratorError> {
        Ok(random_instant(self.span_days))
    }
}

/// Random `NaiveDate` within the past `span_days`
#[derive(Debug, Clone, Copy)]
pub struct RandomNaiveDate {
    span_days: i64,
}

impl RandomNaiveDate {
    /// Create a generator with the given window size in days
    #[must_use]
    pub fn new(span_days: i64) -> Self {
        Self { span_days }
    }
}

impl Default for RandomNaiveDate {
    fn default() -> Self {
        Self::new(DEFAULT_SPAN_DAYS)
    }
}

impl ValueGenerator for RandomNaiveDate {
    type Output = NaiveDate;

    fn generate(&self) -> Result<NaiveDate, GeneratorError> {
        Ok(random_instant(self.span_days).date_naive())
    }
}

/// Random `NaiveDateTime` within the past `span_days`
#[derive(Debug, Clone, Copy)]
pub struct RandomNaiveDateTime {
    span_days: i64,
}

impl RandomNaiveDateTime {
    /// Create a generator with the given window size in days
    #[must_use]
    pub fn new(span_days: i64) -> Self {
        Self { span_days }
    }
}

impl Default for RandomNaiveDateTime {
    fn default() -> Self {
        Self::new(DEFAULT_SPAN_DAYS)
    }
}

impl ValueGenerator for RandomNaiveDateTime {
    type Output = NaiveDateTime;

    fn generate(&self) -> Result<NaiveDateTime, GeneratorError> {
        Ok(random_instant(self.span_days).naive_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_within_window() {
        let generator = RandomDateTime::new(10);
        let now = Utc::now();
        let value = generator.generate().unwrap();
        assert!(value <= now);
        assert!(now - value <= Duration::days(10));
    }

    #[test]
    fn naive_date_not_in_future() {
        let generator = RandomNaiveDate::default();
        let value = generator.generate().unwrap();
        assert!(value <= Utc::now().date_naive());
    }

    #[test]
    fn naive_datetime_not_in_future() {
        let generator = RandomNaiveDateTime::default();
        let value = generator.generate().unwrap();
        assert!(value <= Utc::now().naive_utc());
    }
}
