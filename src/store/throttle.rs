use chrono::{DateTime, Duration, Utc};

/// Decides when a dirty store may write its snapshot.
///
/// The first change after a quiet period is written immediately. Changes
/// that arrive before `interval` has passed since the last write only mark
/// the store dirty; the caller writes the latest state once [`poll`] reports
/// the interval elapsed, or unconditionally on [`take_pending`].
///
/// [`poll`]: ThrottledWriter::poll
/// [`take_pending`]: ThrottledWriter::take_pending
#[derive(Debug, Clone)]
pub struct ThrottledWriter {
    interval: Duration,
    last_write: Option<DateTime<Utc>>,
    pending: bool,
}

impl ThrottledWriter {
    pub fn new(interval: std::time::Duration) -> Self {
        Self {
            interval: Duration::from_std(interval).unwrap_or_else(|_| Duration::days(36_500)),
            last_write: None,
            pending: false,
        }
    }

    pub fn is_synchronous(&self) -> bool {
        self.interval.is_zero()
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    fn due(&self, now: DateTime<Utc>) -> bool {
        match self.last_write {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }

    /// Records a change. Returns `true` when the caller should write now.
    pub fn schedule(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_synchronous() || self.due(now) {
            self.pending = false;
            self.last_write = Some(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns `true` when a held change has become due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        if self.pending && self.due(now) {
            self.pending = false;
            self.last_write = Some(now);
            true
        } else {
            false
        }
    }

    /// Claims any held change regardless of timing.
    pub fn take_pending(&mut self, now: DateTime<Utc>) -> bool {
        if self.pending {
            self.pending = false;
            self.last_write = Some(now);
            true
        } else {
            false
        }
    }

    /// Drops a held change without writing it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(ms)
    }

    #[test]
    fn leading_write_then_trailing_coalesce() {
        let mut writer = ThrottledWriter::new(std::time::Duration::from_millis(1000));
        assert!(writer.schedule(t(0)));
        assert!(!writer.schedule(t(100)));
        assert!(!writer.schedule(t(500)));
        assert!(writer.has_pending());
        assert!(!writer.poll(t(900)));
        assert!(writer.poll(t(1000)));
        assert!(!writer.has_pending());
        assert!(!writer.poll(t(5000)));
    }

    #[test]
    fn zero_interval_writes_every_change() {
        let mut writer = ThrottledWriter::new(std::time::Duration::ZERO);
        assert!(writer.schedule(t(0)));
        assert!(writer.schedule(t(0)));
        assert!(!writer.has_pending());
    }

    #[test]
    fn cancel_discards_pending_change() {
        let mut writer = ThrottledWriter::new(std::time::Duration::from_millis(50));
        writer.schedule(t(0));
        writer.schedule(t(10));
        writer.cancel();
        assert!(!writer.take_pending(t(20)));
    }
}
