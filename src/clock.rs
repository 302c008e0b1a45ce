use std::{fmt, sync::Arc};

use chrono::{DateTime, FixedOffset, Local};

type NowFn = dyn Fn() -> DateTime<FixedOffset> + Send + Sync;

/// Time source used for date partitioning and timestamped filenames.
///
/// Partition directories follow the calendar date in the clock's offset.
#[derive(Clone)]
pub struct Clock {
    now: Arc<NowFn>,
}

impl Clock {
    /// Wall clock in the host's local time zone.
    pub fn system() -> Self {
        Self::from_fn(|| Local::now().fixed_offset())
    }

    /// Clock that always returns `instant`.
    pub fn fixed(instant: DateTime<FixedOffset>) -> Self {
        Self::from_fn(move || instant)
    }

    /// Clock backed by a custom function.
    pub fn from_fn<F>(now: F) -> Self
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        Self { now: Arc::new(now) }
    }

    /// Returns the current instant.
    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.now)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Clock(<fn>)")
    }
}
