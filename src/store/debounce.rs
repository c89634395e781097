//! Deferred, coalescing writes.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default quiet period before a debounced write fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Source of monotonic time for debounce deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// One pending value slot with a single deadline.
///
/// Scheduling while a value is pending replaces the value and pushes the
/// deadline out again, so a burst of edits produces one write carrying the
/// last value once the burst has been quiet for the whole period.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use jot::store::Debouncer;
///
/// let start = Instant::now();
/// let mut slot = Debouncer::new(Duration::from_millis(1000));
/// slot.schedule("a", start);
/// slot.schedule("b", start + Duration::from_millis(400));
///
/// assert_eq!(slot.take_due(start + Duration::from_millis(1399)), None);
/// assert_eq!(slot.take_due(start + Duration::from_millis(1400)), Some("b"));
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Stores `value` and resets the deadline to `now + quiet`.
    ///
    /// Returns true if an earlier pending value was replaced.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline: now + self.quiet,
        });
        replaced
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Takes the pending value if its deadline has been reached.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.take(),
            _ => None,
        }
    }

    /// Takes the pending value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drops the pending value. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
