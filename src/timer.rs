//! Time-based interpolation and cancellable scheduled tasks
//!
//! The animation layer never blocks: it schedules tasks on a [`TimerQueue`]
//! and the host fires whatever is due whenever it gets control back. The
//! blocking [`count_down`] is kept for callers that just want the values.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::geometry::clamp;

/// Interval between two interpolation steps
pub const STEP_INTERVAL: Duration = Duration::from_millis(1);

/// Monotonic time source measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Linear countdown from `start_value` to zero over `duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    pub start_value: f64,
    pub duration: Duration,
    pub started_at: Duration,
}

impl Interpolation {
    pub fn new(start_value: f64, duration: Duration, started_at: Duration) -> Self {
        Self {
            start_value,
            duration,
            started_at,
        }
    }

    /// Progress in `[0, 1]` at `now`; a zero duration is immediately complete
    pub fn ratio(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.started_at);
        if self.duration.is_zero() {
            return 1.0;
        }
        clamp(
            elapsed.as_secs_f64() / self.duration.as_secs_f64(),
            0.0,
            1.0,
        )
    }

    /// Remaining value at `now`
    pub fn value_at(&self, now: Duration) -> f64 {
        (1.0 - self.ratio(now)) * self.start_value
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

/// Handle of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Pending tasks ordered by due time, ties fired in scheduling order
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Scheduled<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // Keep sorted by (due, id) so popping the front is the next task
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, Scheduled { id, due, task });
        id
    }

    /// Drop a pending task; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop every pending task, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Remove and return the earliest task due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, T)> {
        if self.entries.first().is_some_and(|e| e.due <= now) {
            let entry = self.entries.remove(0);
            Some((entry.id, entry.task))
        } else {
            None
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Count `start_value` down to zero over `duration` on the system clock.
///
/// Blocks the calling thread, invoking `callback` every [`STEP_INTERVAL`]
/// with the remaining value. The last invocation always receives 0.
pub fn count_down<F: FnMut(f64)>(callback: F, start_value: f64, duration: Duration) {
    count_down_with(
        &SystemClock::new(),
        std::thread::sleep,
        callback,
        start_value,
        duration,
    );
}

/// [`count_down`] with an injected clock and sleep function
pub fn count_down_with<C, S, F>(
    clock: &C,
    mut sleep: S,
    mut callback: F,
    start_value: f64,
    duration: Duration,
) where
    C: Clock,
    S: FnMut(Duration),
    F: FnMut(f64),
{
    let interpolation = Interpolation::new(start_value, duration, clock.now());
    loop {
        let now = clock.now();
        callback(interpolation.value_at(now));
        if interpolation.is_finished(now) {
            break;
        }
        sleep(STEP_INTERVAL);
    }
}
