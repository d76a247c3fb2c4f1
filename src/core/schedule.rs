//! # Scheduled Tasks
//!
//! A virtual-time timer queue. Nothing here reads a clock: callers pass the
//! current time in milliseconds, so tests can fast-forward deterministically
//! and the TUI feeds in `Instant::elapsed()`.
//!
//! ```text
//! after(now, 100, Settle)  ──┐
//! every(now, 16, Frame)    ──┼──►  Scheduler  ──advance(now)──►  [(id, payload), ...]
//! cancel(id)               ──┘        (due, id) order, cancelled tasks never fire
//! ```

/// Milliseconds since an arbitrary origin (the TUI uses process start).
pub type Millis = u64;

/// Handle returned when scheduling, used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Task<T> {
    id: TaskId,
    due: Millis,
    period: Option<Millis>,
    payload: T,
}

/// Cancelable one-shot and repeating tasks over virtual time.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    fn push(&mut self, due: Millis, period: Option<Millis>, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due,
            period,
            payload,
        });
        id
    }

    /// Run `payload` once, `delay` ms after `now`.
    pub fn after(&mut self, now: Millis, delay: Millis, payload: T) -> TaskId {
        self.push(now.saturating_add(delay), None, payload)
    }

    /// Run `payload` every `period` ms, first at `now + period`.
    /// A zero period is treated as 1 ms.
    pub fn every(&mut self, now: Millis, period: Millis, payload: T) -> TaskId {
        let period = period.max(1);
        self.push(now.saturating_add(period), Some(period), payload)
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Earliest due time, if anything is scheduled.
    pub fn next_due(&self) -> Option<Millis> {
        self.tasks.iter().map(|t| t.due).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T: Clone> Scheduler<T> {
    /// Fire everything due at or before `now`.
    ///
    /// Tasks come out ordered by due time, ties broken by scheduling order.
    /// A repeating task fires once per elapsed period, so a large jump in
    /// `now` replays every missed tick.
    pub fn advance(&mut self, now: Millis) -> Vec<(TaskId, T)> {
        let mut fired = Vec::new();
        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= now)
                .min_by_key(|(_, t)| (t.due, t.id))
                .map(|(i, _)| i);

            let Some(index) = next else {
                break;
            };

            match self.tasks[index].period {
                Some(period) => {
                    let task = &mut self.tasks[index];
                    fired.push((task.id, task.payload.clone()));
                    task.due = task.due.saturating_add(period);
                }
                None => {
                    let task = self.tasks.remove(index);
                    fired.push((task.id, task.payload));
                }
            }
        }
        fired
    }
}
