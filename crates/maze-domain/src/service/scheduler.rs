//! Scheduler - Fire-once deferred callbacks on simulated time
//!
//! The game never blocks. "Do this in two seconds" becomes an entry in
//! this queue, and the tick loop pops whatever is due. Entries can be
//! cancelled, which is how a duel invalidates its pending work when it
//! ends early.

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    due_ms: u64,
    handle: TaskHandle,
    task: T,
}

/// Simulated-time timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Schedule `task` to fire once the clock reaches `due_ms`
    pub fn schedule(&mut self, due_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            due_ms,
            handle,
            task,
        });
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel every pending task matching the predicate
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.task));
        before - self.entries.len()
    }

    /// Remove and return every task due at `now_ms`, earliest first.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<T> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.due_ms <= now_ms {
                due.push(entry);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;
        due.sort_by_key(|e| (e.due_ms, e.handle));
        due.into_iter().map(|e| e.task).collect()
    }

    /// Due time of the earliest pending task
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
