//! The one timer a game owns.
//!
//! A controller drives either the simulation tick or the restart countdown,
//! never both. Scheduling a new periodic task replaces the previous one, and
//! `pop_due` only ever yields the live task, so a cancelled or replaced task
//! can never fire again. Every task carries a fresh id, which lets a caller
//! holding an old handle tell it apart from the live one. The color-change
//! flash gets its own one-shot slot that is always drained before the next
//! periodic firing.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Tick,
    Countdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    pub id: u64,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, Copy)]
struct PeriodicTask {
    handle: TaskHandle,
    period: Duration,
    due: Instant,
}

/// Something that became due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    /// Restore the normal frame after a flash overlay
    FlashEnd,
    Task(TaskHandle),
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    periodic: Option<PeriodicTask>,
    flash_due: Option<Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is running and schedule `kind` to fire every `period`,
    /// first at `now + period`
    pub fn schedule(&mut self, kind: TaskKind, period: Duration, now: Instant) -> TaskHandle {
        self.cancel();
        self.next_id += 1;
        let handle = TaskHandle {
            id: self.next_id,
            kind,
        };
        self.periodic = Some(PeriodicTask {
            handle,
            period,
            due: now + period,
        });
        handle
    }

    /// Stop the periodic task; nothing it scheduled fires afterwards
    pub fn cancel(&mut self) -> Option<TaskHandle> {
        self.periodic.take().map(|task| task.handle)
    }

    pub fn active(&self) -> Option<TaskHandle> {
        self.periodic.map(|task| task.handle)
    }

    /// Whether `handle` is the task `pop_due` would fire
    pub fn is_current(&self, handle: TaskHandle) -> bool {
        self.active() == Some(handle)
    }

    pub fn schedule_flash_end(&mut self, at: Instant) {
        self.flash_due = Some(at);
    }

    pub fn cancel_flash(&mut self) {
        self.flash_due = None;
    }

    pub fn flash_pending(&self) -> bool {
        self.flash_due.is_some()
    }

    /// Earliest instant at which `pop_due` will return something
    pub fn next_deadline(&self) -> Option<Instant> {
        let periodic = self.periodic.map(|task| task.due);
        match (self.flash_due, periodic) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Take the next thing due at `now`.
    ///
    /// A pending flash end is returned before any periodic firing that is also
    /// due, even if the flash was scheduled later. Missed periods are skipped
    /// rather than replayed in a burst.
    pub fn pop_due(&mut self, now: Instant) -> Option<Due> {
        let periodic_due = self.periodic.is_some_and(|task| task.due <= now);

        if let Some(flash_due) = self.flash_due {
            if flash_due <= now || periodic_due {
                self.flash_due = None;
                return Some(Due::FlashEnd);
            }
        }

        if !periodic_due {
            return None;
        }

        let task = self.periodic.as_mut()?;
        let mut next = task.due + task.period;
        if next <= now {
            next = now + task.period;
        }
        task.due = next;
        Some(Due::Task(task.handle))
    }
}
