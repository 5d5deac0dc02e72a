//! Virtual-clock scheduler for driving widgets in tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::{
    executor::{LocalPool, LocalSpawner},
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};

use super::Scheduler;

struct PendingTimer {
    due_at: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

/// Handle returned by [`ManualScheduler`]'s [`Scheduler::schedule`].
#[derive(Debug)]
pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// Deterministic scheduler with a virtual clock.
///
/// Timers fire only when the clock is advanced, and spawned futures run only
/// when [`ManualScheduler::run_until_stalled`] is called (advancing the clock
/// does this too).
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            now_ms: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            pool: RefCell::new(pool),
            spawner,
        }
    }
}

impl ManualScheduler {
    /// Scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Timers that are scheduled and not cancelled.
    pub fn pending_timers(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    /// Move the clock forward, firing due timers in deadline order and
    /// draining spawned work after each one.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.now_ms.get().saturating_add(delta_ms);
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                timers.retain(|t| !t.cancelled.get());
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_at <= target)
                    .min_by_key(|(_, t)| t.due_at)
                    .map(|(i, _)| i);
                earliest.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.now_ms.set(timer.due_at.max(self.now_ms.get()));
            (timer.task)();
            self.run_until_stalled();
        }
        self.now_ms.set(target);
        self.run_until_stalled();
    }

    /// Poll spawned futures until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualTimer {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(PendingTimer {
            due_at: self.now_ms.get() + u64::from(delay_ms),
            cancelled: cancelled.clone(),
            task,
        });
        ManualTimer { cancelled }
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(future) {
            log::error!("Failed to spawn task: {err}");
        }
    }
}
