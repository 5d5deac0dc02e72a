//! Timers and task spawning.
//!
//! A scheduled task is represented by its handle: dropping the handle
//! cancels the task, the same contract as `gloo_timers::callback::Timeout`.
//! Keeping at most one handle in a slot therefore gives "cancel the previous
//! timer on every new keystroke" for free.

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;

#[cfg(any(test, feature = "test-support"))]
mod manual;

#[cfg(any(test, feature = "test-support"))]
pub use manual::{ManualScheduler, ManualTimer};

/// Deferred execution on the UI thread.
pub trait Scheduler: 'static {
    /// Handle of a pending timer; dropping it cancels the timer.
    type Timer: 'static;

    /// Run `task` once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Timer;

    /// Drive `future` to completion in the background.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

/// Browser scheduler: `setTimeout` plus the wasm-bindgen microtask executor.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    type Timer = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, move || task())
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}
