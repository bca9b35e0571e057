//! One-shot delayed tasks used for cache eviction.
//!
//! A scheduled task is cancelled by dropping its handle.

use std::time::Duration;

pub type Task = Box<dyn FnOnce() + 'static>;

/// Runs a task once after a delay. Dropping the returned handle cancels it.
pub trait Scheduler: 'static {
    type Handle: 'static;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Dispose of the handle of a task that is running right now
    fn release_fired(handle: Self::Handle) {
        drop(handle);
    }
}

/// Browser timers (`setTimeout`) via gloo
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task)
    }

    /// Dropping a `Timeout` from inside its own callback would tear down the
    /// running closure; hand it to JS instead, a one-shot closure frees itself.
    fn release_fired(handle: Self::Handle) {
        let _ = handle.forget();
    }
}
