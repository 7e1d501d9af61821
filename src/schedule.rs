//! Deferred Tasks
//!
//! Badge removal waits for the DOM to become interactive and then for a
//! fixed delay, so the badge is painted before it animates out.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::error::{DocketError, DocketResult};

/// Delay between the DOM becoming interactive and the removal class
pub const REMOVAL_DELAY: Duration = Duration::from_millis(500);

const READY_EVENT: &str = "DOMContentLoaded";

/// A removal the controller wants to happen later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalTask {
    pub delay: Duration,
}

impl RemovalTask {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for RemovalTask {
    fn default() -> Self {
        Self::new(REMOVAL_DELAY)
    }
}

/// Shared flag that turns a scheduled task into a no-op
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// Wrap `task` so it only runs while the token is live
    pub fn guard<F>(&self, task: F) -> impl FnOnce() + 'static
    where
        F: FnOnce() + 'static,
    {
        let flag = Rc::clone(&self.0);
        move || {
            if !flag.get() {
                task();
            }
        }
    }
}

/// Timer armed once the document is interactive.
///
/// The timer and ready listener are handed to the browser and outlive this
/// handle, so a collected JS wrapper does not lose the removal. `cancel`
/// is the only way to stop it.
pub struct ScheduledTask {
    token: CancelToken,
}

impl ScheduledTask {
    pub fn after_interactive<F>(
        document: &Document,
        delay: Duration,
        task: F,
    ) -> DocketResult<Self>
    where
        F: FnOnce() + 'static,
    {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let token = CancelToken::default();
        let run = token.guard(task);

        if document.ready_state() != "loading" {
            let _ = Timeout::new(millis, run).forget();
            return Ok(Self { token });
        }

        let mut run = Some(run);
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Some(run) = run.take() {
                let _ = Timeout::new(millis, run).forget();
            }
        });
        document
            .add_event_listener_with_callback(READY_EVENT, on_ready.as_ref().unchecked_ref())
            .map_err(|e| DocketError::dom("listen for DOMContentLoaded", e))?;
        // fires once per page; the listener lives as long as the document
        on_ready.forget();

        Ok(Self { token })
    }

    /// Stop the task if it has not run yet
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
