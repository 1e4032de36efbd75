//! Drives a stepper with a fixed pause between steps so each step can be seen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::debug;

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(5);

/// Shared stop flag. Clones observe the same flag.
#[derive(Default, Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PacedOutcome {
    Completed { steps: usize },
    Cancelled { steps: usize },
}

#[derive(Copy, Clone, Debug)]
pub struct Pacer {
    delay: Duration,
}

impl Default for Pacer {
    fn default() -> Pacer {
        Pacer::new(DEFAULT_STEP_DELAY)
    }
}

impl Pacer {
    pub fn new(delay: Duration) -> Pacer {
        Pacer { delay }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Call `step` until it returns false, sleeping between calls. The token is checked before
    /// every call.
    pub fn run<F>(&self, cancel: &CancellationToken, mut step: F) -> PacedOutcome
        where F: FnMut() -> bool
    {
        let mut steps = 0;
        loop {
            if cancel.is_cancelled() {
                debug!(steps, "paced run cancelled");
                return PacedOutcome::Cancelled { steps };
            }

            steps += 1;
            if !step() {
                return PacedOutcome::Completed { steps };
            }

            if self.delay > Duration::from_millis(0) {
                thread::sleep(self.delay);
            }
        }
    }
}
