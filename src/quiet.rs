use crate::{
    event::Event,
    logger::{Frontier, Logger, Timeout},
};
use core::time::Duration;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

/// Logger that records nothing and only enforces the timeout discipline.
///
/// The wall-clock deadline is armed by a detached timer thread that sets an
/// atomic flag; the flag is written once and polled once per iteration, so a
/// relaxed ordering suffices. A timer that fails to start degrades to "no
/// wall-clock timeout".
#[derive(Clone, Debug, Default)]
pub struct Quiet {
    limit: Option<u64>,
    expired: Arc<AtomicBool>,
}

impl Quiet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for Quiet {
    fn log(&mut self, _: Event, _: u64, _: &dyn Frontier) {}

    fn strengthen(&mut self, _: &str, _: u64, _: &dyn Frontier) {}

    fn set_iteration_limit(&mut self, limit: Option<u64>) {
        self.limit = limit;
    }

    fn set_wall_limit(&mut self, limit: Duration) {
        let expired = Arc::clone(&self.expired);
        if limit.is_zero() {
            // An already-expired deadline must be observable on the first
            // poll, without racing a thread start.
            expired.store(true, Ordering::Relaxed);
            return;
        }
        let _ = thread::Builder::new()
            .name("search-deadline".into())
            .spawn(move || {
                thread::sleep(limit);
                expired.store(true, Ordering::Relaxed);
            });
    }

    fn timeout(&mut self, iter: u64, _: &dyn Frontier) -> Result<(), Timeout> {
        if self.expired.load(Ordering::Relaxed) {
            return Err(Timeout { iterations: iter });
        }
        match self.limit {
            Some(limit) if iter > limit => Err(Timeout { iterations: iter }),
            _ => Ok(()),
        }
    }
}
