use crate::{
    event::Event,
    logger::{levels, Frontier, Logger, Timeout},
    quiet::Quiet,
    trace::Trace,
};
use core::time::Duration;
use serde::Serialize;
use std::io::Write;

/// Logger that keeps one repeat counter per event kind and writes one JSON
/// trace record per line to its sink.
///
/// Counters are updated on every event; a record is emitted when the trace
/// predicate fires, and unconditionally for terminate and timeout events.
/// Timeout discipline is inherited from [`Quiet`], with a timeout event
/// recorded before the failure propagates.
#[derive(Debug)]
pub struct Tally<W> {
    base: Quiet,
    trace: Trace,
    sink: W,
    events: u64,
    max_depth: usize,
    expand: u64,
    backtrack: u64,
    prune: u64,
    prune_backtrack: u64,
    strengthen: u64,
    short_circuit: u64,
    terminate_at: Option<u64>,
    timeout_at: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Record<'a> {
    iter: u64,
    event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    objective: Option<&'a str>,
    stack_depth: usize,
    path: &'a [u64],
    stack: &'a [usize],
    max_stack_depth: usize,
    evts: u64,
    expand: u64,
    backtrack: u64,
    prune: u64,
    prunebacktrack: u64,
    strengthen: u64,
    shortcircuit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    terminate_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_at: Option<u64>,
}

impl<W: Write> Tally<W> {
    pub fn new(trace: Trace, sink: W) -> Self {
        Self {
            base: Quiet::new(),
            trace,
            sink,
            events: 0,
            max_depth: 0,
            expand: 0,
            backtrack: 0,
            prune: 0,
            prune_backtrack: 0,
            strengthen: 0,
            short_circuit: 0,
            terminate_at: None,
            timeout_at: None,
        }
    }

    /// Total number of events observed so far.
    pub const fn events(&self) -> u64 {
        self.events
    }

    pub const fn max_stack_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of observations of `event`; at most one for terminate and
    /// timeout.
    pub const fn count(&self, event: Event) -> u64 {
        match event {
            Event::Expand => self.expand,
            Event::Backtrack => self.backtrack,
            Event::Prune => self.prune,
            Event::PruneBacktrack => self.prune_backtrack,
            Event::Strengthen => self.strengthen,
            Event::ShortCircuit => self.short_circuit,
            Event::Terminate => self.terminate_at.is_some() as u64,
            Event::Timeout => self.timeout_at.is_some() as u64,
        }
    }

    pub const fn terminate_at(&self) -> Option<u64> {
        self.terminate_at
    }

    pub const fn timeout_at(&self) -> Option<u64> {
        self.timeout_at
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn record(&mut self, event: Event, objective: Option<&str>, iter: u64, stack: &dyn Frontier) {
        self.events += 1;
        let depth = stack.depth();
        self.max_depth = self.max_depth.max(depth);
        match event {
            Event::Expand => self.expand += 1,
            Event::Backtrack => self.backtrack += 1,
            Event::Prune => self.prune += 1,
            Event::PruneBacktrack => self.prune_backtrack += 1,
            Event::Strengthen => self.strengthen += 1,
            Event::ShortCircuit => self.short_circuit += 1,
            Event::Terminate => self.terminate_at = Some(iter),
            Event::Timeout => self.timeout_at = Some(iter),
        }
        let finale = matches!(event, Event::Terminate | Event::Timeout);
        if finale || self.trace.fires(event, self.events, depth) {
            let (path, residuals) = levels(stack);
            let record = Record {
                iter,
                event: event.name(),
                objective,
                stack_depth: depth,
                path: &path,
                stack: &residuals,
                max_stack_depth: self.max_depth,
                evts: self.events,
                expand: self.expand,
                backtrack: self.backtrack,
                prune: self.prune,
                prunebacktrack: self.prune_backtrack,
                strengthen: self.strengthen,
                shortcircuit: self.short_circuit,
                terminate_at: self.terminate_at,
                timeout_at: self.timeout_at,
            };
            if let Ok(line) = serde_json::to_string(&record) {
                let _ = writeln!(self.sink, "{line}");
            }
        }
    }
}

impl<W: Write> Logger for Tally<W> {
    fn log(&mut self, event: Event, iter: u64, stack: &dyn Frontier) {
        self.record(event, None, iter, stack);
    }

    fn strengthen(&mut self, objective: &str, iter: u64, stack: &dyn Frontier) {
        self.record(Event::Strengthen, Some(objective), iter, stack);
    }

    fn set_iteration_limit(&mut self, limit: Option<u64>) {
        self.base.set_iteration_limit(limit);
    }

    fn set_wall_limit(&mut self, limit: Duration) {
        self.base.set_wall_limit(limit);
    }

    fn timeout(&mut self, iter: u64, stack: &dyn Frontier) -> Result<(), Timeout> {
        match self.base.timeout(iter, stack) {
            Err(timeout) => {
                self.record(Event::Timeout, None, iter, stack);
                Err(timeout)
            }
            ok => ok,
        }
    }
}
