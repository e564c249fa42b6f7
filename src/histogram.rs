use crate::{
    event::Event,
    logger::{levels, Frontier, Logger, Timeout},
    quiet::Quiet,
    trace::Trace,
};
use core::time::Duration;
use serde::Serialize;
use std::io::Write;

/// Logger with the same contract as [`Tally`](crate::tally::Tally), except
/// that every repeat counter is a histogram indexed by stack depth, grown
/// lazily as deeper levels are observed.
#[derive(Debug)]
pub struct Histogram<W> {
    base: Quiet,
    trace: Trace,
    sink: W,
    events: u64,
    max_depth: usize,
    expand: Vec<u64>,
    backtrack: Vec<u64>,
    prune: Vec<u64>,
    prune_backtrack: Vec<u64>,
    strengthen: Vec<u64>,
    short_circuit: Vec<u64>,
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
    expand: &'a [u64],
    backtrack: &'a [u64],
    prune: &'a [u64],
    prunebacktrack: &'a [u64],
    strengthen: &'a [u64],
    shortcircuit: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    terminate_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_at: Option<u64>,
}

fn bump(counts: &mut Vec<u64>, depth: usize) {
    if counts.len() <= depth {
        counts.resize(depth + 1, 0);
    }
    counts[depth] += 1;
}

impl<W: Write> Histogram<W> {
    pub fn new(trace: Trace, sink: W) -> Self {
        Self {
            base: Quiet::new(),
            trace,
            sink,
            events: 0,
            max_depth: 0,
            expand: Vec::new(),
            backtrack: Vec::new(),
            prune: Vec::new(),
            prune_backtrack: Vec::new(),
            strengthen: Vec::new(),
            short_circuit: Vec::new(),
            terminate_at: None,
            timeout_at: None,
        }
    }

    pub const fn events(&self) -> u64 {
        self.events
    }

    pub const fn max_stack_depth(&self) -> usize {
        self.max_depth
    }

    /// Per-depth observation counts of `event`; empty for terminate and
    /// timeout, whose iteration stamps are exposed separately.
    pub fn counts(&self, event: Event) -> &[u64] {
        match event {
            Event::Expand => &self.expand,
            Event::Backtrack => &self.backtrack,
            Event::Prune => &self.prune,
            Event::PruneBacktrack => &self.prune_backtrack,
            Event::Strengthen => &self.strengthen,
            Event::ShortCircuit => &self.short_circuit,
            Event::Terminate | Event::Timeout => &[],
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
            Event::Expand => bump(&mut self.expand, depth),
            Event::Backtrack => bump(&mut self.backtrack, depth),
            Event::Prune => bump(&mut self.prune, depth),
            Event::PruneBacktrack => bump(&mut self.prune_backtrack, depth),
            Event::Strengthen => bump(&mut self.strengthen, depth),
            Event::ShortCircuit => bump(&mut self.short_circuit, depth),
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
                expand: &self.expand,
                backtrack: &self.backtrack,
                prune: &self.prune,
                prunebacktrack: &self.prune_backtrack,
                strengthen: &self.strengthen,
                shortcircuit: &self.short_circuit,
                terminate_at: self.terminate_at,
                timeout_at: self.timeout_at,
            };
            if let Ok(line) = serde_json::to_string(&record) {
                let _ = writeln!(self.sink, "{line}");
            }
        }
    }
}

impl<W: Write> Logger for Histogram<W> {
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
