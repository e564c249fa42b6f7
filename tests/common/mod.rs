#![allow(dead_code)]

pub use ramify::*;
use core::time::Duration;

/// Logger that records every observation for later assertions while keeping
/// [`Quiet`]'s timeout discipline.
#[derive(Debug, Default)]
pub struct Recorder {
    base: Quiet,
    pub events: Vec<(Event, u64, usize)>,
    pub objectives: Vec<String>,
    pub paths: Vec<Vec<u64>>,
    pub residuals: Vec<Vec<usize>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<Event> {
        self.events.iter().map(|&(event, _, _)| event).collect()
    }

    pub fn count(&self, kind: Event) -> usize {
        self.events.iter().filter(|&&(event, _, _)| event == kind).count()
    }

    fn push(&mut self, event: Event, iter: u64, stack: &dyn Frontier) {
        let depth = stack.depth();
        self.paths.push((0..depth).map(|level| stack.advances(level)).collect());
        self.residuals.push((0..depth).map(|level| stack.residual(level)).collect());
        self.events.push((event, iter, depth));
    }
}

impl Logger for Recorder {
    fn log(&mut self, event: Event, iter: u64, stack: &dyn Frontier) {
        self.push(event, iter, stack);
    }

    fn strengthen(&mut self, objective: &str, iter: u64, stack: &dyn Frontier) {
        self.objectives.push(objective.to_string());
        self.push(Event::Strengthen, iter, stack);
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
                self.push(Event::Timeout, iter, stack);
                Err(timeout)
            }
            ok => ok,
        }
    }
}

/// Literal tree for engine tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub value: i64,
    pub children: Vec<Tree>,
}

pub fn leaf(value: i64) -> Tree {
    Tree { value, children: Vec::new() }
}

pub fn tree(value: i64, children: Vec<Tree>) -> Tree {
    Tree { value, children }
}

/// Generator over a [`Tree`] node's children.
#[derive(Clone, Debug)]
pub struct Kids {
    children: Vec<Tree>,
    cursor: usize,
}

impl Kids {
    pub fn of(node: &Tree) -> Self {
        Self { children: node.children.clone(), cursor: 0 }
    }
}

impl Generator for Kids {
    type Node = Tree;

    fn residual(&self) -> usize {
        self.children.len() - self.cursor
    }

    fn advance(&mut self) -> Option<Tree> {
        let child = self.children.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(child)
    }

    fn children(&self, node: &Tree) -> Self {
        Self::of(node)
    }
}

pub fn value(node: &Tree) -> i64 {
    node.value
}

pub fn below(_: &Tree, _: &Tree) -> Verdict {
    Verdict::Below
}

/// Max accumulator, for cross-checking maximization against enumeration.
#[derive(Clone, Copy, Debug)]
pub struct Peak(pub i64);

impl Accumulate<i64> for Peak {
    fn add(&mut self, value: i64) {
        self.0 = self.0.max(value);
    }

    fn value(self) -> i64 {
        self.0
    }
}
