use crate::{generator::Generator, search::Verdict};
use core::{cmp::Reverse, fmt};
use std::rc::Rc;
use thiserror::Error;

/// A multiway number-partitioning instance: split `sizes` into `parts`
/// subsets so that the largest subset sum is as small as possible.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    known: Option<u64>,
    parts: usize,
    sizes: Vec<u64>,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InstanceError {
    #[error("missing the known-solution line")]
    MissingKnown,
    #[error("missing the part-count line")]
    MissingParts,
    #[error("missing item sizes")]
    MissingSizes,
    #[error("malformed number {0:?}")]
    Malformed(String),
    #[error("at least two parts are required, got {0}")]
    TooFewParts(usize),
    #[error("item sizes must be positive")]
    ZeroSize,
    #[error("item sizes must be non-increasing")]
    Unsorted,
}

fn number(line: &str) -> Result<u64, InstanceError> {
    line.parse()
        .map_err(|_| InstanceError::Malformed(line.to_string()))
}

impl Instance {
    pub fn new(parts: usize, sizes: Vec<u64>) -> Result<Self, InstanceError> {
        if parts < 2 {
            return Err(InstanceError::TooFewParts(parts));
        }
        if sizes.is_empty() {
            return Err(InstanceError::MissingSizes);
        }
        if sizes.contains(&0) {
            return Err(InstanceError::ZeroSize);
        }
        if sizes.windows(2).any(|pair| pair[0] < pair[1]) {
            return Err(InstanceError::Unsorted);
        }
        Ok(Self {
            known: None,
            parts,
            sizes,
        })
    }

    /// Parses the plain-text instance format: the first significant line is
    /// the known optimum (or `-1` when unknown), the second is the number of
    /// parts and every following line is one item size, in non-increasing
    /// order. Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, InstanceError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        let known = match lines.next().ok_or(InstanceError::MissingKnown)? {
            "-1" => None,
            line => Some(number(line)?),
        };
        let parts = number(lines.next().ok_or(InstanceError::MissingParts)?)? as usize;
        let sizes = lines.map(number).collect::<Result<Vec<_>, _>>()?;
        let mut instance = Self::new(parts, sizes)?;
        instance.known = known;
        Ok(instance)
    }

    /// Optimum recorded in the instance file, when present.
    pub const fn known(&self) -> Option<u64> {
        self.known
    }

    pub const fn parts(&self) -> usize {
        self.parts
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn total(&self) -> u64 {
        self.sizes.iter().sum()
    }

    /// Smallest makespan any partition can hope for: every part must hold at
    /// least the average load, and some part must hold the largest item.
    pub fn ceiling(&self) -> u64 {
        let parts = self.parts as u64;
        let average = (self.total() + parts - 1) / parts;
        average.max(self.sizes.first().copied().unwrap_or(0))
    }
}

/// A prefix assignment of items to parts. Items are placed in instance
/// order, so the node is fully described by the loads and the per-item part
/// choices made so far.
#[derive(Clone, Debug)]
pub struct Assignment {
    instance: Rc<Instance>,
    loads: Vec<u64>,
    placed: Vec<usize>,
}

impl Assignment {
    /// The empty assignment: the search root.
    pub fn root(instance: Instance) -> Self {
        let loads = vec![0; instance.parts()];
        Self {
            instance: Rc::new(instance),
            loads,
            placed: Vec::new(),
        }
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Current load of every part.
    pub fn loads(&self) -> &[u64] {
        &self.loads
    }

    /// Part chosen for each placed item, in instance order.
    pub fn placed(&self) -> &[usize] {
        &self.placed
    }

    pub fn complete(&self) -> bool {
        self.placed.len() == self.instance.sizes().len()
    }

    /// Load of the fullest part.
    pub fn tallest(&self) -> u64 {
        self.loads.iter().copied().max().unwrap_or(0)
    }

    /// Search objective: larger is better, so completed partitions rate as
    /// their negated makespan. Prefixes rate one past the worst completed
    /// makespan, which keeps the root a lower bound on every reachable value
    /// and lets any finished partition strengthen it.
    pub fn score(&self) -> Reverse<u64> {
        if self.complete() {
            Reverse(self.tallest())
        } else {
            Reverse(self.instance.total() + 1)
        }
    }

    fn place(&self, part: usize) -> Self {
        let mut next = self.clone();
        next.loads[part] += self.instance.sizes()[self.placed.len()];
        next.placed.push(part);
        next
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in 0..self.loads.len() {
            if part > 0 {
                f.write_str(" ")?;
            }
            f.write_str("[")?;
            let mut first = true;
            for (item, &choice) in self.placed.iter().enumerate() {
                if choice == part {
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", self.instance.sizes()[item])?;
                    first = false;
                }
            }
            write!(f, "]={}", self.loads[part])?;
        }
        Ok(())
    }
}

/// Generates the children of an assignment: the next item placed into each
/// candidate part, lightest part first, with equal-load parts collapsed to
/// their lowest-index representative.
///
/// The ordering makes sibling makespans non-decreasing, which licenses the
/// [`Verdict::PruneBacktrack`] verdict of [`prune`]; the collapsing removes
/// symmetric subtrees that differ only by a part renaming.
#[derive(Clone, Debug)]
pub struct Branches {
    parent: Assignment,
    order: Vec<usize>,
    cursor: usize,
}

impl Branches {
    pub fn new(parent: Assignment) -> Self {
        let mut order = Vec::new();
        if !parent.complete() {
            let mut parts: Vec<usize> = (0..parent.loads().len()).collect();
            parts.sort_by_key(|&part| parent.loads()[part]);
            let mut last = None;
            for part in parts {
                let load = parent.loads()[part];
                if last != Some(load) {
                    order.push(part);
                    last = Some(load);
                }
            }
        }
        Self {
            parent,
            order,
            cursor: 0,
        }
    }
}

impl Generator for Branches {
    type Node = Assignment;

    fn residual(&self) -> usize {
        self.order.len() - self.cursor
    }

    fn advance(&mut self) -> Option<Assignment> {
        let part = *self.order.get(self.cursor)?;
        self.cursor += 1;
        Some(self.parent.place(part))
    }

    fn children(&self, node: &Assignment) -> Self {
        Self::new(node.clone())
    }
}

/// Pruning predicate for the partitioning search. Any completion of the
/// candidate keeps its fullest part at least as full, so a candidate whose
/// tallest part already reaches the incumbent's makespan cannot improve on
/// it, and thanks to the sibling ordering of [`Branches`] neither can any
/// later sibling.
pub fn prune(candidate: &Assignment, incumbent: &Assignment) -> Verdict {
    let Reverse(bar) = incumbent.score();
    if candidate.tallest() >= bar {
        Verdict::PruneBacktrack
    } else {
        Verdict::Below
    }
}

/// Renders a partitioning objective for strengthen records as the plain
/// makespan.
pub fn render(score: &Reverse<u64>) -> String {
    score.0.to_string()
}
