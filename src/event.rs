/// The closed set of events a search emits to its logger.
///
/// Every search starts with an [`Event::Expand`] for the root and ends with
/// exactly one of [`Event::Terminate`] or [`Event::Timeout`]. A
/// [`Event::ShortCircuit`] occurs at most once, immediately before the
/// terminate, and a strengthen for a node always precedes that node's
/// expand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Event {
    /// A node was entered and its children generator pushed.
    Expand,
    /// The top generator was exhausted and popped.
    Backtrack,
    /// A candidate's subtree was skipped; its later siblings survive.
    Prune,
    /// A candidate's subtree and all of its later siblings were skipped.
    PruneBacktrack,
    /// The incumbent was replaced by a strictly better node.
    Strengthen,
    /// The incumbent reached the caller's target value.
    ShortCircuit,
    /// The search ran to completion.
    Terminate,
    /// The search exceeded its iteration bound or wall-clock deadline.
    Timeout,
}

impl Event {
    /// Canonical wire name, as it appears in trace records.
    pub const fn name(self) -> &'static str {
        match self {
            Event::Expand => "EXPAND",
            Event::Backtrack => "BACKTRACK",
            Event::Prune => "PRUNE",
            Event::PruneBacktrack => "PRUNEBACKTRACK",
            Event::Strengthen => "STRENGTHEN",
            Event::ShortCircuit => "SHORTCIRCUIT",
            Event::Terminate => "TERMINATE",
            Event::Timeout => "TIMEOUT",
        }
    }
}
