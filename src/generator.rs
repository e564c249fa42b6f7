use crate::counted::Counted;

/// A stateful cursor over the children of a single parent node in an
/// implicitly defined tree.
///
/// The search engine never inspects node contents; it only drives cursors.
/// Implementations must uphold:
/// - [`Generator::residual`] is an upper bound on the number of children the
///   cursor can still emit, never increases across advances, and is zero
///   exactly when the cursor is exhausted.
/// - [`Generator::advance`] yields the next child and shrinks the residual by
///   at least one, or yields [`None`] once exhausted.
/// - [`Generator::children`] builds a fresh cursor over `node`'s children
///   without observing or mutating the current cursor, so it is safe to call
///   through any live cursor on any node.
#[must_use = "generators do nothing until driven by a search"]
pub trait Generator {
    type Node;

    /// Upper bound on the remaining children; zero iff exhausted.
    fn residual(&self) -> usize;

    /// Next child, or [`None`] once the cursor is exhausted.
    fn advance(&mut self) -> Option<Self::Node>;

    /// Fresh cursor over `node`'s children, independent of this cursor's
    /// state.
    fn children(&self, node: &Self::Node) -> Self;

    /// Wraps `self` in a [`Counted`] decorator that tracks how many children
    /// have been emitted. The search engine wraps every generator it pushes.
    fn counted(self) -> Counted<Self>
    where
        Self: Sized,
    {
        Counted::new(self)
    }
}
