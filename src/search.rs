use crate::{
    accumulate::Accumulate,
    counted::Counted,
    event::Event,
    generator::Generator,
    logger::{Logger, Stack, Timeout},
};
use core::fmt;

/// Verdict of a pruning predicate over a non-improving candidate and the
/// current incumbent.
///
/// A predicate is admissible when it never returns [`Verdict::Prune`] or
/// [`Verdict::PruneBacktrack`] for a subtree that contains a node whose
/// objective exceeds the incumbent's. [`Verdict::PruneBacktrack`] further
/// requires the caller to order siblings so that none after the candidate
/// can improve on it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Verdict {
    /// No verdict: descend into the candidate.
    Below,
    /// Skip the candidate's subtree; its later siblings survive.
    Prune,
    /// Skip the candidate's subtree and all of its later siblings.
    PruneBacktrack,
}

/// Iterative depth-first driver over a stack of counting generators.
///
/// One `Search` owns its logger; every call runs an independent search while
/// the logger's accumulated statistics persist across calls. Three modes are
/// exposed: plain enumeration with an accumulator
/// ([`Search::enumerate`]), branch-and-bound maximization
/// ([`Search::maximize`]) and decision search ([`Search::decide`]).
///
/// Given identical inputs and a deterministic child order, a search emits an
/// identical event sequence and returns an identical result.
#[derive(Debug)]
pub struct Search<L> {
    pub logger: L,
}

impl<L: Logger> Search<L> {
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Visits every node of the tree spanned by `branches` (a generator over
    /// the root's children) and folds each visited node's objective into
    /// `accumulator`, returning the final value.
    pub fn enumerate<G, T, F, A>(
        &mut self,
        branches: G,
        objective: F,
        mut accumulator: A,
    ) -> Result<T, Timeout>
    where
        G: Generator,
        F: Fn(&G::Node) -> T,
        A: Accumulate<T>,
    {
        let mut stack: Vec<Counted<G>> = Vec::new();
        let mut iter = 0;
        self.logger.log(Event::Expand, iter, &Stack(stack.as_slice()));
        stack.push(branches.counted());
        while !stack.is_empty() {
            iter += 1;
            self.logger.timeout(iter, &Stack(stack.as_slice()))?;
            match stack.last_mut() {
                None => break,
                Some(top) => match top.advance() {
                    Some(child) => {
                        let below = top.children(&child);
                        accumulator.add(objective(&child));
                        self.logger.log(Event::Expand, iter, &Stack(stack.as_slice()));
                        stack.push(below);
                    }
                    None => {
                        stack.pop();
                        self.logger.log(Event::Backtrack, iter, &Stack(stack.as_slice()));
                    }
                },
            }
        }
        self.logger.log(Event::Terminate, iter, &Stack(stack.as_slice()));
        Ok(accumulator.value())
    }

    /// Same as [`Search::maximize`], with an explicit renderer used to
    /// stringify objective values for strengthen records.
    ///
    /// The caller asserts that the root's objective is a lower bound on any
    /// reachable value, that `prune` is admissible, and, when `greatest` is
    /// supplied, that it is an upper bound on any reachable value; the
    /// search then terminates early on the first node attaining it, which
    /// need not be the node an exhaustive search would return.
    pub fn maximize_with<G, T, F, P, R>(
        &mut self,
        root: G::Node,
        branches: G,
        objective: F,
        prune: P,
        greatest: Option<T>,
        render: R,
    ) -> Result<G::Node, Timeout>
    where
        G: Generator,
        T: Ord,
        F: Fn(&G::Node) -> T,
        P: Fn(&G::Node, &G::Node) -> Verdict,
        R: Fn(&T) -> String,
    {
        let mut incumbent = root;
        let mut best = objective(&incumbent);
        let mut stack: Vec<Counted<G>> = Vec::new();
        let mut iter = 0;
        self.logger.log(Event::Expand, iter, &Stack(stack.as_slice()));
        stack.push(branches.counted());
        while !stack.is_empty() {
            iter += 1;
            self.logger.timeout(iter, &Stack(stack.as_slice()))?;
            match stack.last_mut() {
                None => break,
                Some(top) => match top.advance() {
                    Some(child) => {
                        let value = objective(&child);
                        if value > best {
                            let below = top.children(&child);
                            self.logger.strengthen(&render(&value), iter, &Stack(stack.as_slice()));
                            incumbent = child;
                            best = value;
                            if greatest.as_ref() == Some(&best) {
                                self.logger.log(Event::ShortCircuit, iter, &Stack(stack.as_slice()));
                                self.logger.log(Event::Terminate, iter, &Stack(stack.as_slice()));
                                return Ok(incumbent);
                            }
                            self.logger.log(Event::Expand, iter, &Stack(stack.as_slice()));
                            stack.push(below);
                        } else {
                            match prune(&child, &incumbent) {
                                Verdict::Below => {
                                    let below = top.children(&child);
                                    self.logger.log(Event::Expand, iter, &Stack(stack.as_slice()));
                                    stack.push(below);
                                }
                                Verdict::Prune => {
                                    self.logger.log(Event::Prune, iter, &Stack(stack.as_slice()));
                                }
                                Verdict::PruneBacktrack => {
                                    self.logger.log(
                                        Event::PruneBacktrack,
                                        iter,
                                        &Stack(stack.as_slice()),
                                    );
                                    stack.pop();
                                }
                            }
                        }
                    }
                    None => {
                        stack.pop();
                        self.logger.log(Event::Backtrack, iter, &Stack(stack.as_slice()));
                    }
                },
            }
        }
        self.logger.log(Event::Terminate, iter, &Stack(stack.as_slice()));
        Ok(incumbent)
    }

    /// Depth-first branch-and-bound maximization of `objective` over the
    /// tree spanned by `branches`.
    ///
    /// The incumbent starts at `root` and is replaced only by nodes of
    /// strictly greater objective value. When `greatest` is supplied and the
    /// incumbent attains it, the search short-circuits and returns
    /// immediately. Non-improving candidates are submitted to `prune`; see
    /// [`Verdict`] for the admissibility requirements.
    pub fn maximize<G, T, F, P>(
        &mut self,
        root: G::Node,
        branches: G,
        objective: F,
        prune: P,
        greatest: Option<T>,
    ) -> Result<G::Node, Timeout>
    where
        G: Generator,
        T: Ord + fmt::Display,
        F: Fn(&G::Node) -> T,
        P: Fn(&G::Node, &G::Node) -> Verdict,
    {
        self.maximize_with(root, branches, objective, prune, greatest, |value| {
            value.to_string()
        })
    }

    /// Same as [`Search::decide`], with an explicit objective renderer.
    pub fn decide_with<G, T, F, P, R>(
        &mut self,
        root: G::Node,
        branches: G,
        objective: F,
        prune: P,
        greatest: T,
        render: R,
    ) -> Result<Option<G::Node>, Timeout>
    where
        G: Generator,
        T: Clone + Ord,
        F: Fn(&G::Node) -> T,
        P: Fn(&G::Node, &G::Node) -> Verdict,
        R: Fn(&T) -> String,
    {
        let found = self.maximize_with(
            root,
            branches,
            &objective,
            prune,
            Some(greatest.clone()),
            render,
        )?;
        Ok((objective(&found) == greatest).then_some(found))
    }

    /// Decision search: runs a maximization that short-circuits on
    /// `greatest` and returns the resulting node iff its objective equals
    /// `greatest`, which requires `greatest` to be a true upper bound on any
    /// reachable value.
    pub fn decide<G, T, F, P>(
        &mut self,
        root: G::Node,
        branches: G,
        objective: F,
        prune: P,
        greatest: T,
    ) -> Result<Option<G::Node>, Timeout>
    where
        G: Generator,
        T: Clone + Ord + fmt::Display,
        F: Fn(&G::Node) -> T,
        P: Fn(&G::Node, &G::Node) -> Verdict,
    {
        self.decide_with(root, branches, objective, prune, greatest, |value| {
            value.to_string()
        })
    }
}
