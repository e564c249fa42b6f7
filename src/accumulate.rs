use core::ops::AddAssign;

/// Folds the objective values of every node visited by an enumeration
/// search.
///
/// `add` must be commutative and associative, since only the set of visited
/// nodes is guaranteed, not a useful order.
pub trait Accumulate<T>: Sized {
    fn add(&mut self, value: T);
    fn value(self) -> T;
}

/// Any additive value works directly as a sum accumulator, so `0` is a valid
/// accumulator for an integer-valued objective.
impl<T: AddAssign> Accumulate<T> for T {
    fn add(&mut self, value: T) {
        *self += value;
    }

    fn value(self) -> T {
        self
    }
}
