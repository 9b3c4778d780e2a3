//! Checking [linearizability](https://en.wikipedia.org/wiki/Linearizability) of a
//! history of operations applied to a shared object.
//!
//! For more information, see the documentation of the [`WGLChecker`] and [`History`] structs.
use std::collections::HashSet;
use std::marker::PhantomData;

use crate::linearizability::history::{Entry, History};
use crate::specifications::Specification;

pub mod history;

/// A linearizability checker.
///
/// An implementation of the algorithm originally defined by Jeannette Wing and Chun Gong
/// [\[WG93\]](https://www.cs.cmu.edu/~wing/publications/WingGong93.pdf), and
/// extended by Gavin Lowe [\[L17\]](http://www.cs.ox.ac.uk/people/gavin.lowe/LinearizabiltyTesting/).
/// This particular implementation is based on the description given by Alex Horn
/// and Daniel Kroenig [\[HK15\]](https://arxiv.org/abs/1504.00204).
///
/// Given a history of operations, the algorithm works by linearizing each operation
/// as soon as possible. When an operation cannot be linearized, it backtracks and
/// proceeds with the next operation. Memoization occurs by caching each partial
/// linearization, and preventing the algorithm from continuing its search when it
/// is already known that the state of the object and remaining operations have no
/// valid linearization.
///
/// # Examples
///
/// Using the [`Action::Call`](history::Action::Call) and
/// [`Action::Response`](history::Action::Response) types, operations on a
/// floating-point register are modeled with a call whose result is `None`, and a
/// response carrying the value that was returned.
///
/// ```
/// use atomicfloat_utils::linearizability::{WGLChecker, history::{History, Action::{Call, Response}}};
/// use atomicfloat_utils::specifications::float::{FloatOperation::*, FloatRegisterSpecification};
///
/// type FloatChecker = WGLChecker<FloatRegisterSpecification>;
///
/// // Concurrent additions can be linearized in either order, as long as
/// // each returns a sum consistent with that order.
/// // P0 |--------------|  Add(1.0) -> 1.0
/// // P1  |--------------| Add(2.0) -> 3.0
/// let history = History::from_actions(vec![
///     (0, Call(Add(1.0, None))),
///     (1, Call(Add(2.0, None))),
///     (0, Response(Add(1.0, Some(1.0)))),
///     (1, Response(Add(2.0, Some(3.0)))),
/// ]);
/// assert!(FloatChecker::is_linearizable(history));
///
/// // Two sequential additions cannot both return the same sum.
/// // P0 |---|       Add(1.0) -> 1.0
/// // P1       |---| Add(1.0) -> 1.0
/// let history = History::from_actions(vec![
///     (0, Call(Add(1.0, None))),
///     (0, Response(Add(1.0, Some(1.0)))),
///     (1, Call(Add(1.0, None))),
///     (1, Response(Add(1.0, Some(1.0)))),
/// ]);
/// assert!(!FloatChecker::is_linearizable(history));
/// ```
pub struct WGLChecker<S: Specification> {
    data_type: PhantomData<S>,
}

type OperationEntry<S> = Entry<<S as Specification>::Operation>;
type OperationCall<S> = (
    (OperationEntry<S>, OperationEntry<S>),
    <S as Specification>::State,
);

impl<S: Specification> WGLChecker<S> {
    /// Returns whether the history of operations is linearizable with respect to the specification.
    pub fn is_linearizable(mut history: History<S::Operation>) -> bool {
        let mut state = S::init();
        let mut linearized = vec![false; history.len()];
        let mut calls: Vec<OperationCall<S>> = Vec::new();
        let mut cache: HashSet<(Vec<bool>, S::State)> = HashSet::new();
        let mut curr = 0;
        loop {
            if history.is_empty() {
                return true;
            }
            match &history[curr] {
                Entry::Call(call) => match &history[history.index_of_id(call.response)] {
                    Entry::Call(_) => panic!("Response cannot be a call entry"),
                    Entry::Response(response) => {
                        let (is_valid, new_state) = S::apply(&response.operation, &state);
                        let mut changed = false;
                        if is_valid {
                            let mut tmp_linearized = linearized.clone();
                            tmp_linearized[call.id] = true;
                            changed = cache.insert((tmp_linearized, new_state.clone()));
                        }
                        if changed {
                            linearized[call.id] = true;
                            let call = history.lift(curr);
                            calls.push((call, state));
                            state = new_state;
                            curr = 0;
                        } else {
                            curr += 1;
                        }
                    }
                },
                Entry::Response(_) => match calls.pop() {
                    None => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(?state, "history has no valid linearization");
                        return false;
                    }
                    Some(((call, response), old_state)) => {
                        state = old_state;
                        linearized[call.id()] = false;
                        let (call_index, _) = history.unlift(call, response);
                        curr = call_index + 1;
                    }
                },
            }
        }
    }
}
