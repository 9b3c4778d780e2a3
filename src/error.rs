//! Errors raised while configuring a register.
use thiserror::Error;

use crate::sync::Ordering;

/// Errors that can occur while configuring an [`AtomicFloat`](crate::AtomicFloat).
///
/// Register operations themselves never fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingError {
    /// The requested memory ordering is weaker than acquire/release, or cannot
    /// be applied to both loads and compare-and-swap.
    #[error("unsupported memory ordering {0:?}: expected SeqCst or AcqRel")]
    Unsupported(Ordering),
}
