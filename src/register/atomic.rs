use std::fmt;

use crate::error::OrderingError;
use crate::sync::{AtomicU64, Ordering};

use super::FloatRegister;

/// A lock-free shared-memory register containing an `f64`.
///
/// The register stores the bit pattern of its value in an `AtomicU64`. Since
/// compare-and-swap is only available for integers, every update is performed
/// by an optimistic loop: read the current bit pattern, decode it, compute the
/// candidate value, and attempt to swap the observed pattern for the
/// candidate's. If another thread changed the register in the meantime the
/// swap fails, and the loop starts over from the value that thread installed.
///
/// Floating-point arithmetic and comparisons always happen on the decoded
/// `f64`, never on its bit pattern, so the usual IEEE-754 rules apply. In
/// particular, comparisons involving NaN are always false: once the register
/// contains NaN, neither [`greater_than_swap`](FloatRegister::greater_than_swap)
/// nor [`less_than_swap`](FloatRegister::less_than_swap) can ever replace it,
/// and neither will ever install a NaN.
///
/// # Progress
///
/// Operations never block. A thread only retries when some other thread's
/// compare-and-swap succeeded, so the register as a whole always makes
/// progress, although an individual thread can be starved by heavy contention.
/// There is no backoff.
///
/// # Memory Ordering
///
/// By default all accesses use sequential consistency. See
/// [`AtomicFloat::with_ordering`] to relax this to acquire/release.
///
/// # Examples
///
/// Keeping a running minimum and maximum of values produced by several
/// threads.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use atomicfloat::{AtomicFloat, FloatRegister};
///
/// let min = Arc::new(AtomicFloat::new(f64::INFINITY));
/// let max = Arc::new(AtomicFloat::new(f64::NEG_INFINITY));
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let (min, max) = (min.clone(), max.clone());
///         thread::spawn(move || {
///             for j in 0..10 {
///                 let value = (i * 10 + j) as f64;
///                 min.greater_than_swap(value);
///                 max.less_than_swap(value);
///             }
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(min.load(), 0.0);
/// assert_eq!(max.load(), 39.0);
/// ```
pub struct AtomicFloat {
    bits: AtomicU64,
    ordering: Ordering,
}

impl AtomicFloat {
    /// Creates a new register containing `value`, whose operations use the
    /// specified memory ordering.
    ///
    /// Only `SeqCst` and `AcqRel` are accepted. With `AcqRel`, successful
    /// compare-and-swaps use `AcqRel` while loads, and compare-and-swaps that
    /// fail, use `Acquire`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Unsupported`] for any other ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::Ordering;
    /// use atomicfloat::{AtomicFloat, FloatRegister, OrderingError};
    ///
    /// let register = AtomicFloat::with_ordering(1.0, Ordering::AcqRel).unwrap();
    /// assert_eq!(register.add(1.0), 2.0);
    ///
    /// let error = AtomicFloat::with_ordering(1.0, Ordering::Relaxed).unwrap_err();
    /// assert_eq!(error, OrderingError::Unsupported(Ordering::Relaxed));
    /// ```
    pub fn with_ordering(value: f64, ordering: Ordering) -> Result<Self, OrderingError> {
        match ordering {
            Ordering::SeqCst | Ordering::AcqRel => Ok(Self::new_with_order(value, ordering)),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?ordering, "rejected memory ordering for AtomicFloat");
                Err(OrderingError::Unsupported(ordering))
            }
        }
    }

    fn new_with_order(value: f64, ordering: Ordering) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
            ordering,
        }
    }

    /// Returns the memory ordering used by successful compare-and-swaps.
    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Ordering for plain loads and for compare-and-swaps that fail.
    fn read_ordering(&self) -> Ordering {
        match self.ordering {
            Ordering::AcqRel => Ordering::Acquire,
            ordering => ordering,
        }
    }

    /// Atomically replaces the contents of the register with `next(current)`,
    /// returning the value that was replaced.
    ///
    /// `next` may be called more than once if other threads update the
    /// register concurrently, and so should be free of side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(3.0);
    /// assert_eq!(register.update(|x| x * x - 1.0), 3.0);
    /// assert_eq!(register.load(), 8.0);
    /// ```
    pub fn update<F>(&self, mut next: F) -> f64
    where
        F: FnMut(f64) -> f64,
    {
        match self.transition(|current| Some(next(current))) {
            Ok((previous, _)) | Err(previous) => previous,
        }
    }

    /// Consumes the register, returning the value it contains.
    pub fn into_inner(self) -> f64 {
        self.load()
    }

    /// The compare-and-swap loop behind every mutating operation.
    ///
    /// `next` computes the value to install from the current one, or `None`
    /// to leave the register unchanged. Either way, a compare-and-swap against
    /// the observed bit pattern decides the point at which the operation takes
    /// effect, and the loop starts over if it fails.
    ///
    /// Returns `Ok((previous, installed))` when a new value was installed and
    /// `Err(current)` when the register was left as is.
    fn transition<F>(&self, mut next: F) -> Result<(f64, f64), f64>
    where
        F: FnMut(f64) -> Option<f64>,
    {
        let mut observed = self.bits.load(self.read_ordering());
        loop {
            let current = f64::from_bits(observed);
            let candidate = next(current);
            let candidate_bits = candidate.map_or(observed, f64::to_bits);
            match self.bits.compare_exchange(
                observed,
                candidate_bits,
                self.ordering,
                self.read_ordering(),
            ) {
                Ok(_) => {
                    return match candidate {
                        Some(installed) => Ok((current, installed)),
                        None => Err(current),
                    }
                }
                Err(actual) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        expected = observed,
                        actual,
                        "compare-and-swap observed a stale value, retrying"
                    );
                    observed = actual;
                }
            }
        }
    }
}

impl FloatRegister for AtomicFloat {
    /// Creates a new register containing `value`, using sequentially
    /// consistent memory ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(0.25);
    /// assert_eq!(register.load(), 0.25);
    /// ```
    fn new(value: f64) -> Self {
        AtomicFloat::new_with_order(value, Ordering::SeqCst)
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(self.read_ordering()))
    }

    /// Sets the contents of the register to `value`, returning the value
    /// that it replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(3.0);
    /// assert_eq!(register.store(7.0), 3.0);
    /// assert_eq!(register.load(), 7.0);
    /// ```
    fn store(&self, value: f64) -> f64 {
        self.update(|_| value)
    }

    /// Adds `delta` to the contents of the register, returning the sum
    /// installed by this call.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(1.0);
    /// assert_eq!(register.add(2.0), 3.0);
    /// assert_eq!(register.add(-4.0), -1.0);
    /// ```
    fn add(&self, delta: f64) -> f64 {
        match self.transition(|current| Some(current + delta)) {
            Ok((_, sum)) | Err(sum) => sum,
        }
    }

    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(5.0);
    /// assert!(register.greater_than_swap(2.0));
    /// assert!(!register.greater_than_swap(2.0));
    /// assert_eq!(register.load(), 2.0);
    /// ```
    fn greater_than_swap(&self, value: f64) -> bool {
        self.transition(|current| (current > value).then_some(value))
            .is_ok()
    }

    /// # Examples
    ///
    /// ```
    /// use atomicfloat::{AtomicFloat, FloatRegister};
    ///
    /// let register = AtomicFloat::new(5.0);
    /// assert!(register.less_than_swap(8.0));
    /// assert!(!register.less_than_swap(6.0));
    /// assert_eq!(register.load(), 8.0);
    /// ```
    fn less_than_swap(&self, value: f64) -> bool {
        self.transition(|current| (current < value).then_some(value))
            .is_ok()
    }
}

impl Default for AtomicFloat {
    fn default() -> Self {
        AtomicFloat::new(0.0)
    }
}

impl From<f64> for AtomicFloat {
    fn from(value: f64) -> Self {
        AtomicFloat::new(value)
    }
}

impl fmt::Debug for AtomicFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicFloat")
            .field("value", &self.load())
            .field("ordering", &self.ordering)
            .finish()
    }
}
