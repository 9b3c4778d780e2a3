//! Shared floating-point registers.
//!
//! See [`AtomicFloat`].
mod atomic;
pub use self::atomic::AtomicFloat;
mod mutex;
pub use self::mutex::MutexFloat;

/// A shared-memory register containing an `f64`.
///
/// Every operation takes `&self`, so a register can be shared between
/// threads (for example behind an [`Arc`](std::sync::Arc)) and updated by
/// all of them concurrently.
pub trait FloatRegister {
    /// Creates a new register containing `value`.
    fn new(value: f64) -> Self;

    /// Returns the value currently contained in the register.
    fn load(&self) -> f64;

    /// Sets the contents of the register to `value`, returning the value
    /// that it replaced.
    fn store(&self, value: f64) -> f64;

    /// Adds `delta` to the contents of the register, returning the result.
    fn add(&self, delta: f64) -> f64;

    /// Replaces the contents of the register with `value` if the current
    /// contents are strictly greater, keeping a running minimum.
    ///
    /// Returns whether `value` was installed.
    fn greater_than_swap(&self, value: f64) -> bool;

    /// Replaces the contents of the register with `value` if the current
    /// contents are strictly less, keeping a running maximum.
    ///
    /// Returns whether `value` was installed.
    fn less_than_swap(&self, value: f64) -> bool;
}
