use std::fmt;
use std::sync::PoisonError;

use crate::sync::{Mutex, MutexGuard};

use super::FloatRegister;

/// A shared-memory register containing an `f64`, backed by a [`Mutex`].
///
/// Every operation holds the lock for its whole duration, so this register is
/// **not** lock-free. It has exactly the same semantics as
/// [`AtomicFloat`](super::AtomicFloat), which makes it a useful reference when
/// testing, and a baseline when benchmarking.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use atomicfloat::{FloatRegister, MutexFloat};
///
/// let register = Arc::new(MutexFloat::new(0.0));
///
/// let register_clone = register.clone();
/// let thread = thread::spawn(move || {
///     register_clone.add(1.5);
/// });
/// register.add(1.5);
///
/// thread.join().unwrap();
/// assert_eq!(register.load(), 3.0);
/// ```
pub struct MutexFloat {
    mutex: Mutex<f64>,
}

impl MutexFloat {
    // A panic while the lock is held can not leave an `f64` half-written,
    // so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, f64> {
        self.mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consumes the register, returning the value it contains.
    pub fn into_inner(self) -> f64 {
        *self.lock()
    }
}

impl FloatRegister for MutexFloat {
    fn new(value: f64) -> Self {
        Self {
            mutex: Mutex::new(value),
        }
    }

    fn load(&self) -> f64 {
        *self.lock()
    }

    fn store(&self, value: f64) -> f64 {
        std::mem::replace(&mut *self.lock(), value)
    }

    fn add(&self, delta: f64) -> f64 {
        let mut guard = self.lock();
        *guard += delta;
        *guard
    }

    fn greater_than_swap(&self, value: f64) -> bool {
        let mut guard = self.lock();
        let swapped = *guard > value;
        if swapped {
            *guard = value;
        }
        swapped
    }

    fn less_than_swap(&self, value: f64) -> bool {
        let mut guard = self.lock();
        let swapped = *guard < value;
        if swapped {
            *guard = value;
        }
        swapped
    }
}

impl Default for MutexFloat {
    fn default() -> Self {
        MutexFloat::new(0.0)
    }
}

impl From<f64> for MutexFloat {
    fn from(value: f64) -> Self {
        MutexFloat::new(value)
    }
}

impl fmt::Debug for MutexFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexFloat")
            .field("value", &self.load())
            .finish()
    }
}
