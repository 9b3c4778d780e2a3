//! A lock-free, shared 64-bit floating-point register.
//!
//! Hardware compare-and-swap only operates on integers, so [`AtomicFloat`]
//! stores the bit pattern of an `f64` in an `AtomicU64` and implements every
//! update as an optimistic compare-and-swap loop over that pattern. Arithmetic
//! and comparisons always happen on the decoded `f64`.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use atomicfloat::{AtomicFloat, FloatRegister};
//!
//! let total = Arc::new(AtomicFloat::new(0.0));
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let total = total.clone();
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 total.add(0.5);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(total.load(), 200.0);
//! ```
pub mod error;
pub mod register;
pub(crate) mod sync;

pub use error::OrderingError;
pub use register::{AtomicFloat, FloatRegister, MutexFloat};
