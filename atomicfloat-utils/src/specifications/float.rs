//! A sequential specification of a shared floating-point register.
use crate::specifications::Specification;

use FloatOperation::*;

/// The bit pattern of an `f64`.
///
/// States are compared bit-for-bit, so that `NaN` is equal to itself and
/// `0.0` is distinct from `-0.0`.
pub type FloatBits = u64;

/// An operation for a floating-point register.
///
/// The last field of each variant is the value returned by the operation. If
/// it is not-yet-known, for example because the operation has only just been
/// called, then it can be represented as `None`.
#[derive(Debug, Copy, Clone)]
pub enum FloatOperation {
    /// Load the value contained in the register.
    Load(Option<f64>),
    /// Store a value, returning the value it replaced.
    Store(f64, Option<f64>),
    /// Add a value, returning the sum.
    Add(f64, Option<f64>),
    /// Install a value if it is less than the contents of the register,
    /// returning whether it was installed.
    GreaterThanSwap(f64, Option<bool>),
    /// Install a value if it is greater than the contents of the register,
    /// returning whether it was installed.
    LessThanSwap(f64, Option<bool>),
}

/// A specification of a register containing an `f64`, initially `0.0`.
pub struct FloatRegisterSpecification;

impl FloatRegisterSpecification {
    fn conditional_swap(installed: bool, value: f64, state: FloatBits) -> FloatBits {
        if installed {
            value.to_bits()
        } else {
            state
        }
    }
}

impl Specification for FloatRegisterSpecification {
    type State = FloatBits;
    type Operation = FloatOperation;

    fn init() -> Self::State {
        0.0_f64.to_bits()
    }

    /// # Panics
    ///
    /// Panics if the return value of the operation is unknown.
    fn apply(operation: &Self::Operation, state: &Self::State) -> (bool, Self::State) {
        let current = f64::from_bits(*state);
        match operation {
            Load(result) => match result {
                Some(value) => (value.to_bits() == *state, *state),
                None => panic!("Cannot apply Load with an unknown return value."),
            },
            Store(value, result) => match result {
                Some(previous) => {
                    let valid = previous.to_bits() == *state;
                    (valid, if valid { value.to_bits() } else { *state })
                }
                None => panic!("Cannot apply Store with an unknown return value."),
            },
            Add(delta, result) => match result {
                Some(sum) => {
                    let expected = (current + delta).to_bits();
                    let valid = sum.to_bits() == expected;
                    (valid, if valid { expected } else { *state })
                }
                None => panic!("Cannot apply Add with an unknown return value."),
            },
            GreaterThanSwap(value, result) => match result {
                Some(swapped) => {
                    let installed = current > *value;
                    let valid = installed == *swapped;
                    let state = if valid {
                        Self::conditional_swap(installed, *value, *state)
                    } else {
                        *state
                    };
                    (valid, state)
                }
                None => panic!("Cannot apply GreaterThanSwap with an unknown return value."),
            },
            LessThanSwap(value, result) => match result {
                Some(swapped) => {
                    let installed = current < *value;
                    let valid = installed == *swapped;
                    let state = if valid {
                        Self::conditional_swap(installed, *value, *state)
                    } else {
                        *state
                    };
                    (valid, state)
                }
                None => panic!("Cannot apply LessThanSwap with an unknown return value."),
            },
        }
    }
}
