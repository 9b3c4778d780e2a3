use std::sync::Arc;

use shuttle::thread;

use atomicfloat::{AtomicFloat, FloatRegister, MutexFloat};

use super::common::{
    assert_random_operations_are_linearizable, NUM_ITERATIONS, NUM_PREEMPTIONS, NUM_THREADS,
};

#[test]
fn atomic_register_is_linearizable() {
    shuttle::check_pct(
        assert_random_operations_are_linearizable::<AtomicFloat>,
        NUM_ITERATIONS,
        NUM_PREEMPTIONS,
    );
}

#[test]
fn mutex_register_is_linearizable() {
    shuttle::check_pct(
        assert_random_operations_are_linearizable::<MutexFloat>,
        NUM_ITERATIONS,
        NUM_PREEMPTIONS,
    );
}

#[test]
fn concurrent_additions_are_not_lost() {
    shuttle::check_random(
        || {
            let register = Arc::new(AtomicFloat::new(0.0));
            let handles: Vec<_> = (0..NUM_THREADS)
                .map(|_| {
                    let register = register.clone();
                    thread::spawn(move || {
                        for delta in [1.0, 2.0, -1.0] {
                            register.add(delta);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(register.load(), 2.0 * NUM_THREADS as f64);
        },
        NUM_ITERATIONS,
    );
}

#[test]
fn running_minimum_and_maximum_agree() {
    shuttle::check_pct(
        || {
            let min = Arc::new(AtomicFloat::new(f64::INFINITY));
            let max = Arc::new(AtomicFloat::new(f64::NEG_INFINITY));
            let handles: Vec<_> = (0..NUM_THREADS)
                .map(|i| {
                    let (min, max) = (min.clone(), max.clone());
                    thread::spawn(move || {
                        for j in 0..4 {
                            let value = (j * NUM_THREADS + i) as f64;
                            min.greater_than_swap(value);
                            max.less_than_swap(value);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
            assert_eq!(min.load(), 0.0);
            assert_eq!(max.load(), (4 * NUM_THREADS - 1) as f64);
        },
        NUM_ITERATIONS,
        NUM_PREEMPTIONS,
    );
}
