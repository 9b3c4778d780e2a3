use std::sync::Arc;
use std::thread;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use atomicfloat::{AtomicFloat, FloatRegister, MutexFloat};

const DELTAS: [f64; 3] = [1.0, 2.0, -1.0];

/// Has `parallelism` threads each add every value in `DELTAS`, `n` times,
/// and asserts that no addition was lost.
fn assert_additions_are_not_lost<R>(parallelism: usize, n: usize)
where
    R: FloatRegister + Send + Sync + 'static,
{
    let register = Arc::new(R::new(0.0));

    let handles: Vec<_> = (0..parallelism)
        .map(|_| {
            let register = register.clone();
            thread::spawn(move || {
                for _ in 0..n {
                    for delta in DELTAS {
                        register.add(delta);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (parallelism * n) as f64 * DELTAS.iter().sum::<f64>();
    assert_eq!(register.load(), expected);
}

/// Distributes a shuffled range of distinct values between `parallelism`
/// threads, which feed them to a running minimum and a running maximum.
fn assert_minimum_and_maximum_are_found<R>(parallelism: usize, n: usize)
where
    R: FloatRegister + Send + Sync + 'static,
{
    let mut rng = thread_rng();
    let total = parallelism * n;
    let min = rng.gen_range(0..1_000_000) as f64;
    let max = min + (total - 1) as f64;

    let running_min = Arc::new(R::new(max + 1.0));
    let running_max = Arc::new(R::new(min - 1.0));

    let mut values: Vec<f64> = (0..total).map(|i| min + i as f64).collect();
    values.shuffle(&mut rng);

    let handles: Vec<_> = values
        .chunks(n)
        .map(|chunk| {
            let chunk = chunk.to_vec();
            let running_min = running_min.clone();
            let running_max = running_max.clone();
            thread::spawn(move || {
                for value in chunk {
                    running_min.greater_than_swap(value);
                    running_max.less_than_swap(value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(running_min.load(), min);
    assert_eq!(running_max.load(), max);
}

/// Has every thread attempt to install the same minimum, and asserts that
/// exactly one of them succeeded.
fn assert_single_winner<R>(parallelism: usize)
where
    R: FloatRegister + Send + Sync + 'static,
{
    let register = Arc::new(R::new(1.0));
    let handles: Vec<_> = (0..parallelism)
        .map(|_| {
            let register = register.clone();
            thread::spawn(move || register.greater_than_swap(0.0))
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&swapped| swapped)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(register.load(), 0.0);
}

/// Has every thread store its own value once, and asserts that the values
/// returned by the stores chain together, with none lost or duplicated.
fn assert_stores_form_a_chain<R>(parallelism: usize)
where
    R: FloatRegister + Send + Sync + 'static,
{
    let register = Arc::new(R::new(-1.0));
    let handles: Vec<_> = (0..parallelism)
        .map(|i| {
            let register = register.clone();
            thread::spawn(move || register.store(i as f64))
        })
        .collect();

    let mut replaced: Vec<f64> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    replaced.push(register.load());
    replaced.sort_by(f64::total_cmp);

    let mut expected: Vec<f64> = (0..parallelism).map(|i| i as f64).collect();
    expected.push(-1.0);
    expected.sort_by(f64::total_cmp);
    assert_eq!(replaced, expected);
}

mod atomic {
    use super::*;

    #[test]
    fn single_thread_adds() {
        assert_additions_are_not_lost::<AtomicFloat>(1, 100_000);
    }

    #[test]
    fn eight_threads_add() {
        assert_additions_are_not_lost::<AtomicFloat>(8, 100_000);
    }

    #[test]
    fn hundred_threads_add() {
        assert_additions_are_not_lost::<AtomicFloat>(100, 10_000);
    }

    #[test]
    fn single_thread_finds_minimum_and_maximum() {
        assert_minimum_and_maximum_are_found::<AtomicFloat>(1, 1_000);
    }

    #[test]
    fn eight_threads_find_minimum_and_maximum() {
        assert_minimum_and_maximum_are_found::<AtomicFloat>(8, 10_000);
    }

    #[test]
    fn hundred_threads_find_minimum_and_maximum() {
        assert_minimum_and_maximum_are_found::<AtomicFloat>(100, 1_000);
    }

    #[test]
    fn only_one_swap_to_same_minimum_succeeds() {
        assert_single_winner::<AtomicFloat>(16);
    }

    #[test]
    fn concurrent_stores_return_distinct_values() {
        assert_stores_form_a_chain::<AtomicFloat>(16);
    }
}

mod mutex {
    use super::*;

    #[test]
    fn eight_threads_add() {
        assert_additions_are_not_lost::<MutexFloat>(8, 10_000);
    }

    #[test]
    fn eight_threads_find_minimum_and_maximum() {
        assert_minimum_and_maximum_are_found::<MutexFloat>(8, 1_000);
    }

    #[test]
    fn only_one_swap_to_same_minimum_succeeds() {
        assert_single_winner::<MutexFloat>(16);
    }

    #[test]
    fn concurrent_stores_return_distinct_values() {
        assert_stores_form_a_chain::<MutexFloat>(16);
    }
}
