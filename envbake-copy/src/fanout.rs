//! Fan-out/join primitive.
//!
//! Every item gets its own scoped thread. All threads are spawned before the
//! first join, and [`fan_out`] returns only after every thread has been
//! joined. A panic stays inside its own slot as `Err(payload)`.

use std::thread;

/// Run `work` on every item in parallel and collect the results in input order.
pub fn fan_out<I, T, R, F>(items: I, work: F) -> Vec<thread::Result<R>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let work = &work;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .into_iter()
            .map(|item| scope.spawn(move || work(item)))
            .collect();
        tracing::debug!(units = handles.len(), "dispatched fan-out units");
        handles.into_iter().map(|handle| handle.join()).collect()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn empty_input_returns_empty_output() {
        let results = fan_out(Vec::<u32>::new(), |n| n * 2);
        assert!(results.is_empty());
    }

    #[test]
    fn results_are_index_aligned() {
        // Later items finish first.
        let results = fan_out(vec![40u64, 30, 20, 10, 0], |delay| {
            thread::sleep(Duration::from_millis(delay));
            delay
        });
        let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, [40, 30, 20, 10, 0]);
    }

    #[test]
    fn every_unit_runs_before_return() {
        let finished = AtomicUsize::new(0);
        let results = fan_out(0..8, |_| {
            thread::sleep(Duration::from_millis(10));
            finished.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(results.len(), 8);
        assert_eq!(finished.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn units_run_concurrently() {
        // Deadlocks unless all five units are alive at the same time.
        let barrier = Barrier::new(5);
        let results = fan_out(0..5, |i| {
            barrier.wait();
            i
        });
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn wall_clock_is_close_to_a_single_unit() {
        let unit = Duration::from_millis(200);
        let started = Instant::now();
        fan_out(0..5, |_| thread::sleep(unit));
        let elapsed = started.elapsed();
        assert!(
            elapsed < unit * 3,
            "five units took {elapsed:?}, expected close to {unit:?}"
        );
    }

    #[test]
    fn panic_is_isolated_to_its_slot() {
        let results = fan_out(0..3, |i| {
            if i == 1 {
                panic!("unit {i} failed");
            }
            i
        });
        assert_eq!(*results[0].as_ref().unwrap(), 0);
        assert!(results[1].is_err());
        assert_eq!(*results[2].as_ref().unwrap(), 2);
    }
}
