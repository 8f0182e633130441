//! Multi-threaded contention harness for the container primitives.
//!
//! N producers each push M distinct items into one shared container; the
//! final length must be exactly N*M and a full drain must return every item
//! exactly once.
//!
//! Run: `cargo test --test contention_e2e -- --nocapture`

#[macro_use]
mod common;

use common::{Tagged, init_test_logging};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use xtypes::{PriorityQueue, Queue, QueueError, Semaphore};

const PRODUCERS: usize = 8;
const ITEMS_PER_PRODUCER: usize = 500;

fn init_test(name: &str) {
    init_test_logging();
    test_phase!(name);
}

fn expected_items() -> HashSet<Tagged> {
    (0..PRODUCERS)
        .flat_map(|producer| (0..ITEMS_PER_PRODUCER).map(move |seq| Tagged { producer, seq }))
        .collect()
}

fn assert_exactly_once(drained: &[Tagged]) {
    let unique: HashSet<Tagged> = drained.iter().copied().collect();
    assert_with_log!(
        unique.len() == drained.len(),
        "no duplicates",
        drained.len(),
        unique.len()
    );
    assert_with_log!(
        unique == expected_items(),
        "no lost items",
        PRODUCERS * ITEMS_PER_PRODUCER,
        unique.len()
    );
}

#[test]
fn concurrent_priority_queue_pushes() {
    init_test("concurrent_priority_queue_pushes");
    let pq = Arc::new(PriorityQueue::new(16));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let pq = Arc::clone(&pq);
            thread::spawn(move || {
                for seq in 0..ITEMS_PER_PRODUCER {
                    let priority = i64::try_from((seq * 31 + producer * 17) % 257).unwrap();
                    pq.push(Tagged { producer, seq }, priority).expect("push");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer thread");
    }

    let total = PRODUCERS * ITEMS_PER_PRODUCER;
    assert_with_log!(pq.len() == total, "final length", total, pq.len());

    let mut last = i64::MIN;
    let mut drained = Vec::with_capacity(total);
    while let Some(priority) = pq.peek_priority() {
        assert!(priority >= last, "priorities must not decrease");
        last = priority;
        drained.push(pq.pop().expect("pop"));
    }
    assert_exactly_once(&drained);
    test_complete!("concurrent_priority_queue_pushes");
}

#[test]
fn concurrent_queue_pushes_preserve_per_producer_order() {
    init_test("concurrent_queue_pushes_preserve_per_producer_order");
    let q = Arc::new(Queue::new(16));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let q = Arc::clone(&q);
            thread::spawn(move || {
                for seq in 0..ITEMS_PER_PRODUCER {
                    q.push(Tagged { producer, seq }).expect("push");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("producer thread");
    }

    let total = PRODUCERS * ITEMS_PER_PRODUCER;
    assert_with_log!(q.len() == total, "final length", total, q.len());

    let drained = q.drain().expect("drain");
    let mut next_seq = vec![0usize; PRODUCERS];
    for item in &drained {
        assert_eq!(item.seq, next_seq[item.producer], "FIFO within a producer");
        next_seq[item.producer] += 1;
    }
    assert_exactly_once(&drained);
    test_complete!("concurrent_queue_pushes_preserve_per_producer_order");
}

#[test]
fn concurrent_producers_and_consumers() {
    init_test("concurrent_producers_and_consumers");
    let q = Arc::new(Queue::new(0));
    let produced_done = Arc::new(AtomicUsize::new(0));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let q = Arc::clone(&q);
            let done = Arc::clone(&produced_done);
            thread::spawn(move || {
                for chunk in (0..ITEMS_PER_PRODUCER).collect::<Vec<_>>().chunks(50) {
                    q.put(chunk.iter().map(|&seq| Tagged { producer, seq }))
                        .expect("put");
                }
                done.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let q = Arc::clone(&q);
            let done = Arc::clone(&produced_done);
            thread::spawn(move || {
                let mut taken = Vec::new();
                loop {
                    match q.get(32) {
                        Ok(batch) if !batch.is_empty() => taken.extend(batch),
                        Ok(_) if done.load(Ordering::SeqCst) == PRODUCERS => match q.pop() {
                            Ok(item) => taken.push(item),
                            Err(QueueError::Empty) => break,
                            Err(err) => panic!("unexpected error: {err}"),
                        },
                        Ok(_) => thread::yield_now(),
                        Err(err) => panic!("unexpected error: {err}"),
                    }
                }
                taken
            })
        })
        .collect();

    for handle in producers {
        handle.join().expect("producer thread");
    }
    let drained: Vec<Tagged> = consumers
        .into_iter()
        .flat_map(|handle| handle.join().expect("consumer thread"))
        .collect();

    assert!(q.is_empty());
    assert_exactly_once(&drained);
    test_complete!("concurrent_producers_and_consumers");
}

#[test]
fn semaphore_bounds_concurrent_workers() {
    init_test("semaphore_bounds_concurrent_workers");
    let capacity = 3;
    let sem = Arc::new(Semaphore::new(capacity));
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let sem = Arc::clone(&sem);
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            thread::spawn(move || {
                for _ in 0..50 {
                    let _permit = sem.permit(1);
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    thread::yield_now();
                    active.fetch_sub(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread");
    }

    let peak = peak.load(Ordering::SeqCst);
    assert_with_log!(peak <= capacity, "peak concurrency", capacity, peak);
    assert_eq!(sem.occupancy(), 0, "every permit returned");
    test_complete!("semaphore_bounds_concurrent_workers");
}
