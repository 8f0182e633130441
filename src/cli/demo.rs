//! Demo workload: order tasks by priority, then process them in parallel.
//!
//! The tasks first go through a [`PriorityQueue`] and are handled one at a
//! time, lowest priority value first. The same tasks then go through a
//! [`Queue`] and are handed to worker threads, at most `workers` at once,
//! bounded by a [`Semaphore`].

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::error::{CliError, errors};
use crate::error::QueueError;
use crate::sync::{PriorityQueue, Queue, Semaphore};

/// Default seed for task priorities.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Upper bound (exclusive) of the random offset added to each task priority.
const PRIORITY_SPREAD: u64 = 99;

/// Validated settings for a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Number of tasks to generate.
    pub size: usize,
    /// Maximum number of tasks processed concurrently.
    pub workers: usize,
    /// Seed for the priority generator.
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: 10,
            workers: thread::available_parallelism().map_or(1, usize::from),
            seed: DEFAULT_SEED,
        }
    }
}

impl DemoConfig {
    /// Rejects settings the demo cannot run with.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.workers == 0 {
            return Err(errors::invalid_argument("--workers", "must be at least 1")
                .suggestion("Omit --workers to use the available parallelism"));
        }
        if i64::try_from(self.size).is_err() {
            return Err(errors::invalid_argument(
                "--size",
                "too large to assign task priorities",
            )
            .context("size", self.size));
        }
        Ok(())
    }
}

/// A unit of demo work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Position in generation order.
    pub id: usize,
    /// Ordering key; lower runs first.
    pub priority: i64,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task with priority: {}", self.priority)
    }
}

/// Outcome of a demo run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    /// Priorities in the order the sequential phase handled them.
    pub in_order: Vec<i64>,
    /// Number of tasks handled by the parallel phase.
    pub parallel: usize,
}

/// xorshift64 generator for task priorities.
#[derive(Debug, Clone)]
struct PriorityGen(u64);

impl PriorityGen {
    const fn new(seed: u64) -> Self {
        Self(if seed == 0 { 1 } else { seed })
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x % bound
    }
}

/// Generates `config.size` tasks; task `i` gets priority `i + r` with `r`
/// drawn from `[0, 98]`.
#[must_use]
pub fn generate_tasks(config: &DemoConfig) -> Vec<Task> {
    let mut rng = PriorityGen::new(config.seed);
    (0..config.size)
        .map(|id| {
            let offset = i64::try_from(rng.next_below(PRIORITY_SPREAD)).unwrap_or(0);
            let base = i64::try_from(id).unwrap_or(i64::MAX);
            Task {
                id,
                priority: base.saturating_add(offset),
            }
        })
        .collect()
}

/// Pops every task off `queue` in priority order and handles it.
pub fn run_in_order(queue: &PriorityQueue<Task>) -> Result<Vec<i64>, CliError> {
    let mut handled = Vec::with_capacity(queue.len());
    while !queue.is_empty() {
        match queue.pop() {
            Ok(task) => {
                tracing::info!(id = task.id, "working in order: {task}");
                handled.push(task.priority);
            }
            Err(QueueError::Empty) => {
                tracing::info!("empty queue");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(handled)
}

/// Takes every task off `queue` and handles each on its own thread, with at
/// most `workers` running at once.
pub fn run_in_parallel(queue: &Queue<Task>, workers: usize) -> Result<usize, CliError> {
    let tasks = queue.drain()?;
    let semaphore = Semaphore::new(workers);
    let handled = AtomicUsize::new(0);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(tasks.len());
        for task in tasks {
            let permit = semaphore.permit(1);
            let handled = &handled;
            handles.push(scope.spawn(move || {
                let _permit = permit;
                tracing::info!(id = task.id, "working in parallel: {task}");
                handled.fetch_add(1, Ordering::Relaxed);
            }));
        }
        join_workers(handles)
    })?;

    Ok(handled.into_inner())
}

/// Joins every worker, then reports whether any of them panicked.
///
/// All handles are joined before returning so the enclosing scope never
/// re-raises a panic that was not observed here.
fn join_workers(handles: Vec<thread::ScopedJoinHandle<'_, ()>>) -> Result<(), CliError> {
    let panicked = handles
        .into_iter()
        .map(thread::ScopedJoinHandle::join)
        .filter(Result::is_err)
        .count();
    if panicked == 0 {
        Ok(())
    } else {
        Err(errors::internal("worker thread panicked").context("panicked_workers", panicked))
    }
}

/// Runs both phases of the demo.
pub fn run(config: &DemoConfig) -> Result<DemoReport, CliError> {
    config.validate()?;
    if config.size == 0 {
        tracing::info!(size = config.size, "no tasks requested, exiting");
        return Ok(DemoReport::default());
    }

    let tasks = generate_tasks(config);

    let pqueue = PriorityQueue::new(tasks.len());
    pqueue.put(tasks.iter().map(|task| (task.clone(), task.priority)))?;
    tracing::info!("doing work in order by priority...");
    let in_order = run_in_order(&pqueue)?;

    let queue = Queue::new(tasks.len());
    queue.put(tasks)?;
    tracing::info!(workers = config.workers, "doing work in parallel...");
    let parallel = run_in_parallel(&queue, config.workers)?;

    Ok(DemoReport { in_order, parallel })
}
