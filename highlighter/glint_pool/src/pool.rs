//! The worker pool: blocking dequeue loop, in-flight accounting, panic
//! isolation.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::utils::Backoff;

use crate::job::JobError;

/// Per-thread job processor.
///
/// Each worker instance is owned by exactly one thread; build one per worker
/// from the factory passed to [`DispatchPool::spawn`] and clone whatever
/// shared immutable state (pattern index, options) it needs.
pub trait Worker: Send {
    type Job: Send + fmt::Debug + 'static;

    /// Process one job. Errors are logged with the job identity and
    /// counted; they never affect other jobs.
    fn run(&mut self, job: Self::Job) -> Result<(), JobError>;
}

/// Counters shared between the pool handle and its worker threads.
struct Shared {
    /// Cleared by `shutdown`; workers re-check between jobs.
    running: AtomicBool,
    /// Jobs submitted but not yet fully processed. Spans submit to
    /// completion (not dequeue to completion) so there is no window where
    /// a claimed-but-unstarted job escapes the idle check.
    in_flight: AtomicUsize,
    failures: AtomicUsize,
}

/// Fixed-size worker pool over a shared blocking job queue.
pub struct DispatchPool<J: Send + fmt::Debug + 'static> {
    /// Closed (dropped) on shutdown to unblock waiting workers.
    tx: Option<Sender<J>>,
    rx: Receiver<J>,
    handles: Vec<JoinHandle<()>>,
    shared: Arc<Shared>,
}

impl<J: Send + fmt::Debug + 'static> DispatchPool<J> {
    /// Start `threads` workers, each owning the state its factory call
    /// produced.
    pub fn spawn<W, F>(threads: usize, mut make_worker: F) -> Self
    where
        W: Worker<Job = J> + 'static,
        F: FnMut(usize) -> W,
    {
        let (tx, rx) = channel::unbounded();
        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            in_flight: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        });
        let mut handles = Vec::with_capacity(threads);
        for id in 0..threads {
            let rx = rx.clone();
            let shared = Arc::clone(&shared);
            let worker = make_worker(id);
            let spawned = std::thread::Builder::new()
                .name(format!("glint-worker-{id}"))
                .spawn(move || worker_loop(id, &rx, &shared, worker));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    tracing::warn!(worker = id, %err, "failed to spawn worker thread");
                }
            }
        }
        Self {
            tx: Some(tx),
            rx,
            handles,
            shared,
        }
    }

    /// Enqueue a job. Jobs submitted after `shutdown` are dropped.
    pub fn submit(&self, job: J) {
        let Some(tx) = &self.tx else {
            tracing::warn!(?job, "job submitted after shutdown; dropping");
            return;
        };
        self.shared.in_flight.fetch_add(1, Ordering::AcqRel);
        if tx.send(job).is_err() {
            // Unreachable while we hold `rx`, but keep the counter honest.
            self.shared.in_flight.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// `true` when the queue is empty and no worker is mid-job.
    pub fn is_idle(&self) -> bool {
        self.rx.is_empty() && self.shared.in_flight.load(Ordering::Acquire) == 0
    }

    /// Jobs waiting in the queue (excludes jobs already claimed).
    pub fn queued(&self) -> usize {
        self.rx.len()
    }

    /// Jobs that failed or panicked so far.
    pub fn failures(&self) -> usize {
        self.shared.failures.load(Ordering::Acquire)
    }

    /// Number of worker threads actually running.
    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Drain the queue from the calling thread as an ad hoc extra worker,
    /// then wait until every claimed job has completed.
    ///
    /// Call after all jobs are submitted; keeps the coordinating thread
    /// busy instead of idle-polling the pool.
    pub fn run_until_idle<W: Worker<Job = J>>(&self, worker: &mut W) {
        while let Ok(job) = self.rx.try_recv() {
            process("coordinator", &self.shared, worker, job);
        }
        let backoff = Backoff::new();
        while self.shared.in_flight.load(Ordering::Acquire) != 0 {
            backoff.snooze();
        }
    }

    /// Stop all workers after their current job and join them.
    ///
    /// Blocked dequeues are interrupted by closing the queue; jobs still
    /// queued are abandoned.
    pub fn shutdown(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        self.tx = None;
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::error!("worker thread panicked outside a job");
            }
        }
    }
}

impl<J: Send + fmt::Debug + 'static> Drop for DispatchPool<J> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop<W: Worker>(id: usize, rx: &Receiver<W::Job>, shared: &Shared, mut worker: W) {
    let label = format!("worker-{id}");
    while shared.running.load(Ordering::Acquire) {
        // Blocks until a job arrives or the channel closes at shutdown.
        let Ok(job) = rx.recv() else { break };
        process(&label, shared, &mut worker, job);
    }
    tracing::debug!(worker = id, "worker exiting");
}

/// Run one job with the worker-boundary isolation policy: failures and
/// panics are logged with the job identity, counted, and skipped.
fn process<W: Worker>(who: &str, shared: &Shared, worker: &mut W, job: W::Job) {
    let identity = format!("{job:?}");
    let outcome = catch_unwind(AssertUnwindSafe(|| worker.run(job)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            shared.failures.fetch_add(1, Ordering::AcqRel);
            tracing::error!(worker = who, job = %identity, %err, "job failed; skipping");
        }
        Err(_) => {
            shared.failures.fetch_add(1, Ordering::AcqRel);
            tracing::error!(worker = who, job = %identity, "job panicked; skipping");
        }
    }
    shared.in_flight.fetch_sub(1, Ordering::AcqRel);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    struct Counting {
        processed: Arc<AtomicUsize>,
    }

    impl Worker for Counting {
        type Job = usize;

        fn run(&mut self, _job: usize) -> Result<(), JobError> {
            self.processed.fetch_add(1, Ordering::AcqRel);
            Ok(())
        }
    }

    struct Flaky {
        processed: Arc<AtomicUsize>,
    }

    impl Worker for Flaky {
        type Job = usize;

        fn run(&mut self, job: usize) -> Result<(), JobError> {
            match job % 3 {
                0 => {
                    self.processed.fetch_add(1, Ordering::AcqRel);
                    Ok(())
                }
                1 => Err(JobError::io(
                    format!("job-{job}"),
                    io::Error::new(io::ErrorKind::NotFound, "gone"),
                )),
                _ => panic!("job {job} exploded"),
            }
        }
    }

    #[test]
    fn all_submitted_jobs_are_processed() {
        let processed = Arc::new(AtomicUsize::new(0));
        let mut pool = DispatchPool::spawn(4, |_| Counting {
            processed: Arc::clone(&processed),
        });
        for job in 0..100 {
            pool.submit(job);
        }
        let mut helper = Counting {
            processed: Arc::clone(&processed),
        };
        pool.run_until_idle(&mut helper);
        assert!(pool.is_idle());
        assert_eq!(processed.load(Ordering::Acquire), 100);
        assert_eq!(pool.failures(), 0);
        pool.shutdown();
    }

    #[test]
    fn coordinator_alone_drains_the_queue() {
        // Zero workers: everything is processed by the work-stealing
        // fallback on the submitting thread.
        let processed = Arc::new(AtomicUsize::new(0));
        let pool = DispatchPool::spawn(0, |_| Counting {
            processed: Arc::clone(&processed),
        });
        for job in 0..10 {
            pool.submit(job);
        }
        let mut helper = Counting {
            processed: Arc::clone(&processed),
        };
        pool.run_until_idle(&mut helper);
        assert_eq!(processed.load(Ordering::Acquire), 10);
    }

    #[test]
    fn failures_and_panics_are_isolated_and_counted() {
        let processed = Arc::new(AtomicUsize::new(0));
        let mut pool = DispatchPool::spawn(2, |_| Flaky {
            processed: Arc::clone(&processed),
        });
        for job in 0..30 {
            pool.submit(job);
        }
        let mut helper = Flaky {
            processed: Arc::clone(&processed),
        };
        pool.run_until_idle(&mut helper);
        // 0,3,6,... succeed; 1,4,... error; 2,5,... panic.
        assert_eq!(processed.load(Ordering::Acquire), 10);
        assert_eq!(pool.failures(), 20);
        pool.shutdown();
        assert!(pool.is_idle());
    }

    #[test]
    fn shutdown_unblocks_idle_workers() {
        let processed = Arc::new(AtomicUsize::new(0));
        let mut pool = DispatchPool::spawn(4, |_| Counting {
            processed: Arc::clone(&processed),
        });
        // No jobs at all: workers are blocked on the queue. Shutdown must
        // interrupt the blocking dequeue and join cleanly.
        pool.shutdown();
        assert_eq!(pool.workers(), 0);
        assert!(pool.is_idle());
    }

    #[test]
    fn submit_after_shutdown_is_dropped() {
        let processed = Arc::new(AtomicUsize::new(0));
        let mut pool = DispatchPool::spawn(1, |_| Counting {
            processed: Arc::clone(&processed),
        });
        pool.shutdown();
        pool.submit(1);
        assert!(pool.is_idle());
        assert_eq!(processed.load(Ordering::Acquire), 0);
    }

    #[test]
    fn is_idle_sees_queued_jobs() {
        let processed = Arc::new(AtomicUsize::new(0));
        let pool: DispatchPool<usize> = DispatchPool::spawn(0, |_| Counting {
            processed: Arc::clone(&processed),
        });
        pool.submit(7);
        assert!(!pool.is_idle());
        assert_eq!(pool.queued(), 1);
    }
}
