//! Fixed-size dispatch pool for whole-file highlight jobs.
//!
//! A pool of worker threads shares one blocking job queue -- the queue is the
//! only shared mutable structure. Each worker owns its own tokenizer state
//! (built by a per-worker factory at spawn time), so no locking happens
//! while a job executes. Failures and panics are isolated at the worker
//! boundary: the job is logged and skipped, the pool keeps running.
//!
//! The coordinating thread can join in: after submitting everything, call
//! [`DispatchPool::run_until_idle`] to drain the queue as an ad hoc extra
//! worker instead of idling until the pool catches up.

pub mod job;
pub mod pool;

pub use job::{Job, JobError};
pub use pool::{DispatchPool, Worker};
