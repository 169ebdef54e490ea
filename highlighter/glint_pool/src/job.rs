//! The unit of dispatch and its failure type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// One file's worth of work: read `input`, highlight, write `output`.
///
/// Immutable once enqueued; owned by the queue until claimed by exactly one
/// worker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Failure of a single job. Caught at the worker boundary and never
/// propagated to other jobs.
#[derive(Debug, Error)]
pub enum JobError {
    /// Reading the input or writing the output failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JobError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn job_holds_both_paths() {
        let job = Job::new("src/A.java", "out/A.html");
        assert_eq!(job.input, PathBuf::from("src/A.java"));
        assert_eq!(job.output, PathBuf::from("out/A.html"));
    }

    #[test]
    fn io_error_mentions_the_path() {
        let err = JobError::io(
            "missing.java",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.java"));
    }
}
