// src/error.rs
use thiserror::Error;

/// Error types for the fast-pi library
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PiError {
    /// Caller supplied an out-of-range argument
    #[error("Invalid argument '{parameter}' = {value}: {constraint}")]
    InvalidArgument {
        parameter: String,
        value: i64,
        constraint: String,
    },

    /// The worker thread pool could not be created
    #[error("Worker pool error: {reason}")]
    WorkerPool { reason: String },
}

/// Coarse classification of a [`PiError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    WorkerPool,
}

impl ErrorKind {
    /// Process exit code a command-line front end should use for this kind.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => 2,
            ErrorKind::WorkerPool => 1,
        }
    }
}

impl PiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PiError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            PiError::WorkerPool { .. } => ErrorKind::WorkerPool,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

impl From<rayon::ThreadPoolBuildError> for PiError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        PiError::WorkerPool {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for fast-pi operations
pub type PiResult<T> = Result<T, PiError>;

/// Validation utilities
pub mod validation {
    use super::{PiError, PiResult};

    /// Validate that a count is non-negative
    pub fn validate_non_negative(name: &str, value: i64) -> PiResult<()> {
        if value < 0 {
            Err(PiError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a count is strictly positive
    pub fn validate_positive(name: &str, value: i64) -> PiResult<()> {
        if value <= 0 {
            Err(PiError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate an explicit thread pool size
    pub fn validate_threads(threads: usize) -> PiResult<()> {
        if threads == 0 {
            Err(PiError::InvalidArgument {
                parameter: "threads".to_string(),
                value: 0,
                constraint: "must be greater than 0 when set".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sample_count", 0).is_ok());
        assert!(validate_non_negative("sample_count", 10).is_ok());
        assert!(validate_non_negative("sample_count", -1).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("worker_count", 1).is_ok());
        assert!(validate_positive("worker_count", 0).is_err());
        assert!(validate_positive("worker_count", -3).is_err());
    }

    #[test]
    fn test_validate_threads() {
        assert!(validate_threads(4).is_ok());
        assert_eq!(
            validate_threads(0).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_error_display() {
        let error = PiError::InvalidArgument {
            parameter: "total_samples".to_string(),
            value: -5,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("total_samples"));
        assert!(display.contains("-5"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_error_kind_and_exit_code() {
        let invalid = validate_positive("worker_count", 0).unwrap_err();
        assert!(invalid.is_invalid_argument());
        assert_eq!(invalid.kind().exit_code(), 2);

        let pool = PiError::WorkerPool {
            reason: "spawn failed".to_string(),
        };
        assert!(!pool.is_invalid_argument());
        assert_eq!(pool.kind().exit_code(), 1);
        assert!(pool.to_string().contains("spawn failed"));
    }

    #[test]
    fn test_thread_pool_build_error_maps_to_worker_pool() {
        let built = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .spawn_handler(|_thread| {
                Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "thread spawn refused",
                ))
            })
            .build();

        let error = match built {
            Ok(_) => panic!("pool should not build when spawning fails"),
            Err(e) => PiError::from(e),
        };
        assert_eq!(error.kind(), ErrorKind::WorkerPool);
        assert_eq!(error.kind().exit_code(), 1);
        assert!(error.to_string().starts_with("Worker pool error"));
    }
}
