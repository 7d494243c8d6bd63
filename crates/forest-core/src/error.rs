use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures. Recoverable data problems (unparseable lengths,
/// unknown labels, orphaned records) never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} not found in forest dataset")]
    EntityNotFound { name: String },

    /// Padded org-code matching only works for fixed-width codes.
    #[error("org code {code} of {entity} has {width} digits, padded matching expects {expected}")]
    OrgCodeWidth {
        entity: String,
        code: u64,
        width: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
