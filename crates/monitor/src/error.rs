use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed pressure data in {path:?}: {reason}")]
    Parse { path: PathBuf, reason: ParseReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseReason {
    #[error("no `full` record")]
    MissingFullRecord,

    #[error("no `avg10` field in the `full` record")]
    MissingAvg10,

    #[error("`avg10` value is not a number")]
    InvalidNumber,

    #[error("`avg10` value is not a finite non-negative number")]
    OutOfRange,

    #[error("content is not valid UTF-8")]
    NotUtf8,
}
