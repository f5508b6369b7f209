// src/error.rs
// Error types shared by the item model, the loader, the scheduler and the settings store.

use std::path::PathBuf;

use thiserror::Error;

/// Why a record could not be turned into an `Item`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("item data must be a list of segments")]
    NotAList,

    #[error("segment {segment} must be a list of strings")]
    SegmentNotAList { segment: usize },

    #[error("variant {variant} of segment {segment} must be a string")]
    VariantNotAString { segment: usize, variant: usize },

    #[error("item has no segments")]
    NoSegments,
}

/// Failures while reading an item bank from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to load file '{}', file could not be found", .0.display())]
    NotFound(PathBuf),

    #[error("the file '{}' is not a valid file format (.json or .sfmt)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("unable to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in file '{}': {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("json in file '{}' does not contain a list as expected", .0.display())]
    NotAList(PathBuf),

    #[error("unable to create item from record {record} in file '{}': {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        record: usize,
        #[source]
        source: ItemError,
    },

    #[error("no items were able to be found in any of the given files")]
    Empty,
}

/// Misuse of the retry queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("cannot schedule an empty set of items")]
    EmptyUniverse,
}

/// Failures while persisting the settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json error: {0}")]
    Json(#[from] serde_json::Error),
}
