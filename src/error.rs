//! Error types surfaced across public API boundaries.
//!
//! Internal contract violations (a caller-supplied index out of range, a
//! zero-length query profile block) remain panics/`assert!` — those
//! indicate a bug in the caller, not a recoverable runtime condition.
//! [`AlignError`] covers the conditions a `Database` or orchestrator
//! caller can legitimately hit at runtime.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("unknown sequence id: {id}")]
    UnknownSequence { id: u64 },

    #[error("sequence {id} has zero length")]
    EmptySequence { id: u64 },
}
