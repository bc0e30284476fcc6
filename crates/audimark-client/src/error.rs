use thiserror::Error;

use audimark_net::NetError;

/// Errors produced by the review queue.
///
/// None of these are fatal to the process; every failure is scoped to the
/// operation that produced it and the previously rendered state survives.
#[derive(Error, Debug)]
pub enum QueueError {
    /// A save was requested for a position with no resolvable record id
    /// (row index out of range, or no LMS user attached for a grade).
    #[error("Submission ID not found")]
    MissingRecordId,

    /// Grade outside the accepted `0..=100` range; rejected at the edit
    /// boundary, nothing is stored.
    #[error("Grade {0} out of range (0-100)")]
    InvalidGrade(i64),

    /// A save was requested but the draft has nothing to send.
    #[error("Nothing to save for this row")]
    EmptyDraft,

    /// Data-source failure (transport, auth, server status).
    #[error(transparent)]
    Net(#[from] NetError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QueueError>;
