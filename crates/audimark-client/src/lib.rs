//! # audimark-client
//!
//! The review/grading queue core: server-paginated submission rows, per-row
//! draft state (feedback text, grade, submitted flags), asynchronous saves
//! with at-most-one-in-flight per row, and the pagination state machine.
//!
//! Drafts are keyed by the stable submission id, never by table position,
//! so a save that resolves after its page has been replaced can still land
//! on the right record.

pub mod drafts;
pub mod notify;
pub mod pager;
pub mod queue;
pub mod recordings;
pub mod source;

mod error;

pub use drafts::{DraftStore, RowDraft};
pub use error::QueueError;
pub use notify::{LogNotifier, Notifier};
pub use queue::{QueueConfig, SaveOutcome, SubmissionQueue};
pub use recordings::RecordingList;
pub use source::DataSource;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the default tracing subscriber for an embedding application.
///
/// Honors `RUST_LOG` when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("audimark_client=debug,audimark_net=debug,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
