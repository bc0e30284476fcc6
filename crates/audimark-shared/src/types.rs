//! Domain model structs for the review queue.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the embedding UI layer. Wire field names are camelCase to
//! match the server payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NOT_AVAILABLE;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Stable, server-assigned submission identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable LMS user identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The owning-user summary attached to a submission or recording group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserSummary {
    /// Placeholder identity used when the server omitted the user object.
    pub fn unknown() -> Self {
        Self {
            id: UserId(NOT_AVAILABLE.to_string()),
            name: None,
            email: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// A submission transcript: either timestamped segments or one text blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Transcript {
    /// Mapping of timestamp label to spoken text, ordered by timestamp.
    Timed(BTreeMap<String, String>),
    /// A single unsegmented text blob.
    Plain(String),
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// One row of the review queue. Immutable from the client's perspective
/// except for `feedback` and `grade`, which are server-authoritative after
/// a successful save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub title: String,
    pub user: Option<UserSummary>,
    /// Media link to the uploaded audio file.
    pub link: String,
    /// Pre-formatted duration string (e.g. `"3:41"`).
    pub duration: String,
    pub artist: String,
    pub transcript: Option<Transcript>,
    pub feedback: Option<String>,
    pub grade: Option<u8>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SubmissionRecord {
    pub fn user_name(&self) -> &str {
        self.user
            .as_ref()
            .map(UserSummary::display_name)
            .unwrap_or(NOT_AVAILABLE)
    }

    /// The LMS user id the grade endpoint is keyed by, if resolvable.
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }
}

/// One fetched page of the submissions queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPage {
    pub rows: Vec<SubmissionRecord>,
    pub meta: PageMetadata,
    /// Whether the launching user holds an instructor role. Controls the
    /// editable feedback/grade surface.
    pub is_instructor: bool,
}

// ---------------------------------------------------------------------------
// Recordings
// ---------------------------------------------------------------------------

/// A single uploaded recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    pub title: String,
    pub url: String,
    pub mime_type: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// All recordings by one user within the current page.
///
/// Grouping is performed per fetched page only; a user whose recordings
/// span a page boundary appears in more than one page's groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordingGroup {
    pub user: UserSummary,
    pub recordings: Vec<Recording>,
}

impl RecordingGroup {
    pub fn recordings_count(&self) -> usize {
        self.recordings.len()
    }

    /// Timestamp of the most recent recording, `None` for an empty set.
    pub fn latest_recording_at(&self) -> Option<DateTime<Utc>> {
        self.recordings.iter().filter_map(|r| r.created_at).max()
    }
}

/// One fetched page of the recordings list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingPage {
    pub rows: Vec<RecordingGroup>,
    pub meta: PageMetadata,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Server-side pagination metadata. Pages are 1-based; when `total_items`
/// is non-zero, `current_page` lies in `1..=total_pages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PageMetadata {
    /// Metadata for a queue that has not been fetched yet.
    pub fn empty(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            items_per_page,
            total_items: 0,
            total_pages: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Deep-linking resources
// ---------------------------------------------------------------------------

/// A selectable audio resource offered during the deep-linking flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub duration: String,
    pub artist: String,
    pub link: String,
}

// ---------------------------------------------------------------------------
// Launch info
// ---------------------------------------------------------------------------

/// Claims surfaced by the launch-info endpoint for the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LaunchInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}
