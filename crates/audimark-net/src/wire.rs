//! Raw server payload shapes and their normalization into canonical rows.
//!
//! The backend nests most submission fields under `submissions[].submission`
//! with the owning user alongside it; that nested shape is the canonical
//! one here. Normalization is total: a missing nested field becomes the
//! `"N/A"` placeholder (or `None`), never an error, so one malformed entry
//! cannot fail a whole page.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use audimark_shared::constants::NOT_AVAILABLE;
use audimark_shared::{
    PageMetadata, Recording, RecordingGroup, Resource, SubmissionId, SubmissionRecord,
    Transcript, UserId, UserSummary,
};

use crate::error::{NetError, Result};

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// `GET /submissions` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsEnvelope {
    #[serde(default)]
    pub submissions: Vec<RawSubmission>,
    pub pagination: PageMetadata,
    #[serde(default)]
    pub is_instructor: bool,
}

/// One entry of the submissions listing, as sent by the server.
#[derive(Debug, Deserialize)]
pub struct RawSubmission {
    pub id: String,
    #[serde(default)]
    pub submission: Option<RawSubmissionBody>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmissionBody {
    pub title: Option<String>,
    pub duration: Option<RawDuration>,
    pub artist: Option<String>,
    pub link: Option<String>,
    pub transcript: Option<Transcript>,
    pub feedback: Option<String>,
    pub grade: Option<u8>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RawDuration {
    pub formatted: Option<String>,
}

/// Flatten one raw listing entry into a displayable row.
pub fn normalize_submission(raw: RawSubmission) -> SubmissionRecord {
    let body = raw.submission.unwrap_or_default();
    let na = || NOT_AVAILABLE.to_string();
    SubmissionRecord {
        id: SubmissionId(raw.id),
        title: body.title.unwrap_or_else(na),
        user: raw.user,
        link: body.link.unwrap_or_else(na),
        duration: body
            .duration
            .and_then(|d| d.formatted)
            .unwrap_or_else(na),
        artist: body.artist.unwrap_or_else(na),
        transcript: body.transcript,
        feedback: body.feedback,
        grade: body.grade,
        created_at: body.created_at,
    }
}

// ---------------------------------------------------------------------------
// Recordings
// ---------------------------------------------------------------------------

/// `GET /recordings` response envelope.
#[derive(Debug, Deserialize)]
pub struct RecordingsEnvelope {
    #[serde(default)]
    pub recordings: Vec<RawUserRecordings>,
    pub pagination: PageMetadata,
}

/// One per-user entry of the recordings listing. The server may emit
/// several entries for the same user within one page.
#[derive(Debug, Deserialize)]
pub struct RawUserRecordings {
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub recordings: Vec<RawRecording>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecording {
    pub id: String,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub mime_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

fn normalize_recording(raw: RawRecording) -> Recording {
    let na = || NOT_AVAILABLE.to_string();
    Recording {
        id: raw.id,
        title: raw.file_name.unwrap_or_else(na),
        url: raw.file_url.unwrap_or_else(na),
        mime_type: raw.mime_type.unwrap_or_else(|| "audio/mpeg".to_string()),
        created_at: raw.created_at,
    }
}

/// Merge flat per-user entries into one group per user id, preserving
/// first-seen order.
///
/// Grouping applies to the returned page only: a user whose recordings span
/// several pages keeps one group per page. Entries with no user object are
/// collected under a placeholder identity.
pub fn group_recordings(entries: Vec<RawUserRecordings>) -> Vec<RecordingGroup> {
    let mut groups: Vec<RecordingGroup> = Vec::new();
    let mut index_by_user: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let user = entry.user.unwrap_or_else(UserSummary::unknown);
        let recordings = entry.recordings.into_iter().map(normalize_recording);

        match index_by_user.get(user.id.as_str()) {
            Some(&i) => groups[i].recordings.extend(recordings),
            None => {
                index_by_user.insert(user.id.as_str().to_string(), groups.len());
                groups.push(RecordingGroup {
                    user,
                    recordings: recordings.collect(),
                });
            }
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Write payloads and upload
// ---------------------------------------------------------------------------

/// Multipart field name the upload endpoint reads the audio file from.
pub const AUDIO_FIELD: &str = "audio";

/// `POST /feedback` request body.
pub fn feedback_body(id: &SubmissionId, feedback: &str) -> serde_json::Value {
    json!({ "submissionId": id.as_str(), "feedback": feedback })
}

/// `POST /grade` request body. Keyed by the LMS user id, not the
/// submission id.
pub fn grade_body(user: &UserId, grade: u8) -> serde_json::Value {
    json!({ "grade": grade, "userId": user.as_str() })
}

/// `POST /submit/audio` request body: the chosen resource verbatim.
pub fn resource_body(resource: &Resource) -> Result<serde_json::Value> {
    serde_json::to_value(resource).map_err(|e| NetError::Decode(e.to_string()))
}

/// Multipart form for `POST /upload/audio`.
pub fn audio_form(
    file_name: &str,
    mime_type: &str,
    bytes: Vec<u8>,
) -> Result<reqwest::multipart::Form> {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime_type)
        .map_err(|e| NetError::Decode(format!("invalid mime type: {e}")))?;
    Ok(reqwest::multipart::Form::new().part(AUDIO_FIELD, part))
}

/// `POST /upload/audio` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadEnvelope {
    pub file_url: String,
}
