//! Per-row editable draft state.
//!
//! Drafts live in a store keyed by the stable submission id. Keying by
//! table position would silently misattribute edits whenever the fetched
//! row order changes, so position is resolved to an id once, at the edge,
//! and everything below works with ids.

use std::collections::HashMap;

use serde::Serialize;

use audimark_shared::constants::{GRADE_MAX, GRADE_MIN};
use audimark_shared::{SubmissionId, SubmissionRecord};

use crate::error::{QueueError, Result};

/// Unsaved edit state for one row: feedback text, grade, and the "already
/// sent" confirmation flags. Editing a field invalidates its flag.
///
/// Each field also carries an edit revision, bumped on every edit. A save
/// captures the revision of the value it is sending; if the field is edited
/// again while the save is in flight, the completion sees a newer revision
/// and leaves the confirmation cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDraft {
    pub feedback: String,
    pub grade: Option<u8>,
    pub feedback_submitted: bool,
    pub grade_submitted: bool,
    #[serde(skip)]
    feedback_rev: u64,
    #[serde(skip)]
    grade_rev: u64,
}

impl RowDraft {
    /// Seed a draft from the server-authoritative values of a fetched row.
    /// A field counts as already submitted when the server holds a value
    /// for it.
    fn seeded_from(record: &SubmissionRecord) -> Self {
        Self {
            feedback: record.feedback.clone().unwrap_or_default(),
            grade: record.grade,
            feedback_submitted: record.feedback.is_some(),
            grade_submitted: record.grade.is_some(),
            feedback_rev: 0,
            grade_rev: 0,
        }
    }

    /// Revision of the current feedback text.
    pub fn feedback_revision(&self) -> u64 {
        self.feedback_rev
    }

    /// Revision of the current grade draft.
    pub fn grade_revision(&self) -> u64 {
        self.grade_rev
    }
}

/// Draft store for the currently rendered page.
#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: HashMap<SubmissionId, RowDraft>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every draft from the incoming page's own feedback/grade
    /// values, dropping drafts for rows that are no longer rendered.
    ///
    /// Must run to completion before any read of the store for the new
    /// page; the queue calls it under the same lock that swaps the rows in.
    pub fn reset_for_page(&mut self, rows: &[SubmissionRecord]) {
        self.drafts = rows
            .iter()
            .map(|r| (r.id.clone(), RowDraft::seeded_from(r)))
            .collect();
    }

    pub fn draft(&self, id: &SubmissionId) -> Option<&RowDraft> {
        self.drafts.get(id)
    }

    /// Overwrite the feedback text and clear its sent confirmation.
    /// Returns `false` when no draft exists for the id.
    pub fn set_feedback(&mut self, id: &SubmissionId, text: impl Into<String>) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.feedback = text.into();
                draft.feedback_submitted = false;
                draft.feedback_rev += 1;
                true
            }
            None => false,
        }
    }

    /// Overwrite the grade draft and clear its sent confirmation.
    ///
    /// Values outside `0..=100` are rejected at this boundary and nothing
    /// is stored. Returns `Ok(false)` when no draft exists for the id.
    pub fn set_grade(&mut self, id: &SubmissionId, grade: i64) -> Result<bool> {
        if grade < i64::from(GRADE_MIN) || grade > i64::from(GRADE_MAX) {
            return Err(QueueError::InvalidGrade(grade));
        }
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.grade = Some(grade as u8);
                draft.grade_submitted = false;
                draft.grade_rev += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record a confirmed feedback save for the id, given the revision of
    /// the text that was sent.
    ///
    /// A draft whose feedback was edited after the save started carries a
    /// newer revision; its confirmation stays cleared, since the current
    /// text was never sent. When the id is no longer on the rendered page
    /// (the save raced a page change) the confirmation is upserted under
    /// the id rather than applied to whichever row now occupies the old
    /// position.
    pub fn mark_feedback_submitted(&mut self, id: &SubmissionId, revision: u64) {
        if let Some(draft) = self.drafts.get(id) {
            if draft.feedback_rev != revision {
                return;
            }
        }
        self.drafts.entry(id.clone()).or_default().feedback_submitted = true;
    }

    /// Record a confirmed grade save for the id. Same revision and upsert
    /// contract as [`DraftStore::mark_feedback_submitted`].
    pub fn mark_grade_submitted(&mut self, id: &SubmissionId, revision: u64) {
        if let Some(draft) = self.drafts.get(id) {
            if draft.grade_rev != revision {
                return;
            }
        }
        self.drafts.entry(id.clone()).or_default().grade_submitted = true;
    }

    pub fn contains(&self, id: &SubmissionId) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
