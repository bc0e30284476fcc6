//! The paginated submissions review queue.
//!
//! Owns the fetched page, the draft store, and the save pipeline. All
//! state sits behind one async mutex whose guard is never held across a
//! network await: an operation locks to read/stamp state, performs its
//! request, then re-locks to apply the result. Save completions target
//! rows by the stable id captured at request time, so a save that races a
//! page change cannot touch whichever row has since been recycled into its
//! old position.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use audimark_shared::constants::SUBMISSIONS_PAGE_SIZE;
use audimark_shared::{PageMetadata, SubmissionId, SubmissionRecord};

use crate::drafts::{DraftStore, RowDraft};
use crate::error::{QueueError, Result};
use crate::notify::Notifier;
use crate::pager::{Pager, Phase};
use crate::source::DataSource;

/// Queue configuration. The page size is fixed here, not adjustable from
/// the table UI.
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    pub page_size: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            page_size: SUBMISSIONS_PAGE_SIZE,
        }
    }
}

/// Which per-row save operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SaveKind {
    Feedback,
    Grade,
}

/// Result of a save request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveOutcome {
    /// The write went through and the sent confirmation is set.
    Saved,
    /// A save for the same row and field is already in flight; no second
    /// network write was issued.
    AlreadyInFlight,
}

struct Inner {
    pager: Pager<SubmissionRecord>,
    drafts: DraftStore,
    is_instructor: bool,
    saving: HashSet<(SubmissionId, SaveKind)>,
}

/// The review/grading queue over a data source `S`, reporting outcomes to
/// the notifier `N`.
pub struct SubmissionQueue<S, N> {
    source: Arc<S>,
    notifier: Arc<N>,
    config: QueueConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<S, N> Clone for SubmissionQueue<S, N> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            notifier: Arc::clone(&self.notifier),
            config: self.config,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: DataSource, N: Notifier> SubmissionQueue<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self::with_config(source, notifier, QueueConfig::default())
    }

    pub fn with_config(source: S, notifier: N, config: QueueConfig) -> Self {
        Self {
            source: Arc::new(source),
            notifier: Arc::new(notifier),
            config,
            inner: Arc::new(Mutex::new(Inner {
                pager: Pager::new(config.page_size),
                drafts: DraftStore::new(),
                is_instructor: false,
                saving: HashSet::new(),
            })),
        }
    }

    /// Fetch and display one page (1-based).
    ///
    /// Returns `Ok(true)` when the page was swapped in and the draft store
    /// rebuilt, `Ok(false)` when the request was ignored (a fetch is
    /// already in flight, page 0, or the response arrived stale). On
    /// failure the previous page stays displayed and the error is reported
    /// once through the notifier.
    pub async fn load_page(&self, page: u32) -> Result<bool> {
        let epoch = {
            let mut inner = self.inner.lock().await;
            match inner.pager.begin(page) {
                Some(epoch) => epoch,
                None => {
                    debug!(page, "Page change ignored");
                    return Ok(false);
                }
            }
        };

        match self.source.fetch_submissions(page, self.config.page_size).await {
            Ok(fetched) => {
                let mut guard = self.inner.lock().await;
                let inner = &mut *guard;
                if !inner.pager.commit(epoch, fetched.rows, fetched.meta) {
                    return Ok(false);
                }
                inner.is_instructor = fetched.is_instructor;
                // Correctness boundary: the draft store is rebuilt under
                // the same lock that swapped the rows in, so no read can
                // observe new rows with stale drafts.
                inner.drafts.reset_for_page(inner.pager.rows());
                info!(page, rows = inner.pager.rows().len(), "Page loaded");
                Ok(true)
            }
            Err(e) => {
                self.inner.lock().await.pager.fail(epoch);
                self.notifier
                    .error(&format!("Failed to fetch submissions: {e}"));
                Err(e.into())
            }
        }
    }

    /// Overwrite the feedback draft for the row at `position` on the
    /// current page, clearing its sent confirmation.
    pub async fn set_feedback(&self, position: usize, text: impl Into<String>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let id = resolve_id(&inner, position)?;
        if !inner.drafts.set_feedback(&id, text) {
            return Err(QueueError::MissingRecordId);
        }
        Ok(())
    }

    /// Overwrite the grade draft for the row at `position`. Grades outside
    /// `0..=100` are rejected and nothing is stored.
    pub async fn set_grade(&self, position: usize, grade: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let id = resolve_id(&inner, position)?;
        if !inner.drafts.set_grade(&id, grade)? {
            return Err(QueueError::MissingRecordId);
        }
        Ok(())
    }

    /// Persist the feedback draft of the row at `position`.
    ///
    /// At most one feedback save per row is in flight at a time; a
    /// duplicate request (double-click) returns
    /// [`SaveOutcome::AlreadyInFlight`] without a second network write.
    pub async fn save_feedback(&self, position: usize) -> Result<SaveOutcome> {
        let (id, text, revision) = {
            let mut inner = self.inner.lock().await;
            let id = resolve_id(&inner, position)?;
            let draft = inner.drafts.draft(&id).ok_or(QueueError::MissingRecordId)?;
            let text = draft.feedback.clone();
            let revision = draft.feedback_revision();
            if text.trim().is_empty() {
                return Err(QueueError::EmptyDraft);
            }
            if !inner.saving.insert((id.clone(), SaveKind::Feedback)) {
                debug!(%id, "Feedback save already in flight");
                return Ok(SaveOutcome::AlreadyInFlight);
            }
            (id, text, revision)
        };

        let result = self.source.post_feedback(&id, &text).await;

        let mut inner = self.inner.lock().await;
        inner.saving.remove(&(id.clone(), SaveKind::Feedback));
        match result {
            Ok(()) => {
                // Confirms only if the text is still at the revision that
                // was sent; an edit made mid-flight keeps the flag cleared.
                inner.drafts.mark_feedback_submitted(&id, revision);
                drop(inner);
                info!(%id, "Feedback saved");
                self.notifier.success("Feedback saved successfully");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                drop(inner);
                self.notifier.error(&format!("Failed to save feedback: {e}"));
                Err(e.into())
            }
        }
    }

    /// Persist the grade draft of the row at `position`. The grade
    /// endpoint is keyed by the row's LMS user id; a row without a user
    /// fails with [`QueueError::MissingRecordId`].
    pub async fn save_grade(&self, position: usize) -> Result<SaveOutcome> {
        let (id, user, grade, revision) = {
            let mut inner = self.inner.lock().await;
            let row = inner
                .pager
                .rows()
                .get(position)
                .ok_or(QueueError::MissingRecordId)?;
            let id = row.id.clone();
            let user = row.user_id().cloned().ok_or(QueueError::MissingRecordId)?;
            let draft = inner.drafts.draft(&id).ok_or(QueueError::MissingRecordId)?;
            let grade = draft.grade.ok_or(QueueError::EmptyDraft)?;
            let revision = draft.grade_revision();
            if !inner.saving.insert((id.clone(), SaveKind::Grade)) {
                debug!(%id, "Grade save already in flight");
                return Ok(SaveOutcome::AlreadyInFlight);
            }
            (id, user, grade, revision)
        };

        let result = self.source.post_grade(&user, grade).await;

        let mut inner = self.inner.lock().await;
        inner.saving.remove(&(id.clone(), SaveKind::Grade));
        match result {
            Ok(()) => {
                inner.drafts.mark_grade_submitted(&id, revision);
                drop(inner);
                info!(%id, %user, grade, "Grade saved");
                self.notifier.success("Grade saved successfully");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                drop(inner);
                self.notifier.error(&format!("Failed to save grade: {e}"));
                Err(e.into())
            }
        }
    }

    /// Snapshot of the currently displayed rows.
    pub async fn rows(&self) -> Vec<SubmissionRecord> {
        self.inner.lock().await.pager.rows().to_vec()
    }

    pub async fn page_metadata(&self) -> PageMetadata {
        self.inner.lock().await.pager.meta().clone()
    }

    pub async fn is_instructor(&self) -> bool {
        self.inner.lock().await.is_instructor
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.pager.phase() == Phase::Loading
    }

    /// Draft for the row at `position` on the current page.
    pub async fn draft(&self, position: usize) -> Option<RowDraft> {
        let inner = self.inner.lock().await;
        let id = inner.pager.rows().get(position)?.id.clone();
        inner.drafts.draft(&id).cloned()
    }

    /// Draft looked up by stable id, regardless of what is rendered.
    pub async fn draft_for(&self, id: &SubmissionId) -> Option<RowDraft> {
        self.inner.lock().await.drafts.draft(id).cloned()
    }
}

fn resolve_id(inner: &Inner, position: usize) -> Result<SubmissionId> {
    inner
        .pager
        .rows()
        .get(position)
        .map(|r| r.id.clone())
        .ok_or(QueueError::MissingRecordId)
}
