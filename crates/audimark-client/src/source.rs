//! The data-source seam of the review queue.
//!
//! The queue talks to the backend only through [`DataSource`], so tests run
//! against an in-memory fake and the production path runs against
//! [`ApiClient`].

use async_trait::async_trait;

use audimark_net::{ApiClient, NetError};
use audimark_shared::{RecordingPage, SubmissionId, SubmissionPage, UserId};

/// Read and write operations the review queue needs from the backend.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch one page of the submissions queue. Purely a read.
    async fn fetch_submissions(&self, page: u32, limit: u32)
        -> Result<SubmissionPage, NetError>;

    /// Fetch one page of recordings, grouped by user within the page.
    async fn fetch_recordings(&self, page: u32, limit: u32) -> Result<RecordingPage, NetError>;

    /// Persist instructor feedback for one submission.
    async fn post_feedback(&self, id: &SubmissionId, feedback: &str) -> Result<(), NetError>;

    /// Persist a grade for one student, keyed by LMS user id.
    async fn post_grade(&self, user: &UserId, grade: u8) -> Result<(), NetError>;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for std::sync::Arc<T> {
    async fn fetch_submissions(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<SubmissionPage, NetError> {
        (**self).fetch_submissions(page, limit).await
    }

    async fn fetch_recordings(&self, page: u32, limit: u32) -> Result<RecordingPage, NetError> {
        (**self).fetch_recordings(page, limit).await
    }

    async fn post_feedback(&self, id: &SubmissionId, feedback: &str) -> Result<(), NetError> {
        (**self).post_feedback(id, feedback).await
    }

    async fn post_grade(&self, user: &UserId, grade: u8) -> Result<(), NetError> {
        (**self).post_grade(user, grade).await
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch_submissions(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<SubmissionPage, NetError> {
        ApiClient::fetch_submissions(self, page, limit).await
    }

    async fn fetch_recordings(&self, page: u32, limit: u32) -> Result<RecordingPage, NetError> {
        ApiClient::fetch_recordings(self, page, limit).await
    }

    async fn post_feedback(&self, id: &SubmissionId, feedback: &str) -> Result<(), NetError> {
        ApiClient::post_feedback(self, id, feedback).await
    }

    async fn post_grade(&self, user: &UserId, grade: u8) -> Result<(), NetError> {
        ApiClient::post_grade(self, user, grade).await
    }
}
