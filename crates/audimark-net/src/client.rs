//! HTTP client for the tool backend.
//!
//! Every request carries the LTI launch token as a bearer credential. No
//! request is retried; a failure is surfaced once to the caller, which keeps
//! whatever it was displaying before.

use serde::de::DeserializeOwned;
use tracing::debug;

use audimark_shared::{
    LaunchInfo, LaunchToken, RecordingPage, Resource, SubmissionId, SubmissionPage, UserId,
};

use crate::error::{status_error, NetError, Result};
use crate::wire::{self, RecordingsEnvelope, SubmissionsEnvelope, UploadEnvelope};

/// Typed client for the tool backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: LaunchToken,
}

impl ApiClient {
    /// Build a client for `base_url` using the given launch token.
    ///
    /// Fails with [`NetError::MissingToken`] when the token is empty, so a
    /// launch without a credential never reaches the network.
    pub fn new(base_url: impl Into<String>, token: LaunchToken) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Same as [`ApiClient::new`] but with a caller-configured
    /// `reqwest::Client` (timeouts, proxies).
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: LaunchToken,
    ) -> Result<Self> {
        if token.is_empty() {
            return Err(NetError::MissingToken);
        }
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = self.url(path_and_query);
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;
        Self::check_status(resp).await?.json::<T>().await.map_err(Into::into)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(self.token.as_str())
            .json(body)
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), body))
    }

    /// Fetch one page of the submissions queue.
    ///
    /// Purely a read; the previously displayed page stays untouched when
    /// this fails.
    pub async fn fetch_submissions(&self, page: u32, limit: u32) -> Result<SubmissionPage> {
        let envelope: SubmissionsEnvelope = self
            .get_json(&format!("/submissions?page={page}&limit={limit}"))
            .await?;
        Ok(SubmissionPage {
            rows: envelope
                .submissions
                .into_iter()
                .map(wire::normalize_submission)
                .collect(),
            meta: envelope.pagination,
            is_instructor: envelope.is_instructor,
        })
    }

    /// Fetch one page of recordings, grouped by user within the page.
    pub async fn fetch_recordings(&self, page: u32, limit: u32) -> Result<RecordingPage> {
        let envelope: RecordingsEnvelope = self
            .get_json(&format!("/recordings?page={page}&limit={limit}"))
            .await?;
        Ok(RecordingPage {
            rows: wire::group_recordings(envelope.recordings),
            meta: envelope.pagination,
        })
    }

    /// Persist instructor feedback for one submission.
    pub async fn post_feedback(&self, id: &SubmissionId, feedback: &str) -> Result<()> {
        self.post_json("/feedback", &wire::feedback_body(id, feedback))
            .await
    }

    /// Persist a grade for one student. The endpoint is keyed by the LMS
    /// user id, not the submission id.
    pub async fn post_grade(&self, user: &UserId, grade: u8) -> Result<()> {
        self.post_json("/grade", &wire::grade_body(user, grade)).await
    }

    /// Fetch the selectable resources for the deep-linking flow.
    pub async fn fetch_resources(&self) -> Result<Vec<Resource>> {
        self.get_json("/resources").await
    }

    /// Submit the chosen resource to the deep-linking endpoint.
    pub async fn submit_resource(&self, resource: &Resource) -> Result<()> {
        self.post_json("/submit/audio", &wire::resource_body(resource)?)
            .await
    }

    /// Fetch the launch claims (name, email, roles) for the current session.
    pub async fn fetch_launch_info(&self) -> Result<LaunchInfo> {
        self.get_json("/info").await
    }

    /// Upload an audio file as multipart form data; returns the stored
    /// file's URL.
    pub async fn upload_audio(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let form = wire::audio_form(file_name, mime_type, bytes)?;

        let resp = self
            .http
            .post(self.url("/upload/audio"))
            .bearer_auth(self.token.as_str())
            .multipart(form)
            .send()
            .await?;

        let body: UploadEnvelope = Self::check_status(resp).await?.json().await?;
        Ok(body.file_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            "https://tool.example/api/",
            LaunchToken::new("tok"),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_token_is_rejected_before_any_request() {
        let err = ApiClient::new("https://tool.example", LaunchToken::new("")).unwrap_err();
        assert!(matches!(err, NetError::MissingToken));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let c = client();
        assert_eq!(
            c.url("/submissions?page=1&limit=10"),
            "https://tool.example/api/submissions?page=1&limit=10"
        );
    }
}
