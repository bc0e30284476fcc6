//! The per-user recordings list.
//!
//! The read-only variant of the queue: same pagination state machine, no
//! drafts or saves. Rows arrive from the data source already grouped by
//! user within the fetched page.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use audimark_shared::constants::RECORDINGS_PAGE_SIZE;
use audimark_shared::{PageMetadata, RecordingGroup};

use crate::error::Result;
use crate::notify::Notifier;
use crate::pager::{Pager, Phase};
use crate::queue::QueueConfig;
use crate::source::DataSource;

/// Paginated list of recording groups.
pub struct RecordingList<S, N> {
    source: Arc<S>,
    notifier: Arc<N>,
    config: QueueConfig,
    pager: Arc<Mutex<Pager<RecordingGroup>>>,
}

impl<S, N> Clone for RecordingList<S, N> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            notifier: Arc::clone(&self.notifier),
            config: self.config,
            pager: Arc::clone(&self.pager),
        }
    }
}

impl<S: DataSource, N: Notifier> RecordingList<S, N> {
    pub fn new(source: S, notifier: N) -> Self {
        Self::with_config(
            source,
            notifier,
            QueueConfig {
                page_size: RECORDINGS_PAGE_SIZE,
            },
        )
    }

    pub fn with_config(source: S, notifier: N, config: QueueConfig) -> Self {
        Self {
            source: Arc::new(source),
            notifier: Arc::new(notifier),
            config,
            pager: Arc::new(Mutex::new(Pager::new(config.page_size))),
        }
    }

    /// Fetch and display one page (1-based). Same contract as the
    /// submissions queue: ignored while loading, previous rows kept on
    /// failure, failure reported once.
    pub async fn load_page(&self, page: u32) -> Result<bool> {
        let epoch = {
            let mut pager = self.pager.lock().await;
            match pager.begin(page) {
                Some(epoch) => epoch,
                None => {
                    debug!(page, "Page change ignored");
                    return Ok(false);
                }
            }
        };

        match self.source.fetch_recordings(page, self.config.page_size).await {
            Ok(fetched) => {
                let mut pager = self.pager.lock().await;
                let applied = pager.commit(epoch, fetched.rows, fetched.meta);
                if applied {
                    info!(page, groups = pager.rows().len(), "Recordings page loaded");
                }
                Ok(applied)
            }
            Err(e) => {
                self.pager.lock().await.fail(epoch);
                self.notifier
                    .error(&format!("Failed to fetch recordings: {e}"));
                Err(e.into())
            }
        }
    }

    pub async fn rows(&self) -> Vec<RecordingGroup> {
        self.pager.lock().await.rows().to_vec()
    }

    pub async fn page_metadata(&self) -> PageMetadata {
        self.pager.lock().await.meta().clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.pager.lock().await.phase() == Phase::Loading
    }
}
