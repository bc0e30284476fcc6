//! Pagination state machine shared by the submissions queue and the
//! recordings list.
//!
//! `Idle → Loading → Idle`, with an epoch token stamped per fetch. A
//! page-change request while `Loading` is refused, and a response carrying
//! a stale epoch is discarded instead of applied, so a late reply can never
//! overwrite a newer page.

use audimark_shared::PageMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

/// Paged row storage plus the fetch state machine.
#[derive(Debug)]
pub struct Pager<R> {
    rows: Vec<R>,
    meta: PageMetadata,
    phase: Phase,
    epoch: u64,
}

impl<R> Pager<R> {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            rows: Vec::new(),
            meta: PageMetadata::empty(items_per_page),
            phase: Phase::Idle,
            epoch: 0,
        }
    }

    /// Start a fetch for `page` (1-based). Returns the epoch token the
    /// caller must hand back to [`Pager::commit`] or [`Pager::fail`], or
    /// `None` when the request is refused (page 0, or a fetch is already
    /// in flight).
    pub fn begin(&mut self, page: u32) -> Option<u64> {
        if page == 0 || self.phase == Phase::Loading {
            return None;
        }
        self.phase = Phase::Loading;
        self.epoch += 1;
        Some(self.epoch)
    }

    /// Atomically swap in a fetched page. Returns `false` (and changes
    /// nothing) when `epoch` is stale.
    pub fn commit(&mut self, epoch: u64, rows: Vec<R>, meta: PageMetadata) -> bool {
        if epoch != self.epoch {
            tracing::debug!(epoch, current = self.epoch, "Discarding stale page response");
            return false;
        }
        self.rows = rows;
        self.meta = meta;
        self.phase = Phase::Idle;
        true
    }

    /// A fetch failed: back to `Idle`, previous rows untouched.
    pub fn fail(&mut self, epoch: u64) {
        if epoch == self.epoch {
            self.phase = Phase::Idle;
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn meta(&self) -> &PageMetadata {
        &self.meta
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page: u32) -> PageMetadata {
        PageMetadata {
            current_page: page,
            items_per_page: 10,
            total_items: 12,
            total_pages: 2,
        }
    }

    #[test]
    fn test_begin_refuses_page_zero() {
        let mut pager: Pager<&str> = Pager::new(10);
        assert!(pager.begin(0).is_none());
        assert_eq!(pager.phase(), Phase::Idle);
    }

    #[test]
    fn test_begin_refuses_overlapping_fetch() {
        let mut pager: Pager<&str> = Pager::new(10);
        let epoch = pager.begin(1).unwrap();
        assert!(pager.begin(2).is_none());
        assert!(pager.commit(epoch, vec!["a"], meta(1)));
        // idle again, next fetch allowed
        assert!(pager.begin(2).is_some());
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let mut pager: Pager<&str> = Pager::new(10);
        let first = pager.begin(1).unwrap();
        pager.fail(first);

        let second = pager.begin(2).unwrap();
        assert!(pager.commit(second, vec!["page two"], meta(2)));

        // the first fetch's reply arrives late
        assert!(!pager.commit(first, vec!["page one"], meta(1)));
        assert_eq!(pager.rows(), &["page two"]);
        assert_eq!(pager.meta().current_page, 2);
    }

    #[test]
    fn test_fail_keeps_previous_rows() {
        let mut pager: Pager<&str> = Pager::new(10);
        let epoch = pager.begin(1).unwrap();
        assert!(pager.commit(epoch, vec!["a", "b"], meta(1)));

        let epoch = pager.begin(2).unwrap();
        pager.fail(epoch);
        assert_eq!(pager.rows(), &["a", "b"]);
        assert_eq!(pager.phase(), Phase::Idle);
    }
}
