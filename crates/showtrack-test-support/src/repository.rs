//! Test repositories — mock `RecommendationLogRepository` implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use showtrack_core::error::DomainError;
use showtrack_core::recommendation::{RecommendationLogEntry, RecommendationLogFilter};
use showtrack_core::repository::RecommendationLogRepository;

/// An in-memory repository seeded with a fixed set of entries.
///
/// `find` filters the current rows; `save` replaces rows by `id`. Every call
/// is counted, and the next `n` saves can be made to fail to simulate a
/// transient persistence outage.
#[derive(Debug, Default)]
pub struct InMemoryRecommendationLogRepository {
    rows: Mutex<Vec<RecommendationLogEntry>>,
    saved_batches: Mutex<Vec<Vec<RecommendationLogEntry>>>,
    find_calls: AtomicU32,
    failing_saves: AtomicU32,
}

impl InMemoryRecommendationLogRepository {
    /// Create a repository holding `rows`.
    #[must_use]
    pub fn new(rows: Vec<RecommendationLogEntry>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Make the next `count` calls to `save` fail with an infrastructure
    /// error.
    #[must_use]
    pub fn failing_next_saves(self, count: u32) -> Self {
        self.failing_saves.store(count, Ordering::SeqCst);
        self
    }

    /// Returns a snapshot of the current rows.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn rows(&self) -> Vec<RecommendationLogEntry> {
        self.rows.lock().unwrap().clone()
    }

    /// Returns every batch passed to a successful `save`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_batches(&self) -> Vec<Vec<RecommendationLogEntry>> {
        self.saved_batches.lock().unwrap().clone()
    }

    /// Number of `find` calls so far.
    pub fn find_calls(&self) -> u32 {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecommendationLogRepository for InMemoryRecommendationLogRepository {
    async fn find(
        &self,
        filter: &RecommendationLogFilter,
    ) -> Result<Vec<RecommendationLogEntry>, DomainError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }

    async fn save(&self, entries: &[RecommendationLogEntry]) -> Result<(), DomainError> {
        let failing = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(DomainError::Infrastructure("deadlock detected".into()));
        }

        let mut rows = self.rows.lock().unwrap();
        for entry in entries {
            if let Some(row) = rows.iter_mut().find(|row| row.id == entry.id) {
                *row = entry.clone();
            }
        }
        self.saved_batches.lock().unwrap().push(entries.to_vec());
        Ok(())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug, Default)]
pub struct FailingRecommendationLogRepository {
    calls: AtomicU32,
}

impl FailingRecommendationLogRepository {
    /// Create a failing repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find` and `save` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecommendationLogRepository for FailingRecommendationLogRepository {
    async fn find(
        &self,
        _filter: &RecommendationLogFilter,
    ) -> Result<Vec<RecommendationLogEntry>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _entries: &[RecommendationLogEntry]) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
