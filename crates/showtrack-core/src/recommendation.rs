//! Recommendation-tracking records shared by the handlers and the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Records that a series was recommended to a user, and whether the user
/// has since watched it.
///
/// Entries are created by the recommendation generator. This workspace only
/// ever flips `watched` from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLogEntry {
    /// Row identifier.
    pub id: i64,
    /// The user the series was recommended to.
    pub user_id: i64,
    /// The recommended series.
    pub series_id: i64,
    /// Whether the user has watched the recommended series.
    pub watched: bool,
    /// When the recommendation was made.
    pub recommended_at: DateTime<Utc>,
    /// When the entry was first marked watched.
    pub watched_at: Option<DateTime<Utc>>,
}

impl RecommendationLogEntry {
    /// Marks the entry watched at `now`.
    ///
    /// Returns `false` and leaves the entry untouched if it was already
    /// watched.
    pub fn mark_watched(&mut self, now: DateTime<Utc>) -> bool {
        if self.watched {
            return false;
        }
        self.watched = true;
        self.watched_at.get_or_insert(now);
        true
    }
}

/// Query predicate for recommendation log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLogFilter {
    /// Match entries for this user.
    pub user_id: i64,
    /// Match entries for this series.
    pub series_id: i64,
    /// When set, match only entries with this `watched` value.
    pub watched: Option<bool>,
}

impl RecommendationLogFilter {
    /// Entries for `(user_id, series_id)` that are still unwatched. Once an
    /// entry is flipped it no longer matches, which makes reapplying a
    /// handler a no-op.
    #[must_use]
    pub fn unwatched(user_id: i64, series_id: i64) -> Self {
        Self {
            user_id,
            series_id,
            watched: Some(false),
        }
    }

    /// Returns whether `entry` satisfies this filter.
    #[must_use]
    pub fn matches(&self, entry: &RecommendationLogEntry) -> bool {
        entry.user_id == self.user_id
            && entry.series_id == self.series_id
            && self.watched.is_none_or(|watched| entry.watched == watched)
    }
}

/// A user's current watching state for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchingStatus {
    /// The user has not started the series.
    NotStarted,
    /// The user is part-way through the series.
    Watching,
    /// The user finished the series.
    Completed,
    /// The user paused the series.
    OnHold,
    /// The user abandoned the series.
    Dropped,
}

impl WatchingStatus {
    /// The stored string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for WatchingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "watching" => Ok(Self::Watching),
            "completed" => Ok(Self::Completed),
            "on_hold" => Ok(Self::OnHold),
            "dropped" => Ok(Self::Dropped),
            other => Err(DomainError::Infrastructure(format!(
                "unknown watching status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry(user_id: i64, series_id: i64, watched: bool) -> RecommendationLogEntry {
        RecommendationLogEntry {
            id: 1,
            user_id,
            series_id,
            watched,
            recommended_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            watched_at: None,
        }
    }

    #[test]
    fn test_mark_watched_flips_flag_and_stamps_time() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut log = entry(1, 5, false);

        assert!(log.mark_watched(now));

        assert!(log.watched);
        assert_eq!(log.watched_at, Some(now));
    }

    #[test]
    fn test_mark_watched_on_watched_entry_is_noop() {
        let first = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap();
        let mut log = entry(1, 5, false);
        log.mark_watched(first);

        assert!(!log.mark_watched(later));

        assert!(log.watched);
        assert_eq!(log.watched_at, Some(first));
    }

    #[test]
    fn test_unwatched_filter_matches_only_open_entries_for_user_and_series() {
        let filter = RecommendationLogFilter::unwatched(1, 5);

        assert!(filter.matches(&entry(1, 5, false)));
        assert!(!filter.matches(&entry(1, 5, true)));
        assert!(!filter.matches(&entry(2, 5, false)));
        assert!(!filter.matches(&entry(1, 6, false)));
    }

    #[test]
    fn test_watching_status_parses_stored_strings() {
        for status in [
            WatchingStatus::NotStarted,
            WatchingStatus::Watching,
            WatchingStatus::Completed,
            WatchingStatus::OnHold,
            WatchingStatus::Dropped,
        ] {
            assert_eq!(status.as_str().parse::<WatchingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_watching_status_rejects_unknown_string() {
        match "binging".parse::<WatchingStatus>() {
            Err(DomainError::Infrastructure(msg)) => {
                assert_eq!(msg, "unknown watching status: binging");
            }
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
