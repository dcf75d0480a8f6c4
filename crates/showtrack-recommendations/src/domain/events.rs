//! Domain events consumed by the recommendation-tracking context.

use serde::{Deserialize, Serialize};
use showtrack_core::error::DomainError;
use showtrack_core::event::DomainEvent;

/// Reviews scoring at least this much count as the user having watched
/// the series.
pub const HIGH_RATING_THRESHOLD: i32 = 8;

/// Highest score on the review scale.
pub const MAX_SCORE: i32 = 10;

/// Emitted when a user finishes (or makes progress on) an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeWatched {
    /// The watched episode.
    pub episode_id: i64,
    /// The viewer.
    pub user_id: i64,
    /// The series the episode belongs to.
    pub series_id: i64,
    /// `false` for an in-progress view.
    pub is_completed: bool,
}

impl EpisodeWatched {
    /// Checks that every identifier is positive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_positive("episodeId", self.episode_id)?;
        require_positive("userId", self.user_id)?;
        require_positive("seriesId", self.series_id)
    }
}

impl DomainEvent for EpisodeWatched {
    fn event_type(&self) -> &'static str {
        "recommendations.episode_watched"
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(self).expect("EpisodeWatched serialization is infallible")
    }
}

/// Emitted when a user rates a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreated {
    /// The new rating.
    pub rating_id: i64,
    /// The reviewer.
    pub user_id: i64,
    /// The rated series.
    pub series_id: i64,
    /// Score on a 0–10 scale.
    pub score: i32,
}

impl ReviewCreated {
    /// Whether the score reaches [`HIGH_RATING_THRESHOLD`] (inclusive).
    #[must_use]
    pub fn is_high_rating(&self) -> bool {
        self.score >= HIGH_RATING_THRESHOLD
    }

    /// Checks identifiers and the score range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_positive("ratingId", self.rating_id)?;
        require_positive("userId", self.user_id)?;
        require_positive("seriesId", self.series_id)?;
        if !(0..=MAX_SCORE).contains(&self.score) {
            return Err(DomainError::Validation(format!(
                "score must be between 0 and {MAX_SCORE}, got {}",
                self.score
            )));
        }
        Ok(())
    }
}

impl DomainEvent for ReviewCreated {
    fn event_type(&self) -> &'static str {
        "recommendations.review_created"
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(self).expect("ReviewCreated serialization is infallible")
    }
}

fn require_positive(field: &str, value: i64) -> Result<(), DomainError> {
    if value > 0 {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{field} must be positive, got {value}"
        )))
    }
}
