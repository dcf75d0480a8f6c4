//! Shared test doubles for the showtrack recommendation worker.

mod clock;
mod logs;
mod repository;
mod sleeper;
mod watching_status;

pub use clock::FixedClock;
pub use logs::{CapturedLogs, CapturedWriter};
pub use repository::{FailingRecommendationLogRepository, InMemoryRecommendationLogRepository};
pub use sleeper::RecordingSleeper;
pub use watching_status::{FailingWatchingStatusLookup, StaticWatchingStatusLookup};
