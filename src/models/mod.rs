// src/models/mod.rs

//! Domain models for the crawler application.

mod config;
mod detail;
mod listing;
mod record;

// Re-export all public types
pub use config::{Config, CrawlerConfig, DetailConfig, GamePageConfig, ListingConfig};
pub use detail::{FieldNode, Poll, PollBucket, PollOption, RawDetailItem};
pub use listing::ListingEntry;
pub use record::{GameRecord, LinkRef, NO_CHINESE_NAME, PollResult, PollValue};
