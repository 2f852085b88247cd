pub mod coach_summary;
pub mod config;
pub mod decision;
pub mod error;
pub mod insight;
pub mod insight_rules;
pub mod payload;
pub mod performance;
pub mod ranking;
pub mod reliability;
pub mod report;
pub mod snapshot;
pub mod tactics;
pub mod trends;
