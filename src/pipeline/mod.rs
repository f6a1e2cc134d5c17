//! The resume scoring pipeline: similarity scoring, skill matching, field and
//! entity extraction, and score composition into a ranked result set.

pub mod engine;
pub mod entities;
pub mod fields;
pub mod ranker;
pub mod similarity;
pub mod skills;

pub use engine::RankingEngine;
pub use ranker::{RankingOutcome, ResultRecord, SkipWarning, Status};

/// Round to two decimal places, the precision of every exposed score.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
