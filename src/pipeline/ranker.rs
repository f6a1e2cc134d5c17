//! Score composition, status classification, and result ranking

use crate::pipeline::entities::EntityKind;
use crate::pipeline::round2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const NOT_FOUND: &str = "Not found";
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Shortlisted,
    Review,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Shortlisted => write!(f, "shortlisted"),
            Status::Review => write!(f, "review"),
        }
    }
}

/// One scored candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub file_name: String,
    pub score: f64,
    pub cgpa: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub has_internship: bool,
    pub status: Status,
    pub entities: BTreeMap<EntityKind, BTreeSet<String>>,
}

impl ResultRecord {
    pub fn cgpa_display(&self) -> String {
        match self.cgpa {
            Some(value) => format!("{}", value),
            None => NOT_FOUND.to_string(),
        }
    }

    pub fn skills_display(&self) -> String {
        match &self.skills {
            Some(skills) => skills.join(", "),
            None => NOT_FOUND.to_string(),
        }
    }

    pub fn experience_display(&self) -> &'static str {
        if self.has_internship {
            "1+ Internship"
        } else {
            "No Internship"
        }
    }
}

/// A document that was skipped instead of scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipWarning {
    pub file_name: String,
    pub reason: String,
}

/// The outcome of one ranking session. Owned by the caller; nothing is kept
/// in process-wide state between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub records: Vec<ResultRecord>,
    pub warnings: Vec<SkipWarning>,
}

/// Merge the normalized similarity score with the skill-overlap bonus into
/// the final bounded score, two-decimal precision.
pub fn compose_score(normalized_score: f64, overlap_fraction: f64, bonus_max: f64) -> f64 {
    let bonus = overlap_fraction * bonus_max;
    round2((normalized_score + bonus).min(MAX_SCORE))
}

/// Classify a final score. Strictly greater-than: a score exactly at the
/// threshold stays in review.
pub fn classify(score: f64, shortlist_threshold: f64) -> Status {
    if score > shortlist_threshold {
        Status::Shortlisted
    } else {
        Status::Review
    }
}

/// Order records by final score, descending. The sort is stable, so equal
/// scores keep their upload order.
pub fn rank(records: &mut [ResultRecord]) {
    records.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
