//! Skill extraction via fuzzy containment against a fixed vocabulary

use crate::error::{Result, ResumeRankerError};
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// Capability interface for fuzzy partial-match scoring on a 0-100 scale.
///
/// The score measures how well the needle aligns with its best-matching
/// region of the haystack, tolerant of minor edit differences.
pub trait FuzzyScorer: Send + Sync {
    fn partial_score(&self, needle: &str, haystack: &str) -> f64;
}

/// Default scorer: best token-window alignment measured with normalized
/// Levenshtein similarity.
pub struct LevenshteinScorer;

impl FuzzyScorer for LevenshteinScorer {
    fn partial_score(&self, needle: &str, haystack: &str) -> f64 {
        let needle = needle.to_lowercase();
        let needle_len = needle.split_whitespace().count();
        if needle_len == 0 {
            return 0.0;
        }

        let tokens: Vec<String> = haystack
            .split_whitespace()
            .map(clean_token)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return 0.0;
        }

        if tokens.len() <= needle_len {
            let window = tokens.join(" ");
            return strsim::normalized_levenshtein(&needle, &window) * 100.0;
        }

        let mut best: f64 = 0.0;
        for window in tokens.windows(needle_len) {
            let candidate = window.join(" ");
            let score = strsim::normalized_levenshtein(&needle, &candidate) * 100.0;
            if score > best {
                best = score;
            }
        }
        best
    }
}

/// Strip adjacent punctuation but keep characters that are part of skill
/// names like "c++" and "c#", lowercasing along the way.
fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#' || *c == '.')
        .collect::<String>()
        .trim_matches('.')
        .to_lowercase()
}

/// Matches a fixed, read-only skill vocabulary against arbitrary text.
///
/// Exact containment is checked first with an Aho-Corasick automaton; labels
/// that miss fall back to fuzzy partial matching.
pub struct SkillMatcher {
    vocabulary: Vec<String>,
    exact_matcher: AhoCorasick,
    fuzzy_threshold: f64,
    scorer: Box<dyn FuzzyScorer>,
}

impl SkillMatcher {
    pub fn new(fuzzy_threshold: f64) -> Result<Self> {
        Self::with_extra_skills(&[], fuzzy_threshold)
    }

    pub fn with_extra_skills(extra: &[String], fuzzy_threshold: f64) -> Result<Self> {
        let mut vocabulary = Self::default_vocabulary();
        vocabulary.extend(extra.iter().map(|s| s.trim().to_lowercase()));
        vocabulary.retain(|s| !s.is_empty());
        vocabulary.sort();
        vocabulary.dedup();

        let exact_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&vocabulary)
            .map_err(|e| {
                ResumeRankerError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            vocabulary,
            exact_matcher,
            fuzzy_threshold,
            scorer: Box::new(LevenshteinScorer),
        })
    }

    pub fn with_scorer(mut self, scorer: Box<dyn FuzzyScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// The canonical skill labels, lowercase.
    pub fn default_vocabulary() -> Vec<String> {
        vec![
            "python",
            "machine learning",
            "sql",
            "data science",
            "pandas",
            "tensorflow",
            "keras",
            "numpy",
            "scikit-learn",
            "deep learning",
            "java",
            "c++",
            "excel",
            "power bi",
            "tableau",
            "nlp",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Extract the set of canonical skills present in the text.
    ///
    /// Returns `None` when nothing matched, so callers can render an explicit
    /// "Not found" marker instead of an empty list.
    pub fn extract_skills(&self, text: &str) -> Option<Vec<String>> {
        let mut found: HashSet<&str> = HashSet::new();

        // Exact pass: whole-word containment anywhere in the text.
        for mat in self.exact_matcher.find_overlapping_iter(text) {
            if is_word_bounded(text, mat.start(), mat.end()) {
                found.insert(self.vocabulary[mat.pattern().as_usize()].as_str());
            }
        }

        // Fuzzy pass for labels the exact scan missed.
        for label in &self.vocabulary {
            if found.contains(label.as_str()) {
                continue;
            }
            if self.scorer.partial_score(label, text) >= self.fuzzy_threshold {
                found.insert(label.as_str());
            }
        }

        if found.is_empty() {
            return None;
        }

        let mut skills: Vec<String> = found.into_iter().map(String::from).collect();
        skills.sort();
        Some(skills)
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Fraction of required skills covered by the candidate, in [0, 1].
///
/// Comparison is case-insensitive; an empty set on either side yields 0.
pub fn overlap_fraction(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    if candidate_skills.is_empty() || required_skills.is_empty() {
        return 0.0;
    }

    let candidate: HashSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let required: HashSet<String> = required_skills.iter().map(|s| s.to_lowercase()).collect();

    let overlap = required.intersection(&candidate).count();
    overlap as f64 / required.len() as f64
}

/// A match counts as whole-word when neither neighbor is alphanumeric.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
