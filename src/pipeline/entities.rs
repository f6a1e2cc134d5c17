//! Contact and identity entity extraction

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Person,
    Organization,
    Location,
    Email,
    Phone,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Person,
        EntityKind::Organization,
        EntityKind::Location,
        EntityKind::Email,
        EntityKind::Phone,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Person => "PERSON",
            EntityKind::Organization => "ORGANIZATION",
            EntityKind::Location => "LOCATION",
            EntityKind::Email => "EMAIL",
            EntityKind::Phone => "PHONE",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub text: String,
}

/// Capability interface for named-entity recognition, so the pipeline can be
/// exercised with canned entities in tests.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

const ORG_SUFFIXES: &[&str] = &[
    "inc",
    "llc",
    "ltd",
    "corp",
    "corporation",
    "company",
    "technologies",
    "solutions",
    "systems",
    "labs",
    "university",
    "institute",
    "college",
];

const KNOWN_LOCATIONS: &[&str] = &[
    "bangalore",
    "mumbai",
    "delhi",
    "hyderabad",
    "chennai",
    "pune",
    "london",
    "berlin",
    "paris",
    "toronto",
    "seattle",
    "boston",
    "austin",
    "new york",
    "san francisco",
    "india",
    "germany",
    "france",
    "canada",
    "usa",
];

/// Rule-based recognizer over capitalized word spans.
///
/// Organization and location decisions use suffix and context cues; person
/// spans are only accepted near the top of the document, where resumes carry
/// the candidate's name.
pub struct HeuristicRecognizer;

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            let mut span: Vec<&str> = Vec::new();
            let mut prev_word: Option<String> = None;

            for segment in line.split_word_bounds() {
                let first = match segment.chars().next() {
                    Some(c) => c,
                    None => continue,
                };

                if first.is_whitespace() {
                    continue;
                }

                if first.is_alphabetic() {
                    if first.is_uppercase() {
                        span.push(segment);
                        continue;
                    }
                    Self::close_span(&mut span, &prev_word, line_idx, &mut entities);
                    prev_word = Some(segment.to_lowercase());
                } else {
                    // Punctuation or digits break both the span and the cue.
                    Self::close_span(&mut span, &prev_word, line_idx, &mut entities);
                    prev_word = None;
                }
            }
            Self::close_span(&mut span, &prev_word, line_idx, &mut entities);
        }

        entities
    }
}

impl HeuristicRecognizer {
    fn close_span(
        span: &mut Vec<&str>,
        prev_word: &Option<String>,
        line_idx: usize,
        entities: &mut Vec<Entity>,
    ) {
        if span.is_empty() {
            return;
        }
        if let Some(kind) = Self::classify(span, prev_word.as_deref(), line_idx) {
            entities.push(Entity {
                kind,
                text: span.join(" "),
            });
        }
        span.clear();
    }

    fn classify(span: &[&str], prev_word: Option<&str>, line_idx: usize) -> Option<EntityKind> {
        let joined = span.join(" ").to_lowercase();
        let last = span.last()?.to_lowercase();

        if ORG_SUFFIXES.contains(&last.as_str()) {
            return Some(EntityKind::Organization);
        }
        if prev_word == Some("at") {
            return Some(EntityKind::Organization);
        }
        if KNOWN_LOCATIONS.contains(&joined.as_str()) || KNOWN_LOCATIONS.contains(&last.as_str()) {
            return Some(EntityKind::Location);
        }
        if prev_word == Some("in") || prev_word == Some("near") {
            return Some(EntityKind::Location);
        }
        // Candidate names sit in the first few lines of a resume.
        if line_idx < 5
            && (2..=3).contains(&span.len())
            && span.iter().all(|w| w.chars().all(|c| c.is_alphabetic()))
        {
            return Some(EntityKind::Person);
        }

        None
    }
}

/// Unions recognizer output with dedicated email/phone pattern rules into a
/// per-kind set bundle.
pub struct EntityExtractor {
    recognizer: Box<dyn EntityRecognizer>,
    email_pattern: Regex,
    phone_pattern: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::with_recognizer(Box::new(HeuristicRecognizer))
    }

    pub fn with_recognizer(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            email_pattern: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .unwrap(),
            phone_pattern: Regex::new(r"\+?[0-9][0-9\s().\-]{6,}[0-9]").unwrap(),
        }
    }

    /// Extract all tracked entity kinds. Every kind is present in the result;
    /// a kind with no hits maps to an empty set.
    pub fn extract(&self, text: &str) -> BTreeMap<EntityKind, BTreeSet<String>> {
        let mut bundle: BTreeMap<EntityKind, BTreeSet<String>> = EntityKind::ALL
            .iter()
            .map(|kind| (*kind, BTreeSet::new()))
            .collect();

        for entity in self.recognizer.recognize(text) {
            if let Some(set) = bundle.get_mut(&entity.kind) {
                set.insert(entity.text);
            }
        }

        for mat in self.email_pattern.find_iter(text) {
            bundle
                .get_mut(&EntityKind::Email)
                .expect("all kinds initialized")
                .insert(mat.as_str().to_string());
        }

        for mat in self.phone_pattern.find_iter(text) {
            let candidate = mat.as_str().trim();
            let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
            if digits >= 8 {
                bundle
                    .get_mut(&EntityKind::Phone)
                    .expect("all kinds initialized")
                    .insert(candidate.to_string());
            }
        }

        bundle
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        let extractor = EntityExtractor::new();
        let bundle = extractor.extract("Reach me at jane.doe+work@example.co.uk anytime");
        assert!(bundle[&EntityKind::Email].contains("jane.doe+work@example.co.uk"));
    }

    #[test]
    fn test_phone_pattern_with_separators() {
        let extractor = EntityExtractor::new();
        let bundle = extractor.extract("Phone: +91 98765-43210");
        assert!(!bundle[&EntityKind::Phone].is_empty());

        let bundle = extractor.extract("Call (555) 123.4567 today");
        assert!(!bundle[&EntityKind::Phone].is_empty());
    }

    #[test]
    fn test_phone_rejects_short_digit_runs() {
        let extractor = EntityExtractor::new();
        let bundle = extractor.extract("Apartment 12-345, floor 6");
        assert!(bundle[&EntityKind::Phone].is_empty());
    }

    #[test]
    fn test_person_near_top_of_document() {
        let entities = HeuristicRecognizer.recognize("Jane Doe\nData analyst resume");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Person && e.text == "Jane Doe"));
    }

    #[test]
    fn test_organization_by_suffix_and_cue() {
        let entities =
            HeuristicRecognizer.recognize("line\nline\nline\nline\nline\nWorked at Globex\nAcme Corp hired me");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Organization && e.text == "Globex"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Organization && e.text == "Acme Corp"));
    }

    #[test]
    fn test_location_by_gazetteer_and_cue() {
        let entities = HeuristicRecognizer
            .recognize("header\nheader\nheader\nheader\nheader\nBased in Pune\nRelocating to Berlin");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Location && e.text == "Pune"));
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Location && e.text == "Berlin"));
    }

    #[test]
    fn test_all_kinds_present_even_when_empty() {
        let extractor = EntityExtractor::new();
        let bundle = extractor.extract("");
        assert_eq!(bundle.len(), EntityKind::ALL.len());
        assert!(bundle.values().all(|set| set.is_empty()));
    }

    #[test]
    fn test_duplicates_are_deduplicated() {
        let extractor = EntityExtractor::new();
        let bundle = extractor.extract("a@b.co a@b.co a@b.co");
        assert_eq!(bundle[&EntityKind::Email].len(), 1);
    }
}
