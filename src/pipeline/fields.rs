//! Rule-based field extraction: qualification score and experience flag

use regex::{Captures, Regex};

type QualificationParser = fn(&Captures<'_>) -> Option<f64>;

/// Extracts scalar fields from resume text with ordered regex rules.
///
/// Patterns are evaluated in order and the first satisfied rule wins, so new
/// recognizers can be appended without touching control flow.
pub struct FieldExtractor {
    qualification_rules: Vec<(Regex, QualificationParser)>,
    internship_pattern: Regex,
}

fn parse_first_capture(caps: &Captures<'_>) -> Option<f64> {
    caps.get(1)?.as_str().parse().ok()
}

impl FieldExtractor {
    pub fn new() -> Self {
        let qualification_rules: Vec<(Regex, QualificationParser)> = vec![
            // "CGPA: 8.5" / "GPA 3.75"
            (
                Regex::new(r"(?i)(?:CGPA|GPA)[\s:]*([0-9]\.\d{1,2})").unwrap(),
                parse_first_capture,
            ),
            // "8.5 / 10"
            (
                Regex::new(r"([0-9]\.\d{1,2})\s*/\s*10").unwrap(),
                parse_first_capture,
            ),
        ];

        Self {
            qualification_rules,
            internship_pattern: Regex::new(r"(?i)\bintern(ship)?\b").unwrap(),
        }
    }

    /// Qualification (CGPA/GPA) value, or `None` when no rule matches.
    pub fn extract_qualification(&self, text: &str) -> Option<f64> {
        for (pattern, parse) in &self.qualification_rules {
            if let Some(caps) = pattern.captures(text) {
                if let Some(value) = parse(&caps) {
                    return Some(value);
                }
            }
        }
        None
    }

    /// Whether the text mentions internship-type experience. Strictly binary.
    pub fn has_internship(&self, text: &str) -> bool {
        self.internship_pattern.is_match(text)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cgpa_labeled_form() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_qualification("CGPA: 8.5"), Some(8.5));
        assert_eq!(extractor.extract_qualification("cgpa 9.12"), Some(9.12));
        assert_eq!(extractor.extract_qualification("GPA:3.7"), Some(3.7));
    }

    #[test]
    fn test_cgpa_fraction_form() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_qualification("Scored 8.2 / 10 overall"), Some(8.2));
        assert_eq!(extractor.extract_qualification("8.75/10"), Some(8.75));
    }

    #[test]
    fn test_first_rule_wins() {
        let extractor = FieldExtractor::new();
        // Both forms present; the labeled form is checked first.
        assert_eq!(
            extractor.extract_qualification("CGPA: 9.1 equivalent to 8.0 / 10"),
            Some(9.1)
        );
    }

    #[test]
    fn test_qualification_not_found() {
        let extractor = FieldExtractor::new();
        assert_eq!(extractor.extract_qualification("no grades mentioned"), None);
        // Whole percentages don't fit the decimal pattern.
        assert_eq!(extractor.extract_qualification("scored 85%"), None);
    }

    #[test]
    fn test_internship_flag() {
        let extractor = FieldExtractor::new();
        assert!(extractor.has_internship("Summer intern at a data lab"));
        assert!(extractor.has_internship("Completed an INTERNSHIP in 2024"));
        assert!(!extractor.has_internship("Experienced in international trade"));
        assert!(!extractor.has_internship("internal tooling work"));
    }
}
