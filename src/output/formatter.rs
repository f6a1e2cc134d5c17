//! Output formatters: console, JSON, and CSV tabular export

use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::{RankingOutcome, Status};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

/// Column contract of the tabular export, in order. The entity bundle is
/// display-only and not part of the table.
pub const EXPORT_COLUMNS: [&str; 6] = [
    "Candidate Name",
    "Match Score",
    "CGPA",
    "Skills",
    "Experience",
    "Status",
];

pub trait OutputFormatter {
    fn format(&self, outcome: &RankingOutcome) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct CsvFormatter;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn status_label(&self, status: Status) -> String {
        let label = status.to_string();
        if !self.use_colors {
            return label;
        }
        match status {
            Status::Shortlisted => label.green().bold().to_string(),
            Status::Review => label.yellow().to_string(),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &RankingOutcome) -> Result<String> {
        let mut out = String::new();

        out.push_str("Screening Results\n");
        out.push_str("=================\n\n");

        if outcome.records.is_empty() {
            out.push_str("No resumes were scored.\n");
        }

        for (rank, record) in outcome.records.iter().enumerate() {
            out.push_str(&format!(
                "{:>2}. {}  [{:.2}/10]  {}\n",
                rank + 1,
                record.file_name,
                record.score,
                self.status_label(record.status),
            ));
            out.push_str(&format!("    CGPA: {}\n", record.cgpa_display()));
            out.push_str(&format!("    Skills: {}\n", record.skills_display()));
            out.push_str(&format!("    Experience: {}\n", record.experience_display()));

            let entity_lines: Vec<String> = record
                .entities
                .iter()
                .filter(|(_, values)| !values.is_empty())
                .map(|(kind, values)| {
                    format!(
                        "    {}: {}",
                        kind,
                        values.iter().cloned().collect::<Vec<_>>().join(", ")
                    )
                })
                .collect();
            for line in entity_lines {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }

        if !outcome.warnings.is_empty() {
            out.push_str("Warnings\n");
            out.push_str("--------\n");
            for warning in &outcome.warnings {
                out.push_str(&format!("  {}: {}\n", warning.file_name, warning.reason));
            }
            out.push('\n');
        }

        let shortlisted = outcome
            .records
            .iter()
            .filter(|r| r.status == Status::Shortlisted)
            .count();
        out.push_str(&format!(
            "{} scored, {} shortlisted, {} skipped\n",
            outcome.records.len(),
            shortlisted,
            outcome.warnings.len()
        ));

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: &'a RankingOutcome,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &RankingOutcome) -> Result<String> {
        let report = JsonReport {
            generated_at: Utc::now(),
            outcome,
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for CsvFormatter {
    fn format(&self, outcome: &RankingOutcome) -> Result<String> {
        let mut out = String::new();
        out.push_str(&EXPORT_COLUMNS.join(","));
        out.push('\n');

        for record in &outcome.records {
            let row = [
                record.file_name.clone(),
                format!("{:.2}", record.score),
                record.cgpa_display(),
                record.skills_display(),
                record.experience_display().to_string(),
                record.status.to_string(),
            ];
            let escaped: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
            out.push_str(&escaped.join(","));
            out.push('\n');
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Pick the formatter for a configured output format.
pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ResultRecord;
    use std::collections::BTreeMap;

    fn outcome() -> RankingOutcome {
        RankingOutcome {
            records: vec![ResultRecord {
                file_name: "jane.pdf".to_string(),
                score: 8.25,
                cgpa: Some(8.5),
                skills: Some(vec!["python".to_string(), "sql".to_string()]),
                has_internship: true,
                status: Status::Shortlisted,
                entities: BTreeMap::new(),
            }],
            warnings: vec![],
        }
    }

    #[test]
    fn test_csv_header_is_exact() {
        let csv = CsvFormatter.format(&outcome()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "Candidate Name,Match Score,CGPA,Skills,Experience,Status");
    }

    #[test]
    fn test_csv_row_contents() {
        let csv = CsvFormatter.format(&outcome()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "jane.pdf,8.25,8.5,\"python, sql\",1+ Internship,shortlisted");
    }

    #[test]
    fn test_csv_not_found_markers() {
        let mut outcome = outcome();
        outcome.records[0].cgpa = None;
        outcome.records[0].skills = None;
        let csv = CsvFormatter.format(&outcome).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("Not found,Not found"));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_console_output_mentions_records_and_summary() {
        let text = ConsoleFormatter::new(false).format(&outcome()).unwrap();
        assert!(text.contains("jane.pdf"));
        assert!(text.contains("8.25"));
        assert!(text.contains("shortlisted"));
        assert!(text.contains("1 scored, 1 shortlisted, 0 skipped"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let json = JsonFormatter::new(false).format(&outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"][0]["file_name"], "jane.pdf");
        assert_eq!(value["records"][0]["status"], "shortlisted");
        assert!(value["generated_at"].is_string());
    }
}
