//! Text extraction from in-memory document bytes

use crate::error::{Result, ResumeRankerError};
use pulldown_cmark::{html, Parser};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeRankerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = String::from_utf8_lossy(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").unwrap();
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_extraction() {
        let text = PlainTextExtractor.extract(b"John Doe\nPython developer").unwrap();
        assert_eq!(text, "John Doe\nPython developer");
    }

    #[test]
    fn test_markdown_strips_formatting() {
        let md = b"# John Doe\n\n**Skills:** Python, SQL\n";
        let text = MarkdownExtractor.extract(md).unwrap();
        assert!(text.contains("John Doe"));
        assert!(text.contains("Skills: Python, SQL"));
        assert!(!text.contains("**"));
        assert!(!text.contains("#"));
    }

    #[test]
    fn test_pdf_extraction_rejects_garbage() {
        let result = PdfExtractor.extract(b"not a pdf at all");
        assert!(result.is_err());
    }
}
