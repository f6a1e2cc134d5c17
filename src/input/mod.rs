//! Document intake: file type detection and text extraction

pub mod file_detector;
pub mod text_extractor;

use crate::error::Result;
use file_detector::FileType;
use log::info;
use text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};

/// An uploaded document: raw bytes plus a display identifier. Consumed once
/// by text extraction and then discarded.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.file_name)
    }
}

/// Extract the full text of a document, routed by file type.
pub fn extract_text(document: &Document) -> Result<String> {
    let text = match document.file_type() {
        FileType::Pdf => {
            info!("Extracting text from PDF: {}", document.file_name);
            PdfExtractor.extract(&document.bytes)?
        }
        FileType::Text => {
            info!("Reading plain text document: {}", document.file_name);
            PlainTextExtractor.extract(&document.bytes)?
        }
        FileType::Markdown => {
            info!("Processing markdown document: {}", document.file_name);
            MarkdownExtractor.extract(&document.bytes)?
        }
        FileType::Unknown => {
            return Err(crate::error::ResumeRankerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                document.file_name
            )));
        }
    };

    Ok(text)
}
