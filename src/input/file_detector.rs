//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Detect the file type from a file name, by extension.
    pub fn from_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_from_name() {
        assert_eq!(FileType::from_name("resume.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_name("resume.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_name("notes.txt"), FileType::Text);
        assert_eq!(FileType::from_name("cv.markdown"), FileType::Markdown);
        assert_eq!(FileType::from_name("scan.docx"), FileType::Unknown);
        assert_eq!(FileType::from_name("no_extension"), FileType::Unknown);
    }
}
