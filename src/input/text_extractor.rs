//! Plain-text extraction for resumes and job descriptions

use crate::error::{Result, ScoringError};
use pulldown_cmark::{Event, Parser, Tag};
use std::future::Future;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ScoringError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Render markdown to plain text, one block per line. Emphasis, links and
/// other inline markup are dropped; their text is kept.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_) | Tag::TableRow) => {
                text.push('\n')
            }
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n## Experience\n\n- **Led** a team of 6\n- Built [Kafka](https://kafka.apache.org) pipelines\n\nReduced `p99` latency\nby 40%.";
        let text = markdown_to_text(markdown);

        assert_eq!(
            text,
            "Jane Doe\nExperience\nLed a team of 6\nBuilt Kafka pipelines\nReduced p99 latency by 40%."
        );
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Senior engineer with 8 years of experience").unwrap();

        let text = PlainTextExtractor.extract(file.path()).await.unwrap();
        assert!(text.starts_with("Senior engineer"));
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_an_extraction_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not a pdf").unwrap();

        let err = PdfExtractor.extract(file.path()).await.unwrap_err();
        assert!(matches!(err, ScoringError::PdfExtraction(_)));
    }
}
