//! Input manager: routes files to the right extractor and caches results

use crate::analysis::interview::InterviewAnswer;
use crate::error::{Result, ScoringError};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::input::FileType;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    disable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.disable_cache = !enable;
        self
    }

    /// Extract scoring text from a `.txt`, `.md` or `.pdf` file.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if !self.disable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ScoringError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Rendering markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(ScoringError::UnsupportedFormat(format!(
                    "Expected a .txt, .md or .pdf file: {}",
                    path.display()
                )));
            }
        };

        if !self.disable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Load interview answers from a JSON array of answer objects.
    pub async fn load_answers(&self, path: &Path) -> Result<Vec<InterviewAnswer>> {
        if FileType::from_path(path) != FileType::Json {
            return Err(ScoringError::UnsupportedFormat(format!(
                "Interview answers must be a .json file: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let answers: Vec<InterviewAnswer> = serde_json::from_str(&content).map_err(|e| {
            ScoringError::InvalidInput(format!("Invalid answers file '{}': {}", path.display(), e))
        })?;

        info!("Loaded {} interview answers from {}", answers.len(), path.display());
        Ok(answers)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
