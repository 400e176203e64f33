//! Error types for gigboard-core
//!
//! Provides a thiserror hierarchy plus a load summary for graceful degradation.

use std::path::PathBuf;
use thiserror::Error;

use crate::progress::InvalidRange;

/// Core error type for gigboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse { path: PathBuf, message: String },

    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid front matter in {path}: {message}")]
    FrontMatterParse { path: PathBuf, message: String },

    // ===================
    // Template Errors
    // ===================
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Missing template variable '{variable}' in template '{template}'")]
    MissingVariable { template: String, variable: String },

    // ===================
    // Store Errors
    // ===================
    #[error("Project not found: {id}")]
    ProjectNotFound { id: u32 },

    // ===================
    // Progress Errors
    // ===================
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),
}

/// Non-fatal warning collected while loading data
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub source: String,
    pub message: String,
}

impl LoadWarning {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Summary of a data load
///
/// A bad config or template file degrades gracefully: the problem is
/// recorded here and startup continues with defaults.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub warnings: Vec<LoadWarning>,
    pub config_loaded: bool,
    pub projects_seeded: usize,
    pub builtin_templates: usize,
    pub custom_templates: usize,
}

impl LoadSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(LoadWarning::new(source, message));
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn templates_loaded(&self) -> usize {
        self.builtin_templates + self.custom_templates
    }

    /// Merge another summary into this one
    pub fn merge(&mut self, other: LoadSummary) {
        self.warnings.extend(other.warnings);
        self.config_loaded = self.config_loaded || other.config_loaded;
        self.projects_seeded += other.projects_seeded;
        self.builtin_templates += other.builtin_templates;
        self.custom_templates += other.custom_templates;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_summary_warning_collection() {
        let mut summary = LoadSummary::new();
        assert!(!summary.has_warnings());

        summary.add_warning("config", "file not found");
        summary.add_warning("templates", "bad front matter");

        assert!(summary.has_warnings());
        assert_eq!(summary.warnings.len(), 2);
        assert_eq!(summary.warnings[0].source, "config");
    }

    #[test]
    fn test_load_summary_merge() {
        let mut first = LoadSummary::new();
        first.config_loaded = true;
        first.projects_seeded = 4;
        first.builtin_templates = 5;

        let mut second = LoadSummary::new();
        second.custom_templates = 2;
        second.add_warning("templates", "skipped one file");

        first.merge(second);

        assert!(first.config_loaded);
        assert_eq!(first.projects_seeded, 4);
        assert_eq!(first.templates_loaded(), 7);
        assert_eq!(first.warnings.len(), 1);
    }

    #[test]
    fn test_core_error_display_contains_context() {
        let err = CoreError::MissingVariable {
            template: "project_kickoff".to_string(),
            variable: "due_date".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("due_date"));
        assert!(text.contains("project_kickoff"));
    }
}
