//! Translation quality validation.
//!
//! FAQ answers are authored in a rich-text editor, so they may carry HTML
//! markup and links. A translation that drops a link or mangles the markup is
//! still stored (the provider's answer is authoritative) but gets logged.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that indicate translation issues
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate that a translation preserves the structural parts of the original.
    ///
    /// Checks that:
    /// - the translation is not blank when the original is not
    /// - URLs are preserved
    /// - HTML tags appear the same number of times
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !original.trim().is_empty() && translated.trim().is_empty() {
            report
                .errors
                .push("Translation is empty for non-empty input".to_string());
            return report;
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        let orig_tags = Self::extract_tags(original);
        let trans_tags = Self::extract_tags(translated);
        if orig_tags != trans_tags {
            report.warnings.push(format!(
                "HTML tag mismatch: original has {:?}, translation has {:?}",
                orig_tags, trans_tags
            ));
        }

        report
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r#"https?://[^\s)\]"'<>]+"#).unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Tag names in document order, e.g. `["p", "/p"]`.
    fn extract_tags(text: &str) -> Vec<String> {
        let regex =
            TAG_REGEX.get_or_init(|| Regex::new(r"<(/?[a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_lowercase()))
            .collect()
    }
}
