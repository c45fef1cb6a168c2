//! Language registry: the set of languages FAQs are authored and translated in.
//!
//! The registry is built once at startup (from configuration) and then shared
//! read-only with the translation workflow. It knows a fixed catalogue of
//! languages; configuration only chooses which of them are enabled as
//! translation targets.

use anyhow::{bail, Result};

/// Configuration for a known language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "hi", "bn")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Hindi")
    pub name: &'static str,

    /// Whether this is the canonical/base language (only one should be true)
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Registry of known languages and which ones are enabled.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

impl LanguageRegistry {
    /// Build a registry with the canonical language plus the given target codes enabled.
    ///
    /// # Errors
    /// Fails if a code is not in the catalogue.
    pub fn with_targets<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let mut languages = catalogue();

        for code in codes {
            let code = code.as_ref().trim().to_lowercase();
            if code.is_empty() {
                continue;
            }
            match languages.iter_mut().find(|lang| lang.code == code) {
                Some(lang) => lang.enabled = true,
                None => bail!("Unknown language code: '{}'", code),
            }
        }

        Ok(Self { languages })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Enabled languages that FAQs are translated into (canonical excluded).
    pub fn targets(&self) -> Vec<&LanguageConfig> {
        self.languages
            .iter()
            .filter(|lang| lang.enabled && !lang.is_canonical)
            .collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the catalogue does not define exactly one canonical language.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is known and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

impl Default for LanguageRegistry {
    /// English base with Hindi and Bengali targets.
    fn default() -> Self {
        let mut languages = catalogue();
        for lang in languages.iter_mut() {
            if matches!(lang.code, "hi" | "bn") {
                lang.enabled = true;
            }
        }
        Self { languages }
    }
}

/// Every language the service knows how to name.
///
/// Only the canonical language starts enabled.
fn catalogue() -> Vec<LanguageConfig> {
    let entry = |code, name| LanguageConfig {
        code,
        name,
        is_canonical: false,
        enabled: false,
    };

    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            is_canonical: true,
            enabled: true,
        },
        entry("hi", "Hindi"),
        entry("bn", "Bengali"),
        entry("ta", "Tamil"),
        entry("te", "Telugu"),
        entry("mr", "Marathi"),
        entry("gu", "Gujarati"),
        entry("ur", "Urdu"),
        entry("es", "Spanish"),
        entry("fr", "French"),
        entry("de", "German"),
    ]
}
