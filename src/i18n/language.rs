//! Language type: a validated translation target.

use crate::i18n::LanguageConfig;

/// A validated language.
///
/// Only constructible from a registry entry, so a `Language` always names a
/// language the service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "hi")
    code: &'static str,

    /// English name, used in translation prompts
    name: &'static str,

    is_canonical: bool,
}

impl Language {
    /// The base language every FAQ is authored in.
    pub const ENGLISH: Language = Language {
        code: "en",
        name: "English",
        is_canonical: true,
    };

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `true` if this is the base language, `false` if it's a translation target.
    pub fn is_canonical(&self) -> bool {
        self.is_canonical
    }
}

impl From<&LanguageConfig> for Language {
    fn from(config: &LanguageConfig) -> Self {
        Language {
            code: config.code,
            name: config.name,
            is_canonical: config.is_canonical,
        }
    }
}
