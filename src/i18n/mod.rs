//! Internationalization (i18n) module.
//!
//! - `registry`: the catalogue of known languages and which are enabled
//! - `language`: validated `Language` handle passed to translators
//! - `validator`: translation quality checks
//!
//! # Example
//!
//! ```rust,ignore
//! use faq_service::i18n::{Language, LanguageRegistry};
//!
//! let registry = LanguageRegistry::with_targets(&["hi", "bn"])?;
//! let targets: Vec<Language> = registry.targets().into_iter().map(Language::from).collect();
//! ```

mod language;
mod registry;
mod validator;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
