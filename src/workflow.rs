//! Translation Workflow: fills the derived-language fields of a record.

use crate::faq::FaqRecord;
use crate::i18n::{Language, LanguageRegistry};
use crate::metrics::FaqMetrics;
use crate::translation::{TranslationError, Translator};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct TranslationWorkflow {
    translator: Arc<dyn Translator>,
    targets: Vec<Language>,
    metrics: Arc<FaqMetrics>,
}

impl TranslationWorkflow {
    pub fn new(
        translator: Arc<dyn Translator>,
        registry: &LanguageRegistry,
        metrics: Arc<FaqMetrics>,
    ) -> Self {
        let targets = registry.targets().into_iter().map(Language::from).collect();
        Self {
            translator,
            targets,
            metrics,
        }
    }

    /// Build a full record from base-language text.
    ///
    /// Question and answer are translated into every target language, one
    /// provider call each, all in flight at once. If any call fails the
    /// whole record is discarded and that error returned.
    pub async fn populate(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<FaqRecord, TranslationError> {
        let jobs = self.targets.iter().map(|&lang| async move {
            let (question, answer) = futures::try_join!(
                self.translate(question, lang),
                self.translate(answer, lang)
            )?;
            Ok::<_, TranslationError>((lang, question, answer))
        });

        let translations = try_join_all(jobs).await?;

        let mut record = FaqRecord::new(question, answer);
        for (lang, question, answer) in translations {
            record.set_translation(lang.code(), question, answer);
        }
        debug!(
            "Populated {} derived fields for '{}'",
            record.derived.len(),
            record.question
        );
        Ok(record)
    }

    async fn translate(&self, text: &str, lang: Language) -> Result<String, TranslationError> {
        self.metrics.record_translation_call();
        self.translator.translate(text, lang).await.map_err(|e| {
            self.metrics.record_translation_failure();
            warn!("Translation to {} failed: {}", lang.code(), e);
            e
        })
    }
}
