//! FAQ Service: the read path and write path over injected collaborators.
//!
//! Reads go through the view cache; writes translate, persist, then flush
//! every cached language before returning. A read that started before a
//! flush may still store a view built from older records; that window is
//! accepted.

use crate::cache::ViewCache;
use crate::faq::{self, FaqView};
use crate::i18n::LanguageRegistry;
use crate::metrics::FaqMetrics;
use crate::store::{FaqStore, StoreError};
use crate::translation::TranslationError;
use crate::workflow::TranslationWorkflow;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum FaqError {
    #[error("{0}")]
    Validation(String),

    #[error("FAQ not found: {0}")]
    NotFound(String),

    #[error("FAQ already exists: {0}")]
    Conflict(String),

    #[error("translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("record store failed: {0}")]
    Store(StoreError),
}

impl From<StoreError> for FaqError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(question) => FaqError::Conflict(question),
            other => FaqError::Store(other),
        }
    }
}

pub type FaqResult<T> = Result<T, FaqError>;

/// Body of an add request. Fields are optional so that a missing field is a
/// validation error rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Body of an update request.
#[derive(Debug, Default, Deserialize)]
pub struct FaqUpdate {
    pub answer: Option<String>,
}

pub struct FaqService {
    store: Arc<dyn FaqStore>,
    cache: ViewCache,
    workflow: TranslationWorkflow,
    metrics: Arc<FaqMetrics>,
    registry: LanguageRegistry,
}

impl FaqService {
    pub fn new(
        store: Arc<dyn FaqStore>,
        cache: ViewCache,
        workflow: TranslationWorkflow,
        metrics: Arc<FaqMetrics>,
        registry: LanguageRegistry,
    ) -> Self {
        Self {
            store,
            cache,
            workflow,
            metrics,
            registry,
        }
    }

    pub fn metrics(&self) -> &FaqMetrics {
        &self.metrics
    }

    /// Every FAQ projected for `lang`.
    ///
    /// Absent, blank, unknown and disabled codes all read the base-language
    /// view, so the cache holds at most one entry per enabled language.
    pub async fn list(&self, lang: Option<&str>) -> FaqResult<Vec<FaqView>> {
        let lang = self.normalize_lang(lang);

        if let Some(views) = self.cache.get(&lang).await {
            self.metrics.record_cache_hit();
            debug!("View cache hit for {}", lang);
            return Ok(views);
        }
        self.metrics.record_cache_miss();
        debug!("View cache miss for {}, scanning store", lang);

        let records = self.store.scan_all().await?;
        self.metrics.record_store_scan();

        let views = faq::project(&records, &lang);
        self.cache.put(&lang, &views).await;
        Ok(views)
    }

    pub async fn add(&self, request: NewFaq) -> FaqResult<()> {
        let question = required(request.question, "question")?;
        let answer = required(request.answer, "answer")?;

        let record = self.workflow.populate(&question, &answer).await?;
        self.store.insert(&record).await.map_err(|e| {
            error!("Failed to insert FAQ '{}': {}", question, e);
            e
        })?;
        self.invalidate().await;

        info!("Added FAQ '{}'", question);
        Ok(())
    }

    /// Replace the answer of `question` and re-derive every translation.
    ///
    /// The question translations are recomputed from the unchanged question
    /// text as well.
    pub async fn update(&self, question: &str, request: FaqUpdate) -> FaqResult<()> {
        let answer = request
            .answer
            .ok_or_else(|| FaqError::Validation("Invalid input data".to_string()))?;

        let record = self.workflow.populate(question, &answer).await?;
        if !self.store.update_by_key(question, &record).await? {
            return Err(FaqError::NotFound(question.to_string()));
        }
        self.invalidate().await;

        info!("Updated FAQ '{}'", question);
        Ok(())
    }

    pub async fn delete(&self, question: &str) -> FaqResult<()> {
        if !self.store.delete_by_key(question).await? {
            return Err(FaqError::NotFound(question.to_string()));
        }
        self.invalidate().await;

        info!("Deleted FAQ '{}'", question);
        Ok(())
    }

    async fn invalidate(&self) {
        self.cache.invalidate_all().await;
        self.metrics.record_invalidation();
    }

    fn normalize_lang(&self, lang: Option<&str>) -> String {
        let lang = lang.map(|l| l.trim().to_lowercase()).unwrap_or_default();
        if self.registry.is_enabled(&lang) {
            lang
        } else {
            self.registry.canonical().code.to_string()
        }
    }
}

fn required(value: Option<String>, field: &str) -> FaqResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FaqError::Validation(format!(
            "Invalid input data: '{}' is required",
            field
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheProvider, MemoryCacheStore, DEFAULT_VIEW_TTL};
    use crate::faq::FaqRecord;
    use crate::i18n::{Language, LanguageRegistry};
    use crate::store::MemoryFaqStore;
    use crate::translation::Translator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Deterministic translator: `<text> [<code>]`. Can be switched to fail.
    #[derive(Default)]
    struct FakeTranslator {
        failing: AtomicBool,
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            target: Language,
        ) -> Result<String, TranslationError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(TranslationError::EmptyResponse);
            }
            Ok(format!("{} [{}]", text, target.code()))
        }
    }

    struct Harness {
        service: FaqService,
        store: MemoryFaqStore,
        cache: MemoryCacheStore,
        translator: Arc<FakeTranslator>,
    }

    fn harness() -> Harness {
        let store = MemoryFaqStore::new();
        let cache = MemoryCacheStore::new();
        let translator = Arc::new(FakeTranslator::default());
        let metrics = Arc::new(FaqMetrics::new());
        let registry = LanguageRegistry::default();

        let workflow = TranslationWorkflow::new(translator.clone(), &registry, metrics.clone());
        let service = FaqService::new(
            Arc::new(store.clone()),
            ViewCache::new(CacheProvider::Memory(cache.clone()), DEFAULT_VIEW_TTL),
            workflow,
            metrics,
            registry,
        );

        Harness {
            service,
            store,
            cache,
            translator,
        }
    }

    fn new_faq(question: &str, answer: &str) -> NewFaq {
        NewFaq {
            question: Some(question.to_string()),
            answer: Some(answer.to_string()),
        }
    }

    // ==================== Read Path ====================

    #[tokio::test]
    async fn test_round_trip_hindi() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        let views = h.service.list(Some("hi")).await.unwrap();
        assert_eq!(
            views,
            vec![FaqView {
                question: "Q1 [hi]".to_string(),
                answer: "A1 [hi]".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_default_language_is_base() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        let views = h.service.list(None).await.unwrap();
        assert_eq!(views[0].question, "Q1");
        assert_eq!(views[0].answer, "A1");
        assert_eq!(h.service.list(Some("  ")).await.unwrap(), views);
        assert!(h.cache.get("faqs_en").is_some());
    }

    #[tokio::test]
    async fn test_lang_is_normalized() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        let views = h.service.list(Some(" BN ")).await.unwrap();
        assert_eq!(views[0].answer, "A1 [bn]");
        assert!(h.cache.get("faqs_bn").is_some());
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back_to_base() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        let views = h.service.list(Some("fr")).await.unwrap();
        assert_eq!(views[0].question, "Q1");
        assert_eq!(views[0].answer, "A1");
        assert!(h.cache.get("faqs_fr").is_none());
        assert!(h.cache.get("faqs_en").is_some());
    }

    #[tokio::test]
    async fn test_unknown_languages_share_the_base_entry() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        for i in 0..500 {
            let views = h.service.list(Some(&format!("x{}", i))).await.unwrap();
            assert_eq!(views[0].answer, "A1");
        }

        assert_eq!(h.cache.len(), 1);
        let report = h.service.metrics().report();
        assert_eq!(report.store_scans, 1);
        assert_eq!(report.cache_hits, 499);
    }

    #[tokio::test]
    async fn test_repeated_reads_hit_cache() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();

        let first = h.service.list(Some("hi")).await.unwrap();
        let second = h.service.list(Some("hi")).await.unwrap();
        let third = h.service.list(Some("hi")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        let report = h.service.metrics().report();
        assert_eq!(report.store_scans, 1);
        assert_eq!(report.cache_hits, 2);
        assert_eq!(report.cache_misses, 1);
    }

    #[tokio::test]
    async fn test_cached_view_served_until_invalidated() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        h.service.list(Some("en")).await.unwrap();

        // Bypass the service: the cache does not notice direct store writes.
        h.store.insert(&FaqRecord::new("Q2", "A2")).await.unwrap();
        assert_eq!(h.service.list(Some("en")).await.unwrap().len(), 1);
    }

    // ==================== Invalidation ====================

    #[tokio::test]
    async fn test_every_write_forces_miss_for_every_language() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        for lang in ["en", "hi", "bn"] {
            h.service.list(Some(lang)).await.unwrap();
        }
        assert_eq!(h.cache.len(), 3);

        h.service
            .update("Q1", FaqUpdate { answer: Some("A2".to_string()) })
            .await
            .unwrap();
        assert!(h.cache.is_empty());

        let scans_before = h.service.metrics().report().store_scans;
        for lang in ["en", "hi", "bn"] {
            h.service.list(Some(lang)).await.unwrap();
        }
        assert_eq!(h.service.metrics().report().store_scans, scans_before + 3);
    }

    #[tokio::test]
    async fn test_add_forces_miss_for_every_language() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        for lang in ["en", "hi", "bn"] {
            h.service.list(Some(lang)).await.unwrap();
        }
        assert_eq!(h.cache.len(), 3);

        h.service.add(new_faq("Q2", "A2")).await.unwrap();
        assert!(h.cache.is_empty());

        let scans_before = h.service.metrics().report().store_scans;
        for lang in ["en", "hi", "bn"] {
            let views = h.service.list(Some(lang)).await.unwrap();
            assert_eq!(views.len(), 2);
        }
        assert_eq!(h.service.metrics().report().store_scans, scans_before + 3);
    }

    #[tokio::test]
    async fn test_update_rederives_translations() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        h.service.list(Some("hi")).await.unwrap();

        h.service
            .update("Q1", FaqUpdate { answer: Some("A2".to_string()) })
            .await
            .unwrap();

        let views = h.service.list(Some("hi")).await.unwrap();
        assert_eq!(views[0].question, "Q1 [hi]");
        assert_eq!(views[0].answer, "A2 [hi]");
    }

    #[tokio::test]
    async fn test_delete_then_read() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        h.service.add(new_faq("Q2", "A2")).await.unwrap();
        h.service.list(Some("bn")).await.unwrap();

        h.service.delete("Q1").await.unwrap();

        for lang in ["en", "hi", "bn"] {
            let views = h.service.list(Some(lang)).await.unwrap();
            assert_eq!(views.len(), 1);
            assert!(views[0].question.starts_with("Q2"));
        }
    }

    // ==================== Failure Paths ====================

    #[tokio::test]
    async fn test_add_missing_answer_is_validation_error() {
        let h = harness();
        h.service.list(Some("en")).await.unwrap();

        let err = h
            .service
            .add(NewFaq {
                question: Some("Q".to_string()),
                answer: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FaqError::Validation(_)));
        assert!(h.store.is_empty());
        assert!(h.cache.get("faqs_en").is_some());
        assert_eq!(h.service.metrics().report().invalidations, 0);
    }

    #[tokio::test]
    async fn test_add_blank_question_is_validation_error() {
        let h = harness();
        let err = h.service.add(new_faq("   ", "A")).await.unwrap_err();
        assert!(matches!(err, FaqError::Validation(msg) if msg.contains("question")));
    }

    #[tokio::test]
    async fn test_add_duplicate_is_conflict_without_invalidation() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        h.service.list(Some("en")).await.unwrap();

        let err = h.service.add(new_faq("Q1", "other")).await.unwrap_err();
        assert!(matches!(err, FaqError::Conflict(q) if q == "Q1"));
        assert!(h.cache.get("faqs_en").is_some());
    }

    #[tokio::test]
    async fn test_translation_failure_persists_nothing() {
        let h = harness();
        h.service.list(Some("en")).await.unwrap();
        h.translator.failing.store(true, Ordering::SeqCst);

        let err = h.service.add(new_faq("Q1", "A1")).await.unwrap_err();
        assert!(matches!(err, FaqError::Translation(_)));
        assert!(h.store.is_empty());
        assert!(h.cache.get("faqs_en").is_some());
    }

    #[tokio::test]
    async fn test_update_translation_failure_keeps_old_record() {
        let h = harness();
        h.service.add(new_faq("Q1", "A1")).await.unwrap();
        h.translator.failing.store(true, Ordering::SeqCst);

        let err = h
            .service
            .update("Q1", FaqUpdate { answer: Some("A2".to_string()) })
            .await
            .unwrap_err();
        assert!(matches!(err, FaqError::Translation(_)));

        let records = h.store.scan_all().await.unwrap();
        assert_eq!(records[0].answer, "A1");
    }

    #[tokio::test]
    async fn test_update_not_found_has_no_invalidation() {
        let h = harness();
        h.service.list(Some("hi")).await.unwrap();

        let err = h
            .service
            .update("unknown", FaqUpdate { answer: Some("A".to_string()) })
            .await
            .unwrap_err();

        assert!(matches!(err, FaqError::NotFound(q) if q == "unknown"));
        assert!(h.cache.get("faqs_hi").is_some());
        assert_eq!(h.service.metrics().report().invalidations, 0);
    }

    #[tokio::test]
    async fn test_update_missing_answer() {
        let h = harness();
        let err = h.service.update("Q1", FaqUpdate::default()).await.unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_not_found_has_no_invalidation() {
        let h = harness();
        h.service.list(Some("en")).await.unwrap();

        let err = h.service.delete("missing").await.unwrap_err();
        assert!(matches!(err, FaqError::NotFound(_)));
        assert!(h.cache.get("faqs_en").is_some());
    }

    #[test]
    fn test_store_duplicate_maps_to_conflict() {
        let err: FaqError = StoreError::Duplicate("Q".to_string()).into();
        assert!(matches!(err, FaqError::Conflict(_)));

        let err: FaqError = StoreError::Corrupt("bad".to_string()).into();
        assert!(matches!(err, FaqError::Store(_)));
    }
}
