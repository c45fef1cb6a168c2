//! Multilingual FAQ service.
//!
//! FAQs are written in English, translated into every enabled language when
//! they are added or updated, and served per language through a read-through
//! cache that is flushed on every write.

pub mod api;
pub mod cache;
pub mod config;
pub mod faq;
pub mod i18n;
pub mod metrics;
pub mod service;
pub mod store;
pub mod translation;
pub mod workflow;

use anyhow::{Context, Result};
use cache::{CacheProvider, ViewCache};
use config::Config;
use i18n::LanguageRegistry;
use metrics::FaqMetrics;
use service::FaqService;
use std::sync::Arc;
use store::{FaqStore, MemoryFaqStore, PgFaqStore};
use tracing::{info, warn};
use translation::OpenAiTranslator;
use workflow::TranslationWorkflow;

/// Wire the production collaborators described by `config` into a service.
pub async fn build_service(config: &Config) -> Result<Arc<FaqService>> {
    let registry = LanguageRegistry::with_targets(config.languages.as_slice())
        .context("Invalid FAQ_LANGUAGES")?;
    let targets: Vec<_> = registry.targets().iter().map(|l| l.code).collect();
    info!("Translation targets: {:?}", targets);

    let store: Arc<dyn FaqStore> = match &config.database_url {
        Some(url) => Arc::new(
            PgFaqStore::connect(url)
                .await
                .context("Failed to connect to database")?,
        ),
        None => {
            warn!("DATABASE_URL not set, FAQs are kept in memory only");
            Arc::new(MemoryFaqStore::new())
        }
    };

    let provider = match &config.redis_url {
        Some(url) => CacheProvider::redis(url).context("Invalid REDIS_URL")?,
        None => CacheProvider::memory(),
    };
    info!(
        "View cache: {} backend, ttl {:?}",
        provider.backend_name(),
        config.cache_ttl()
    );

    let metrics = Arc::new(FaqMetrics::new());
    let translator = Arc::new(OpenAiTranslator::new(reqwest::Client::new(), config));
    let workflow = TranslationWorkflow::new(translator, &registry, metrics.clone());

    Ok(Arc::new(FaqService::new(
        store,
        ViewCache::new(provider, config.cache_ttl()),
        workflow,
        metrics,
        registry,
    )))
}
