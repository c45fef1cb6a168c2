//! Record Store: durable FAQ records keyed by question text.
//!
//! The service only depends on the `FaqStore` trait. Two adapters ship with
//! the crate: `PgFaqStore` for PostgreSQL and `MemoryFaqStore` for tests and
//! database-less local runs.

mod memory;
mod postgres;

pub use memory::MemoryFaqStore;
pub use postgres::PgFaqStore;

use crate::faq::FaqRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("FAQ with question '{0}' already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for FAQ records.
///
/// Every operation is atomic for a single key; nothing here coordinates
/// across keys.
#[async_trait]
pub trait FaqStore: Send + Sync {
    /// Persist a new record. Fails with `StoreError::Duplicate` if the
    /// question is already present.
    async fn insert(&self, record: &FaqRecord) -> StoreResult<()>;

    /// Replace the answer and every derived field of the record whose
    /// question equals `question`. Returns `false` when nothing matched.
    async fn update_by_key(&self, question: &str, record: &FaqRecord) -> StoreResult<bool>;

    /// Remove the record whose question equals `question`. Returns `false`
    /// when nothing matched.
    async fn delete_by_key(&self, question: &str) -> StoreResult<bool>;

    /// All records, in insertion order.
    async fn scan_all(&self) -> StoreResult<Vec<FaqRecord>>;
}
