use super::{FaqStore, StoreError, StoreResult};
use crate::faq::FaqRecord;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-process record store. Records are kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryFaqStore {
    records: Arc<Mutex<Vec<FaqRecord>>>,
}

impl MemoryFaqStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FaqRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl FaqStore for MemoryFaqStore {
    async fn insert(&self, record: &FaqRecord) -> StoreResult<()> {
        let mut records = self.lock();
        if records.iter().any(|r| r.question == record.question) {
            return Err(StoreError::Duplicate(record.question.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update_by_key(&self, question: &str, record: &FaqRecord) -> StoreResult<bool> {
        let mut records = self.lock();
        match records.iter_mut().find(|r| r.question == question) {
            Some(existing) => {
                existing.answer = record.answer.clone();
                existing.derived = record.derived.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_key(&self, question: &str) -> StoreResult<bool> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.question != question);
        Ok(records.len() < before)
    }

    async fn scan_all(&self) -> StoreResult<Vec<FaqRecord>> {
        Ok(self.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_scan_in_order() {
        let store = MemoryFaqStore::new();
        store.insert(&FaqRecord::new("Q2", "A2")).await.unwrap();
        store.insert(&FaqRecord::new("Q1", "A1")).await.unwrap();

        let records = store.scan_all().await.unwrap();
        let questions: Vec<_> = records.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["Q2", "Q1"]);
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() {
        let store = MemoryFaqStore::new();
        store.insert(&FaqRecord::new("Q1", "A1")).await.unwrap();

        let result = store.insert(&FaqRecord::new("Q1", "other")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(q)) if q == "Q1"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_answer_and_derived() {
        let store = MemoryFaqStore::new();
        let mut original = FaqRecord::new("Q1", "A1");
        original.set_translation("hi", "Q1-hi".into(), "A1-hi".into());
        store.insert(&original).await.unwrap();

        let mut updated = FaqRecord::new("Q1", "A2");
        updated.set_translation("hi", "Q1-hi".into(), "A2-hi".into());
        assert!(store.update_by_key("Q1", &updated).await.unwrap());

        let records = store.scan_all().await.unwrap();
        assert_eq!(records, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let store = MemoryFaqStore::new();
        let matched = store
            .update_by_key("nope", &FaqRecord::new("nope", "A"))
            .await
            .unwrap();
        assert!(!matched);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryFaqStore::new();
        store.insert(&FaqRecord::new("Q1", "A1")).await.unwrap();

        assert!(store.delete_by_key("Q1").await.unwrap());
        assert!(!store.delete_by_key("Q1").await.unwrap());
        assert!(store.is_empty());
    }
}
