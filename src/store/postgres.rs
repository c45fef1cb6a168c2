use super::{FaqStore, StoreError, StoreResult};
use crate::faq::FaqRecord;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::collections::BTreeMap;
use tracing::info;

/// PostgreSQL-backed record store.
///
/// Derived-language fields live in a single JSONB column so that enabling a
/// new target language needs no schema change.
#[derive(Clone)]
pub struct PgFaqStore {
    pool: PgPool,
}

impl PgFaqStore {
    /// Connect to the database and create the `faqs` table if needed.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS faqs (
                id BIGSERIAL PRIMARY KEY,
                question TEXT NOT NULL UNIQUE,
                answer TEXT NOT NULL,
                derived JSONB NOT NULL DEFAULT '{}'::jsonb,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        info!("✓ faqs table ready");
        Ok(())
    }
}

#[async_trait]
impl FaqStore for PgFaqStore {
    async fn insert(&self, record: &FaqRecord) -> StoreResult<()> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO faqs (question, answer, derived, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             ON CONFLICT (question) DO NOTHING",
        )
        .bind(&record.question)
        .bind(&record.answer)
        .bind(Json(&record.derived))
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate(record.question.clone()));
        }
        Ok(())
    }

    async fn update_by_key(&self, question: &str, record: &FaqRecord) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE faqs SET answer = $1, derived = $2, updated_at = $3 WHERE question = $4",
        )
        .bind(&record.answer)
        .bind(Json(&record.derived))
        .bind(Utc::now())
        .bind(question)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_key(&self, question: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE question = $1")
            .bind(question)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn scan_all(&self) -> StoreResult<Vec<FaqRecord>> {
        let rows: Vec<(String, String, Json<BTreeMap<String, String>>)> =
            sqlx::query_as("SELECT question, answer, derived FROM faqs ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(question, answer, Json(derived))| {
                if let Some(key) = derived
                    .keys()
                    .find(|k| !(k.starts_with("question_") || k.starts_with("answer_")))
                {
                    return Err(StoreError::Corrupt(format!(
                        "unexpected derived field '{}' on '{}'",
                        key, question
                    )));
                }
                Ok(FaqRecord {
                    question,
                    answer,
                    derived,
                })
            })
            .collect()
    }
}
