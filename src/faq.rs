//! FAQ records and their per-language views.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the derived question field for a language, e.g. `question_hi`.
pub fn question_field(lang: &str) -> String {
    format!("question_{}", lang)
}

/// Name of the derived answer field for a language, e.g. `answer_hi`.
pub fn answer_field(lang: &str) -> String {
    format!("answer_{}", lang)
}

/// A persisted FAQ.
///
/// `question` is the record's key. Translations live in `derived`, keyed by
/// their field name (`question_hi`, `answer_bn`, ...), and serialize flat
/// next to the base fields:
///
/// ```json
/// {"question": "Q1", "answer": "A1", "question_hi": "...", "answer_hi": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub derived: BTreeMap<String, String>,
}

impl FaqRecord {
    /// A record with base fields only.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            derived: BTreeMap::new(),
        }
    }

    /// Set both derived fields for a language.
    pub fn set_translation(&mut self, lang: &str, question: String, answer: String) {
        self.derived.insert(question_field(lang), question);
        self.derived.insert(answer_field(lang), answer);
    }

    /// All fields, base and derived, as one flat mapping.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.derived.clone();
        fields.insert("question".to_string(), self.question.clone());
        fields.insert("answer".to_string(), self.answer.clone());
        fields
    }

    /// Project this record for `lang`.
    ///
    /// Each field resolves to its derived value when one exists, otherwise to
    /// the base value. The two fields fall back independently.
    pub fn view(&self, lang: &str) -> FaqView {
        let question = self
            .derived
            .get(&question_field(lang))
            .unwrap_or(&self.question);
        let answer = self.derived.get(&answer_field(lang)).unwrap_or(&self.answer);

        FaqView {
            question: question.clone(),
            answer: answer.clone(),
        }
    }
}

/// The `{question, answer}` pair returned to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
}

/// Project every record for `lang`, keeping store order.
pub fn project(records: &[FaqRecord], lang: &str) -> Vec<FaqView> {
    records.iter().map(|record| record.view(lang)).collect()
}
