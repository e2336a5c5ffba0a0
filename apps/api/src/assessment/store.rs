//! Persistence collaborator for assessments.
//!
//! `AppState` holds an `Arc<dyn AssessmentStore>`: Postgres when a database is
//! configured, in-memory otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::assessment::accumulator::Answer;
use crate::assessment::profile::Profile;
use crate::assessment::questions::{Question, QuestionBank};
use crate::models::assessment::AssessmentRow;

/// One completed assessment, as handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Opaque caller identity; never inspected here.
    pub user_id: String,
    pub answers: Vec<Answer>,
    /// The composed profile exactly as returned from submission.
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredAssessment {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: AssessmentRecord,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn load_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<Uuid, StoreError>;

    async fn latest_assessment(&self, user_id: &str) -> Result<Option<StoredAssessment>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAssessmentStore {
    pool: PgPool,
    questions: QuestionBank,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool, questions: QuestionBank) -> Self {
        Self { pool, questions }
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
        // The quiz is reference data shipped with the binary.
        Ok(self.questions.questions().to_vec())
    }

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO assessments
                (id, user_id, answers, traits, top_careers, summary, profile, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&record.user_id)
        .bind(serde_json::to_value(&record.answers)?)
        .bind(serde_json::to_value(record.profile.personality_traits)?)
        .bind(serde_json::to_value(&record.profile.top_careers)?)
        .bind(&record.profile.summary)
        .bind(serde_json::to_value(&record.profile)?)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn latest_assessment(&self, user_id: &str) -> Result<Option<StoredAssessment>, StoreError> {
        let row: Option<AssessmentRow> = sqlx::query_as(
            "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StoredAssessment::try_from).transpose()
    }
}

impl TryFrom<AssessmentRow> for StoredAssessment {
    type Error = StoreError;

    fn try_from(row: AssessmentRow) -> Result<Self, Self::Error> {
        Ok(StoredAssessment {
            id: row.id,
            record: AssessmentRecord {
                user_id: row.user_id,
                answers: serde_json::from_value(row.answers)?,
                profile: serde_json::from_value(row.profile)?,
                created_at: row.created_at,
            },
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store for development and tests. Records are lost on restart.
#[derive(Default)]
pub struct MemoryAssessmentStore {
    questions: QuestionBank,
    records: RwLock<Vec<StoredAssessment>>,
}

impl MemoryAssessmentStore {
    pub fn new(questions: QuestionBank) -> Self {
        Self {
            questions,
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssessmentStore for MemoryAssessmentStore {
    async fn load_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.questions.questions().to_vec())
    }

    async fn save_assessment(&self, record: &AssessmentRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        self.records.write().await.push(StoredAssessment {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn latest_assessment(&self, user_id: &str) -> Result<Option<StoredAssessment>, StoreError> {
        // Appended in submission order, so the last match is the latest.
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .find(|s| s.record.user_id == user_id)
            .cloned())
    }
}
