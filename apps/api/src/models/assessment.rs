use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub user_id: String,
    pub answers: Value,
    pub traits: Value,
    pub top_careers: Value,
    pub summary: String,
    pub profile: Value,
    pub created_at: DateTime<Utc>,
}
