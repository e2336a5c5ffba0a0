//! Assessment submission: orchestrates the scoring pipeline.
//!
//! Flow: load questions → accumulate → rank → enrich (bounded, best-effort) →
//!       compose → persist → return.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::accumulator::{accumulate, Answer};
use crate::assessment::catalog::CareerCatalog;
use crate::assessment::matcher::rank;
use crate::assessment::narrative::{enrich, NarrativeGenerator, NarrativeRequest};
use crate::assessment::profile::{compose, Profile};
use crate::assessment::questions::{Question, QuestionBank};
use crate::assessment::store::{AssessmentRecord, AssessmentStore, StoredAssessment};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub assessment_id: Uuid,
    #[serde(flatten)]
    pub profile: Profile,
}

#[derive(Clone)]
pub struct AssessmentService {
    catalog: Arc<CareerCatalog>,
    store: Arc<dyn AssessmentStore>,
    narrator: Arc<dyn NarrativeGenerator>,
    narrative_timeout: Duration,
    default_top_n: i64,
}

impl AssessmentService {
    pub fn new(
        catalog: Arc<CareerCatalog>,
        store: Arc<dyn AssessmentStore>,
        narrator: Arc<dyn NarrativeGenerator>,
        narrative_timeout: Duration,
        default_top_n: i64,
    ) -> Self {
        Self {
            catalog,
            store,
            narrator,
            narrative_timeout,
            default_top_n,
        }
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub async fn questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.store.load_questions().await?)
    }

    /// Scores a submission, persists it, and returns the finished profile.
    ///
    /// Invalid answers and a non-positive `top_n` are rejected before anything
    /// is persisted. Narrative failures never reach the caller.
    pub async fn submit_assessment(
        &self,
        user_id: &str,
        answers: Vec<Answer>,
        top_n: Option<i64>,
    ) -> Result<Submission, AppError> {
        let bank = QuestionBank::new(self.store.load_questions().await?);

        let traits = accumulate(&answers, &bank)?;
        if traits.is_zero() {
            debug!("Submission from user {user_id} scored no traits; every match will be 0");
        }
        let matches = rank(&traits, &self.catalog, top_n.unwrap_or(self.default_top_n))?;

        let request = NarrativeRequest {
            traits,
            matches: matches.clone(),
        };
        let outcome = enrich(self.narrator.as_ref(), &request, self.narrative_timeout).await;
        let profile = compose(&traits, matches, outcome);

        let record = AssessmentRecord {
            user_id: user_id.to_string(),
            answers,
            profile: profile.clone(),
            created_at: Utc::now(),
        };
        let assessment_id = self.store.save_assessment(&record).await?;

        info!(
            "Assessment {} for user {}: dominant={:?}, top_career={:?}, narrative={:?}",
            assessment_id,
            user_id,
            traits.dominant(),
            profile.top_careers.first().map(|m| m.slug.as_str()),
            profile.narrative_source
        );

        Ok(Submission {
            assessment_id,
            profile,
        })
    }

    pub async fn latest_results(&self, user_id: &str) -> Result<Option<StoredAssessment>, AppError> {
        Ok(self.store.latest_assessment(user_id).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
