//! Axum route handlers for the Assessment and Careers API.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::accumulator::AnswerSet;
use crate::assessment::catalog::{category_name, CareerEntry, GrowthOutlook};
use crate::assessment::profile::Profile;
use crate::assessment::questions::Question;
use crate::assessment::service::Submission;
use crate::errors::AppError;
use crate::identity::require_caller;
use crate::state::AppState;

const ESTIMATED_TIME: &str = "5-7 minutes";
const LISTING_DESCRIPTION_CHARS: usize = 150;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub estimated_time: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: AnswerSet,
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub has_results: bool,
    #[serde(flatten)]
    pub submission: Submission,
}

#[derive(Debug, Serialize)]
pub struct LatestResults {
    pub assessment_id: Uuid,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub has_results: bool,
    #[serde(flatten)]
    pub results: Option<LatestResults>,
}

#[derive(Debug, Deserialize)]
pub struct CareersQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerSummary {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub salary_range: String,
    pub growth_outlook: GrowthOutlook,
    pub demand_score: u8,
}

#[derive(Debug, Serialize)]
pub struct CareersResponse {
    pub careers: Vec<CareerSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct Category {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CareerDetailResponse {
    #[serde(flatten)]
    pub career: CareerEntry,
    pub salary_range: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/assessment/questions
pub async fn handle_questions(
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let questions = state.service.questions().await?;
    Ok(Json(QuestionsResponse {
        total_questions: questions.len(),
        questions,
        estimated_time: ESTIMATED_TIME,
    }))
}

/// POST /api/v1/assessment/submit
///
/// Scores the answers, ranks careers and returns the profile. Requires a bearer token.
pub async fn handle_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let caller = require_caller(&headers, state.identity.as_ref()).await?;

    let answers = request.answers.into_answers()?;
    let submission = state
        .service
        .submit_assessment(caller.as_str(), answers, request.top_n)
        .await?;

    Ok(Json(SubmitResponse {
        has_results: true,
        submission,
    }))
}

/// GET /api/v1/assessment/results
///
/// Latest stored assessment for the caller, or `has_results: false`.
pub async fn handle_results(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ResultsResponse>, AppError> {
    let caller = require_caller(&headers, state.identity.as_ref()).await?;

    let results = state
        .service
        .latest_results(caller.as_str())
        .await?
        .map(|stored| LatestResults {
            assessment_id: stored.id,
            completed_at: stored.record.created_at,
            profile: stored.record.profile,
        });

    Ok(Json(ResultsResponse {
        has_results: results.is_some(),
        results,
    }))
}

/// GET /api/v1/careers?category=&search=
pub async fn handle_list_careers(
    State(state): State<AppState>,
    Query(query): Query<CareersQuery>,
) -> Json<CareersResponse> {
    let careers: Vec<CareerSummary> = state
        .service
        .catalog()
        .browse(query.category.as_deref(), query.search.as_deref())
        .into_iter()
        .map(|e| CareerSummary {
            slug: e.slug.clone(),
            title: e.title.clone(),
            category: e.category.clone(),
            description: truncate_description(&e.description),
            salary_range: e.salary_range_label(),
            growth_outlook: e.growth_outlook,
            demand_score: e.demand_score,
        })
        .collect();

    Json(CareersResponse {
        total: careers.len(),
        careers,
    })
}

/// GET /api/v1/careers/categories
pub async fn handle_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .service
        .catalog()
        .categories()
        .into_iter()
        .map(|key| Category {
            key: key.to_string(),
            name: category_name(key),
        })
        .collect();

    Json(CategoriesResponse { categories })
}

/// GET /api/v1/careers/:slug
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CareerDetailResponse>, AppError> {
    let career = state.service.catalog().get(&slug)?;
    Ok(Json(CareerDetailResponse {
        salary_range: career.salary_range_label(),
        career: career.clone(),
    }))
}

fn truncate_description(description: &str) -> String {
    if description.chars().count() <= LISTING_DESCRIPTION_CHARS {
        return description.to_string();
    }
    let cut: String = description.chars().take(LISTING_DESCRIPTION_CHARS).collect();
    format!("{}...", cut.trim_end())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
