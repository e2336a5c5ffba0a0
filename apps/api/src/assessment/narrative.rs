//! Narrative enrichment: the optional, best-effort generative-text step.
//!
//! The generator is a black box behind `NarrativeGenerator`. `enrich` bounds it
//! with a timeout and folds every failure into `NarrativeOutcome::Failure`, so
//! nothing past this boundary ever sees an enrichment error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assessment::matcher::MatchResult;
use crate::assessment::prompts::{NARRATIVE_PROMPT_TEMPLATE, NARRATIVE_SYSTEM};
use crate::assessment::traits::TraitVector;
use crate::llm_client::prompts::SCORE_FIDELITY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

/// Narrative text for a profile, either generated or built from templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(alias = "personality_summary")]
    pub summary: String,
    #[serde(default)]
    pub work_style: String,
    #[serde(default)]
    pub advice: String,
}

/// Input handed to the generator.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeRequest {
    pub traits: TraitVector,
    pub matches: Vec<MatchResult>,
}

/// Result of the enrichment boundary. `Failure` carries a reason for logs only.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Success(Narrative),
    Failure(String),
}

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> Result<Narrative, LlmError>;
}

/// Generates narratives through the shared `LlmClient`.
pub struct LlmNarrator(pub LlmClient);

#[async_trait]
impl NarrativeGenerator for LlmNarrator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<Narrative, LlmError> {
        let prompt = build_narrative_prompt(request)?;
        self.0.call_json::<Narrative>(&prompt, NARRATIVE_SYSTEM).await
    }
}

/// Used when no model is configured. Always fails, so profiles take the
/// template path.
pub struct DisabledNarrator;

#[async_trait]
impl NarrativeGenerator for DisabledNarrator {
    async fn generate(&self, _request: &NarrativeRequest) -> Result<Narrative, LlmError> {
        Err(LlmError::Disabled)
    }
}

/// Runs the generator with a hard time bound. Never fails.
pub async fn enrich(
    generator: &dyn NarrativeGenerator,
    request: &NarrativeRequest,
    timeout: Duration,
) -> NarrativeOutcome {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Err(_) => NarrativeOutcome::Failure(format!(
            "narrative generation timed out after {}ms",
            timeout.as_millis()
        )),
        Ok(Err(e)) => NarrativeOutcome::Failure(e.to_string()),
        Ok(Ok(narrative)) if narrative.summary.trim().is_empty() => {
            NarrativeOutcome::Failure("narrative generation returned an empty summary".to_string())
        }
        Ok(Ok(narrative)) => NarrativeOutcome::Success(narrative),
    }
}

fn build_narrative_prompt(request: &NarrativeRequest) -> Result<String, LlmError> {
    let traits_json = serde_json::to_string_pretty(&request.traits)?;
    let careers_json = serde_json::to_string_pretty(
        &request
            .matches
            .iter()
            .map(|m| {
                serde_json::json!({
                    "rank": m.rank,
                    "title": m.title,
                    "category": m.category,
                    "score": m.score,
                })
            })
            .collect::<Vec<_>>(),
    )?;

    Ok(NARRATIVE_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", SCORE_FIDELITY_INSTRUCTION)
        .replace("{traits_json}", &traits_json)
        .replace("{careers_json}", &careers_json))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assessment::traits::Trait;

    /// Returns a fixed narrative.
    pub(crate) struct FixedNarrator(pub Narrative);

    #[async_trait]
    impl NarrativeGenerator for FixedNarrator {
        async fn generate(&self, _request: &NarrativeRequest) -> Result<Narrative, LlmError> {
            Ok(self.0.clone())
        }
    }

    /// Sleeps far longer than any test timeout.
    pub(crate) struct StalledNarrator;

    #[async_trait]
    impl NarrativeGenerator for StalledNarrator {
        async fn generate(&self, _request: &NarrativeRequest) -> Result<Narrative, LlmError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(LlmError::EmptyContent)
        }
    }

    pub(crate) fn sample_narrative() -> Narrative {
        Narrative {
            summary: "You are a curious, data-driven thinker.".to_string(),
            work_style: "Focused teams with room for deep work.".to_string(),
            advice: "Build two portfolio projects this semester.".to_string(),
        }
    }

    fn request() -> NarrativeRequest {
        NarrativeRequest {
            traits: TraitVector::from_pairs([(Trait::Analytical, 20)]),
            matches: vec![],
        }
    }

    #[tokio::test]
    async fn test_enrich_success_passes_narrative_through() {
        let outcome = enrich(
            &FixedNarrator(sample_narrative()),
            &request(),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(outcome, NarrativeOutcome::Success(sample_narrative()));
    }

    #[tokio::test]
    async fn test_enrich_disabled_is_failure() {
        let outcome = enrich(&DisabledNarrator, &request(), Duration::from_secs(1)).await;
        assert!(matches!(outcome, NarrativeOutcome::Failure(reason) if reason.contains("disabled")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enrich_timeout_is_failure() {
        let outcome = enrich(&StalledNarrator, &request(), Duration::from_millis(50)).await;
        assert!(matches!(outcome, NarrativeOutcome::Failure(reason) if reason.contains("timed out")));
    }

    #[tokio::test]
    async fn test_enrich_blank_summary_is_failure() {
        let blank = Narrative {
            summary: "   ".to_string(),
            work_style: String::new(),
            advice: String::new(),
        };
        let outcome = enrich(&FixedNarrator(blank), &request(), Duration::from_secs(1)).await;
        assert!(matches!(outcome, NarrativeOutcome::Failure(_)));
    }

    #[test]
    fn test_narrative_accepts_legacy_summary_key() {
        let n: Narrative =
            serde_json::from_str(r#"{"personality_summary": "Hello", "advice": "Go"}"#).unwrap();
        assert_eq!(n.summary, "Hello");
        assert_eq!(n.work_style, "");
    }

    #[test]
    fn test_prompt_embeds_scores_and_fidelity_rule() {
        let prompt = build_narrative_prompt(&request()).unwrap();
        assert!(prompt.contains("\"analytical\": 20"));
        assert!(prompt.contains("Do NOT invent new careers"));
        assert!(!prompt.contains("{traits_json}"));
    }
}
