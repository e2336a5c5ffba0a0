//! Profile Composer: merges deterministic scoring output with optional narrative.
//!
//! `fallback_narrative` is total and side-effect free; a profile can always be
//! built from the trait vector and match list alone.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::assessment::matcher::MatchResult;
use crate::assessment::narrative::{Narrative, NarrativeOutcome};
use crate::assessment::traits::{Trait, TraitVector};

const MAX_STRENGTHS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    #[serde(rename = "trait")]
    pub trait_: Trait,
    pub raw: u32,
    pub percent: u32,
}

/// Finished, presentation-ready assessment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub summary: String,
    pub strengths: Vec<String>,
    pub work_style: String,
    pub advice: String,
    pub trait_breakdown: Vec<TraitScore>,
    pub personality_traits: TraitVector,
    pub top_careers: Vec<MatchResult>,
    pub narrative_source: NarrativeSource,
}

pub fn compose(traits: &TraitVector, matches: Vec<MatchResult>, outcome: NarrativeOutcome) -> Profile {
    let fallback = fallback_narrative(traits, &matches);

    let (narrative, narrative_source) = match outcome {
        NarrativeOutcome::Success(generated) => {
            let narrative = Narrative {
                summary: generated.summary,
                work_style: non_empty_or(generated.work_style, fallback.work_style),
                advice: non_empty_or(generated.advice, fallback.advice),
            };
            (narrative, NarrativeSource::Generated)
        }
        NarrativeOutcome::Failure(reason) => {
            warn!("Narrative enrichment unavailable, using template summary: {reason}");
            (fallback, NarrativeSource::Fallback)
        }
    };

    let normalized = traits.normalized();
    let trait_breakdown = traits
        .iter()
        .zip(normalized)
        .map(|((t, raw), (_, percent))| TraitScore {
            trait_: t,
            raw,
            percent,
        })
        .collect();

    Profile {
        summary: narrative.summary,
        strengths: strengths(traits),
        work_style: narrative.work_style,
        advice: narrative.advice,
        trait_breakdown,
        personality_traits: *traits,
        top_careers: matches,
        narrative_source,
    }
}

/// Template narrative built from the deterministic data alone.
pub fn fallback_narrative(traits: &TraitVector, matches: &[MatchResult]) -> Narrative {
    let ranked = traits.ranked();
    let top_career = matches.first();

    let summary = match (ranked.first(), top_career) {
        (Some((dominant, _)), Some(career)) => {
            let secondary = ranked
                .get(1)
                .map(|(t, _)| format!(", supported by a {t} streak"))
                .unwrap_or_default();
            format!(
                "Your answers point to a strongly {dominant} profile{secondary}. \
                Of the careers we compared, {} fits you best with a {}/100 match.",
                career.title, career.score
            )
        }
        _ => "Thanks for completing the assessment. Answer more questions to get a \
            sharper picture of your strengths and the careers that suit them."
            .to_string(),
    };

    let work_style = match ranked.first().map(|(t, _)| *t) {
        Some(Trait::Analytical) => "You do your best work with room for focused, deep problem-solving.",
        Some(Trait::Creative) => "You thrive where there is creative freedom and space to experiment.",
        Some(Trait::Social) => "You thrive in collaborative, people-centred teams.",
        Some(Trait::Enterprising) => "You thrive in fast-moving settings where you can lead and take initiative.",
        Some(Trait::Conventional) => "You thrive with clear structure, well-defined processes and measurable goals.",
        Some(Trait::Realistic) => "You thrive in hands-on roles where you build and fix tangible things.",
        None => "Complete more of the assessment to discover your preferred work style.",
    }
    .to_string();

    let advice = if matches.is_empty() {
        "Explore the career library to learn what different roles involve day to day.".to_string()
    } else {
        let titles: Vec<&str> = matches.iter().take(3).map(|m| m.title.as_str()).collect();
        format!(
            "Start by researching {}. Talk to people in these roles, try a short course \
            or project in each, and revisit the assessment as your interests develop.",
            titles.join(", ")
        )
    };

    Narrative {
        summary,
        work_style,
        advice,
    }
}

fn strengths(traits: &TraitVector) -> Vec<String> {
    traits
        .ranked()
        .into_iter()
        .take(MAX_STRENGTHS)
        .map(|(t, _)| t.strength_label().to_string())
        .collect()
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::CareerCatalog;
    use crate::assessment::matcher::rank;
    use crate::assessment::narrative::tests::sample_narrative;

    fn analytical_profile_inputs() -> (TraitVector, Vec<MatchResult>) {
        let traits = TraitVector::from_pairs([(Trait::Analytical, 40), (Trait::Conventional, 10)]);
        let matches = rank(&traits, &CareerCatalog::builtin(), 5).unwrap();
        (traits, matches)
    }

    #[test]
    fn test_failure_uses_fallback_and_keeps_ranking() {
        let (traits, matches) = analytical_profile_inputs();
        let expected = matches.clone();
        let profile = compose(&traits, matches, NarrativeOutcome::Failure("timeout".to_string()));

        assert_eq!(profile.narrative_source, NarrativeSource::Fallback);
        assert!(!profile.summary.is_empty());
        assert!(profile.summary.contains("analytical"));
        assert_eq!(profile.top_careers, expected);
    }

    #[test]
    fn test_success_uses_generated_text() {
        let (traits, matches) = analytical_profile_inputs();
        let profile = compose(&traits, matches, NarrativeOutcome::Success(sample_narrative()));
        assert_eq!(profile.narrative_source, NarrativeSource::Generated);
        assert_eq!(profile.summary, sample_narrative().summary);
    }

    #[test]
    fn test_success_with_blank_fields_borrows_fallback_fields() {
        let (traits, matches) = analytical_profile_inputs();
        let narrative = Narrative {
            summary: "Generated summary.".to_string(),
            work_style: String::new(),
            advice: " ".to_string(),
        };
        let profile = compose(&traits, matches, NarrativeOutcome::Success(narrative));
        assert!(!profile.work_style.is_empty());
        assert!(profile.advice.contains("Software Developer"));
    }

    #[test]
    fn test_fallback_for_zero_vector_is_generic_but_non_empty() {
        let narrative = fallback_narrative(&TraitVector::new(), &[]);
        assert!(!narrative.summary.is_empty());
        assert!(!narrative.work_style.is_empty());
        assert!(!narrative.advice.is_empty());
    }

    #[test]
    fn test_strengths_skip_zero_traits() {
        let traits = TraitVector::from_pairs([(Trait::Creative, 10)]);
        let profile = compose(&traits, vec![], NarrativeOutcome::Failure(String::new()));
        assert_eq!(profile.strengths, vec!["Creative Expression".to_string()]);
    }

    #[test]
    fn test_trait_breakdown_covers_all_traits() {
        let (traits, matches) = analytical_profile_inputs();
        let profile = compose(&traits, matches, NarrativeOutcome::Failure(String::new()));
        assert_eq!(profile.trait_breakdown.len(), 6);
        let analytical = &profile.trait_breakdown[0];
        assert_eq!(analytical.trait_, Trait::Analytical);
        assert_eq!(analytical.percent, 100);
        assert_eq!(analytical.raw, 40);
    }
}
