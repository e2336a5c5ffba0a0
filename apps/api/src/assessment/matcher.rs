//! Matcher: ranks catalog entries against a trait vector.
//!
//! Sufficiency scoring: for each required trait the profile earns credit up to
//! the required weight and no further.
//!
//!   score = 100 × Σ min(v[t], w[t]) / Σ w[t]
//!
//! Ranking is a stable sort on score, so equal scores keep catalog order and
//! the same input always yields the same output.

use serde::{Deserialize, Serialize};

use crate::assessment::catalog::{CareerCatalog, CareerEntry, GrowthOutlook};
use crate::assessment::error::AssessmentError;
use crate::assessment::traits::{Trait, TraitVector};

pub const DEFAULT_TOP_N: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub rank: u32,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub score: u32, // 0-100
    pub rationale: String,
    pub salary_range: String,
    pub growth_outlook: GrowthOutlook,
    pub education_path: String,
    pub top_skills: Vec<String>,
}

/// Sufficiency score of a single entry, 0-100.
pub fn score_entry(traits: &TraitVector, entry: &CareerEntry) -> u32 {
    let total_weight = entry.total_weight();
    if total_weight == 0 {
        return 0;
    }

    let covered: u64 = entry
        .required_traits
        .iter()
        .map(|(&t, &w)| u64::from(traits.get(t).min(w)))
        .sum();

    ((covered as f64 / total_weight as f64) * 100.0).round() as u32
}

/// Top `n` entries by score. `n` larger than the catalog is capped, not an error.
pub fn rank(
    traits: &TraitVector,
    catalog: &CareerCatalog,
    n: i64,
) -> Result<Vec<MatchResult>, AssessmentError> {
    if n <= 0 {
        return Err(AssessmentError::InvalidN(n));
    }

    let mut scored: Vec<(&CareerEntry, u32)> = catalog
        .entries()
        .iter()
        .map(|entry| (entry, score_entry(traits, entry)))
        .collect();

    // `sort_by` is stable: ties stay in catalog order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let take = usize::try_from(n).unwrap_or(usize::MAX).min(scored.len());

    Ok(scored
        .into_iter()
        .take(take)
        .enumerate()
        .map(|(idx, (entry, score))| MatchResult {
            rank: idx as u32 + 1,
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            category: entry.category.clone(),
            score,
            rationale: build_rationale(traits, entry),
            salary_range: entry.salary_range_label(),
            growth_outlook: entry.growth_outlook,
            education_path: entry.education_path.clone(),
            top_skills: entry.top_skills.clone(),
        })
        .collect())
}

/// Names the required traits the profile fully meets and the ones it falls short on.
fn build_rationale(traits: &TraitVector, entry: &CareerEntry) -> String {
    let mut met: Vec<Trait> = Vec::new();
    let mut short: Vec<Trait> = Vec::new();

    // Heaviest requirement first, declaration order on ties.
    let mut required: Vec<(Trait, u32)> = entry
        .required_traits
        .iter()
        .map(|(&t, &w)| (t, w))
        .filter(|(_, w)| *w > 0)
        .collect();
    required.sort_by(|a, b| b.1.cmp(&a.1));

    for (t, w) in required {
        if traits.get(t) >= w {
            met.push(t);
        } else {
            short.push(t);
        }
    }

    let join = |ts: &[Trait]| ts.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");

    match (met.is_empty(), short.is_empty()) {
        (false, true) => format!(
            "Your profile meets every trait {} calls for ({}).",
            entry.title,
            join(&met)
        ),
        (false, false) => format!(
            "Strong on {} for {}; building {} would strengthen the fit.",
            join(&met),
            entry.title,
            join(&short)
        ),
        (true, false) => format!(
            "{} calls for {}; your answers show room to grow there.",
            entry.title,
            join(&short)
        ),
        (true, true) => format!("{} has no specific trait requirements.", entry.title),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::accumulator::{accumulate, Answer};
    use crate::assessment::questions::QuestionBank;

    fn all_analytical_vector() -> TraitVector {
        let bank = QuestionBank::builtin();
        let answers: Vec<Answer> = bank
            .questions()
            .iter()
            .filter_map(|q| {
                q.options
                    .iter()
                    .position(|o| o.trait_ == Trait::Analytical)
                    .map(|idx| Answer {
                        question_id: q.id,
                        option_index: idx as i64,
                    })
            })
            .collect();
        accumulate(&answers, &bank).unwrap()
    }

    #[test]
    fn test_zero_vector_scores_zero_everywhere() {
        let catalog = CareerCatalog::builtin();
        let results = rank(&TraitVector::new(), &catalog, 100).unwrap();
        assert_eq!(results.len(), catalog.len());
        assert!(results.iter().all(|r| r.score == 0));
        // All tied, so catalog order is preserved.
        let slugs: Vec<_> = results.iter().map(|r| r.slug.as_str()).collect();
        let catalog_slugs: Vec<_> = catalog.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, catalog_slugs);
    }

    #[test]
    fn test_non_positive_n_is_invalid() {
        let catalog = CareerCatalog::builtin();
        assert_eq!(
            rank(&TraitVector::new(), &catalog, 0).unwrap_err(),
            AssessmentError::InvalidN(0)
        );
        assert_eq!(
            rank(&TraitVector::new(), &catalog, -3).unwrap_err(),
            AssessmentError::InvalidN(-3)
        );
    }

    #[test]
    fn test_n_three_returns_three_non_increasing() {
        let catalog = CareerCatalog::builtin();
        let results = rank(&all_analytical_vector(), &catalog, 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(
            results.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_n_larger_than_catalog_is_capped() {
        let catalog = CareerCatalog::builtin();
        let results = rank(&all_analytical_vector(), &catalog, 100).unwrap();
        assert_eq!(results.len(), 12);
    }

    #[test]
    fn test_analytical_answers_rank_software_developer_first() {
        let vector = all_analytical_vector();
        assert_eq!(vector.dominant(), Some(Trait::Analytical));

        let catalog = CareerCatalog::builtin();
        let results = rank(&vector, &catalog, DEFAULT_TOP_N).unwrap();
        assert_eq!(results[0].slug, "software-developer");

        let top_weight = catalog.get("software-developer").unwrap().required_traits[&Trait::Analytical];
        for entry in catalog.entries() {
            let w = entry.required_traits.get(&Trait::Analytical).copied().unwrap_or(0);
            assert!(top_weight >= w);
        }
    }

    #[test]
    fn test_scores_bounded_0_to_100() {
        let catalog = CareerCatalog::builtin();
        let huge = TraitVector::from_pairs(Trait::ALL.iter().map(|&t| (t, u32::MAX)));
        for v in [TraitVector::new(), all_analytical_vector(), huge] {
            for entry in catalog.entries() {
                assert!(score_entry(&v, entry) <= 100);
            }
        }
        let full = rank(&huge, &catalog, 12).unwrap();
        assert!(full.iter().all(|r| r.score == 100));
    }

    #[test]
    fn test_exceeding_requirement_earns_no_extra_credit() {
        let catalog = CareerCatalog::builtin();
        let entry = catalog.get("graphic-designer").unwrap(); // creative 35, realistic 5
        let enough = TraitVector::from_pairs([(Trait::Creative, 35)]);
        let excess = TraitVector::from_pairs([(Trait::Creative, 500)]);
        assert_eq!(score_entry(&enough, entry), score_entry(&excess, entry));
        assert_eq!(score_entry(&enough, entry), 88); // 35 / 40
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let catalog = CareerCatalog::builtin();
        let v = TraitVector::from_pairs([(Trait::Social, 20), (Trait::Creative, 10)]);
        let first = serde_json::to_vec(&rank(&v, &catalog, 12).unwrap()).unwrap();
        let second = serde_json::to_vec(&rank(&v, &catalog, 12).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_increasing_a_trait_never_lowers_entries_requiring_it() {
        let catalog = CareerCatalog::builtin();
        let base = TraitVector::from_pairs([
            (Trait::Analytical, 10),
            (Trait::Social, 5),
            (Trait::Enterprising, 15),
        ]);
        for &t in &Trait::ALL {
            for bump in [1, 5, 20, 100] {
                let mut bumped = base;
                bumped.add(t, bump);
                for entry in catalog.entries() {
                    if entry.required_traits.contains_key(&t) {
                        assert!(
                            score_entry(&bumped, entry) >= score_entry(&base, entry),
                            "{} dropped when {t} increased",
                            entry.slug
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rationale_mentions_met_and_short_traits() {
        let catalog = CareerCatalog::builtin();
        let entry = catalog.get("data-analyst").unwrap(); // analytical 30, conventional 15
        let v = TraitVector::from_pairs([(Trait::Analytical, 40)]);
        let rationale = build_rationale(&v, entry);
        assert!(rationale.contains("analytical"));
        assert!(rationale.contains("conventional"));
    }

    #[test]
    fn test_match_carries_career_details() {
        let catalog = CareerCatalog::builtin();
        let results = rank(&all_analytical_vector(), &catalog, 1).unwrap();
        let top = &results[0];
        let entry = catalog.get(&top.slug).unwrap();
        assert_eq!(top.salary_range, "₹6L - ₹25L PA");
        assert_eq!(top.growth_outlook, GrowthOutlook::High);
        assert_eq!(top.education_path, entry.education_path);
        assert_eq!(top.top_skills, entry.top_skills);
        assert!(!top.top_skills.is_empty());
    }

    #[test]
    fn test_extreme_weights_do_not_overflow() {
        let mut entry = CareerCatalog::builtin().entries()[0].clone();
        entry.required_traits = [(Trait::Analytical, u32::MAX), (Trait::Creative, u32::MAX)]
            .into_iter()
            .collect();
        let catalog = CareerCatalog::new(vec![entry]).unwrap();
        let entry = &catalog.entries()[0];
        assert_eq!(entry.total_weight(), 2 * u64::from(u32::MAX));

        let huge = TraitVector::from_pairs(Trait::ALL.iter().map(|&t| (t, u32::MAX)));
        assert_eq!(score_entry(&huge, entry), 100);
        let half = TraitVector::from_pairs([(Trait::Analytical, u32::MAX)]);
        assert_eq!(score_entry(&half, entry), 50);
    }

    #[test]
    fn test_entry_without_weights_scores_zero() {
        let mut entry = CareerCatalog::builtin().entries()[0].clone();
        entry.required_traits.clear();
        let v = TraitVector::from_pairs([(Trait::Analytical, 50)]);
        assert_eq!(score_entry(&v, &entry), 0);
    }
}
