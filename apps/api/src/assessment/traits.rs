//! Trait taxonomy and the per-submission trait score vector.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One dimension of the aptitude taxonomy (RIASEC-style, six fixed traits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Analytical,
    Creative,
    Social,
    Enterprising,
    Conventional,
    Realistic,
}

impl Trait {
    /// Declaration order. Also the tie-break order wherever traits are ranked.
    pub const ALL: [Trait; 6] = [
        Trait::Analytical,
        Trait::Creative,
        Trait::Social,
        Trait::Enterprising,
        Trait::Conventional,
        Trait::Realistic,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Analytical => "analytical",
            Trait::Creative => "creative",
            Trait::Social => "social",
            Trait::Enterprising => "enterprising",
            Trait::Conventional => "conventional",
            Trait::Realistic => "realistic",
        }
    }

    /// Human-facing strength label used in profiles.
    pub fn strength_label(self) -> &'static str {
        match self {
            Trait::Analytical => "Analytical Thinking",
            Trait::Creative => "Creative Expression",
            Trait::Social => "Empathy & Communication",
            Trait::Enterprising => "Leadership & Initiative",
            Trait::Conventional => "Organisation & Attention to Detail",
            Trait::Realistic => "Hands-on Problem Solving",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated score per trait. Every trait is always present (zero by default),
/// so consumers never branch on missing keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TraitVector {
    scores: [u32; Trait::ALL.len()],
}

impl TraitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Trait, u32)>) -> Self {
        let mut vector = Self::new();
        for (t, score) in pairs {
            vector.add(t, score);
        }
        vector
    }

    pub fn get(&self, t: Trait) -> u32 {
        self.scores[t.index()]
    }

    pub(crate) fn add(&mut self, t: Trait, score: u32) {
        let slot = &mut self.scores[t.index()];
        *slot = slot.saturating_add(score);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, u32)> + '_ {
        Trait::ALL.iter().map(move |&t| (t, self.get(t)))
    }

    pub fn is_zero(&self) -> bool {
        self.scores.iter().all(|&s| s == 0)
    }

    pub fn max_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Highest-scoring trait; the earliest in `Trait::ALL` wins ties.
    /// `None` for an all-zero vector.
    pub fn dominant(&self) -> Option<Trait> {
        self.ranked().into_iter().next().map(|(t, _)| t)
    }

    /// Non-zero traits ordered by score descending, declaration order on ties.
    pub fn ranked(&self) -> Vec<(Trait, u32)> {
        let mut ranked: Vec<(Trait, u32)> = self.iter().filter(|(_, s)| *s > 0).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Each trait as a percentage of the highest observed score (0-100).
    pub fn normalized(&self) -> Vec<(Trait, u32)> {
        let max = self.max_score();
        self.iter()
            .map(|(t, s)| {
                let pct = if max == 0 {
                    0
                } else {
                    ((s as f64 / max as f64) * 100.0).round() as u32
                };
                (t, pct)
            })
            .collect()
    }
}

impl Serialize for TraitVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Trait::ALL.len()))?;
        for (t, score) in self.iter() {
            map.serialize_entry(t.as_str(), &score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TraitVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::collections::HashMap::<Trait, u32>::deserialize(deserializer)?;
        Ok(TraitVector::from_pairs(raw))
    }
}
