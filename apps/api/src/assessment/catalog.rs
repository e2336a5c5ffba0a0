//! Career Catalog: static, read-only career reference data.
//!
//! Built once at startup and shared as `Arc<CareerCatalog>`. Entry order is
//! insertion order, which the matcher relies on for tie-breaking.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assessment::error::AssessmentError;
use crate::assessment::traits::Trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthOutlook {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerEntry {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Required trait levels. Weights are non-negative by construction (`u32`).
    pub required_traits: BTreeMap<Trait, u32>,
    /// Annual INR.
    pub salary_min: u64,
    pub salary_max: u64,
    pub growth_outlook: GrowthOutlook,
    pub demand_score: u8,
    pub education_path: String,
    pub top_skills: Vec<String>,
}

impl CareerEntry {
    /// Summed in `u64` so caller-supplied catalogs cannot overflow.
    pub fn total_weight(&self) -> u64 {
        self.required_traits.values().map(|&w| u64::from(w)).sum()
    }

    /// "₹6L - ₹25L PA" style range, as shown on the career listing.
    pub fn salary_range_label(&self) -> String {
        fn lpa(v: u64) -> String {
            if v >= 100_000 {
                format!("₹{}L", v / 100_000)
            } else {
                format!("₹{v}")
            }
        }
        format!("{} - {} PA", lpa(self.salary_min), lpa(self.salary_max))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate career slug: {0}")]
    DuplicateSlug(String),
}

#[derive(Debug, Clone)]
pub struct CareerCatalog {
    entries: Vec<CareerEntry>,
    by_slug: HashMap<String, usize>,
}

impl CareerCatalog {
    pub fn new(entries: Vec<CareerEntry>) -> Result<Self, CatalogError> {
        let mut by_slug = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_slug.insert(entry.slug.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(entry.slug.clone()));
            }
        }
        Ok(Self { entries, by_slug })
    }

    pub fn entries(&self) -> &[CareerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, slug: &str) -> Result<&CareerEntry, AssessmentError> {
        self.by_slug
            .get(slug)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| AssessmentError::NotFound(slug.to_string()))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(entry.category.as_str());
            }
        }
        seen
    }

    /// Filter by exact category and/or a case-insensitive search over title,
    /// description and category.
    pub fn browse(&self, category: Option<&str>, search: Option<&str>) -> Vec<&CareerEntry> {
        let needle = search.map(str::to_lowercase);
        self.entries
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| {
                needle.as_deref().map_or(true, |q| {
                    e.title.to_lowercase().contains(q)
                        || e.description.to_lowercase().contains(q)
                        || e.category.to_lowercase().contains(q)
                })
            })
            .collect()
    }

    pub fn builtin() -> Self {
        Self::new(builtin_entries()).expect("builtin catalog slugs are unique")
    }
}

/// Human label for a category key.
pub fn category_name(key: &str) -> String {
    match key {
        "technology" => "Technology".to_string(),
        "business" => "Business".to_string(),
        "design" => "Design".to_string(),
        "finance" => "Finance".to_string(),
        "marketing" => "Marketing".to_string(),
        "engineering" => "Engineering".to_string(),
        "healthcare" => "Healthcare".to_string(),
        "government" => "Government".to_string(),
        "education" => "Education & Research".to_string(),
        other => other.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    slug: &str,
    title: &str,
    category: &str,
    description: &str,
    weights: &[(Trait, u32)],
    salary: (u64, u64),
    growth_outlook: GrowthOutlook,
    demand_score: u8,
    education_path: &str,
    top_skills: &[&str],
) -> CareerEntry {
    CareerEntry {
        slug: slug.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        required_traits: weights.iter().copied().collect(),
        salary_min: salary.0,
        salary_max: salary.1,
        growth_outlook,
        demand_score,
        education_path: education_path.to_string(),
        top_skills: top_skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn builtin_entries() -> Vec<CareerEntry> {
    use GrowthOutlook::*;
    use Trait::*;

    vec![
        entry(
            "software-developer",
            "Software Developer",
            "technology",
            "Design, build and maintain software systems, from web apps to distributed backends.",
            &[(Analytical, 40), (Realistic, 10), (Creative, 5)],
            (600_000, 2_500_000),
            High,
            95,
            "B.Tech CS/IT or BCA + certifications",
            &["Python", "JavaScript", "System Design"],
        ),
        entry(
            "data-analyst",
            "Data Analyst",
            "technology",
            "Turn raw business data into dashboards, reports and decisions.",
            &[(Analytical, 30), (Conventional, 15)],
            (400_000, 1_500_000),
            High,
            88,
            "B.Tech/B.Sc Statistics/CS + Data Analytics certification",
            &["SQL", "Python", "Tableau"],
        ),
        entry(
            "product-manager",
            "Product Manager",
            "business",
            "Own a product's direction, balancing user needs, business goals and engineering reality.",
            &[(Enterprising, 25), (Analytical, 15), (Social, 10)],
            (800_000, 3_000_000),
            High,
            82,
            "B.Tech + MBA or Product Management certification",
            &["Product Strategy", "Analytics", "Stakeholder Management"],
        ),
        entry(
            "ux-designer",
            "UX Designer",
            "design",
            "Research users and design intuitive digital experiences, from wireframes to prototypes.",
            &[(Creative, 30), (Social, 10), (Analytical, 5)],
            (500_000, 2_000_000),
            High,
            78,
            "Any degree + UX Design bootcamp/certification",
            &["Figma", "User Research", "Prototyping"],
        ),
        entry(
            "business-analyst",
            "Business Analyst",
            "business",
            "Bridge business teams and technology by analysing processes and defining requirements.",
            &[(Analytical, 20), (Conventional, 15), (Social, 10)],
            (500_000, 1_800_000),
            Medium,
            75,
            "B.Tech/BBA/MBA with analytics focus",
            &["Requirements Analysis", "SQL", "Process Mapping"],
        ),
        entry(
            "chartered-accountant",
            "Chartered Accountant",
            "finance",
            "Audit, tax and advise organisations on their finances and compliance.",
            &[(Conventional, 30), (Analytical, 15)],
            (700_000, 2_500_000),
            Medium,
            80,
            "B.Com + CA Foundation, Intermediate and Final (ICAI)",
            &["Accounting", "Taxation", "Auditing"],
        ),
        entry(
            "graphic-designer",
            "Graphic Designer",
            "design",
            "Create visual identities, illustrations and marketing material for brands.",
            &[(Creative, 35), (Realistic, 5)],
            (300_000, 1_200_000),
            Medium,
            65,
            "B.Des/BFA or diploma + strong portfolio",
            &["Adobe Illustrator", "Typography", "Branding"],
        ),
        entry(
            "digital-marketer",
            "Digital Marketing Manager",
            "marketing",
            "Grow audiences through content, SEO, social media and performance campaigns.",
            &[(Enterprising, 20), (Creative, 15), (Social, 10)],
            (400_000, 2_200_000),
            High,
            72,
            "Any degree + digital marketing certification",
            &["SEO", "Content Strategy", "Google Analytics"],
        ),
        entry(
            "doctor",
            "Doctor (MBBS)",
            "healthcare",
            "Diagnose and treat patients in hospitals, clinics and community health programmes.",
            &[(Social, 25), (Analytical, 20), (Realistic, 10)],
            (800_000, 3_000_000),
            High,
            90,
            "NEET + MBBS (5.5 years) + optional MD/MS",
            &["Clinical Diagnosis", "Patient Care", "Medical Ethics"],
        ),
        entry(
            "mechanical-engineer",
            "Mechanical Engineer",
            "engineering",
            "Design and maintain machines, manufacturing lines and mechanical systems.",
            &[(Realistic, 30), (Analytical, 20)],
            (350_000, 1_200_000),
            Medium,
            68,
            "JEE + B.Tech Mechanical",
            &["CAD", "Thermodynamics", "Manufacturing Processes"],
        ),
        entry(
            "civil-services",
            "Civil Services Officer (IAS)",
            "government",
            "Administer districts and shape public policy in the Indian Administrative Service.",
            &[(Social, 20), (Enterprising, 20), (Conventional, 10)],
            (700_000, 2_000_000),
            Medium,
            85,
            "Any graduate degree + UPSC Civil Services Examination",
            &["Public Administration", "Policy Analysis", "Leadership"],
        ),
        entry(
            "teacher",
            "Teacher / Educator",
            "education",
            "Teach and mentor students in schools, coaching institutes or online platforms.",
            &[(Social, 30), (Conventional, 5), (Creative, 5)],
            (300_000, 1_000_000),
            Medium,
            70,
            "B.Ed + subject degree, CTET/TET for schools",
            &["Communication", "Curriculum Design", "Mentoring"],
        ),
    ]
}
