use serde::{Deserialize, Serialize};

/// Why a career was suggested. The local engine fills the three `*_match`
/// lines; a backend may send only an `overall` summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Reasoning {
    pub mbti_match: String,
    pub skill_match: String,
    pub academic_match: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<String>,
}

/// Descriptive fields copied from the career at generation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CareerDetails {
    pub description: String,
    pub avg_salary: String,
    pub growth_rate: String,
    pub job_outlook: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Weak reference into the catalog.
    pub career_id: String,
    pub career_name: String,
    /// Nominally 0–100 but not clamped.
    pub match_score: i64,
    /// 1-based catalog position, not a score ordering.
    pub rank: usize,
    #[serde(default)]
    pub reasoning: Reasoning,
    #[serde(default)]
    pub learning_roadmap: Vec<String>,
    #[serde(default)]
    pub career_details: CareerDetails,
}
