use rand::Rng;
use tracing::info;

use crate::models::{
    Career, CareerDetails, Profile, Reasoning, Recommendation, SkillSet, SurveyResult,
};
use crate::store::{keys, records, Store};

const BASE_SCORE: f64 = 70.0;
const JITTER_RANGE: f64 = 25.0;
const POSITION_PENALTY: f64 = 3.0;

pub const LEARNING_ROADMAP: [&str; 3] = [
    "Learn core skills",
    "Build projects",
    "Apply to internships",
];

/// Everything the synthesizer reads from the store. Each piece may be absent.
#[derive(Debug, Clone, Default)]
pub struct CachedState {
    pub profile: Option<Profile>,
    pub survey: Option<SurveyResult>,
    /// Carried for parity with the backend input; the placeholder engine
    /// does not weigh individual skills.
    pub skills: Option<SkillSet>,
}

impl CachedState {
    /// Undecodable records read as absent.
    pub fn load(store: &dyn Store) -> Self {
        Self {
            profile: records::load(store, keys::PROFILE),
            survey: records::load(store, keys::SURVEY),
            skills: records::load(store, keys::SKILLS),
        }
    }
}

/// Builds one recommendation per catalog entry, in catalog order.
///
/// `rank` is the 1-based position. `match_score` is
/// `round(70 + U[0,25) - 3 * position)` and is deliberately left unclamped:
/// long catalogs produce negative scores.
pub fn synthesize<R: Rng>(
    profile: Option<&Profile>,
    survey: Option<&SurveyResult>,
    _skills: Option<&SkillSet>,
    catalog: &[Career],
    rng: &mut R,
) -> Vec<Recommendation> {
    let personality = survey
        .map(|s| s.personality_type.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("N/A");
    let cgpa = profile.and_then(Profile::cgpa_label).unwrap_or("N/A");

    catalog
        .iter()
        .enumerate()
        .map(|(position, career)| {
            let raw = BASE_SCORE + rng.gen_range(0.0..JITTER_RANGE)
                - POSITION_PENALTY * position as f64;
            Recommendation {
                career_id: career.id.clone(),
                career_name: career.career_name.clone(),
                match_score: round_half_up(raw),
                rank: position + 1,
                reasoning: Reasoning {
                    mbti_match: format!("Your {personality} personality fits analytical roles"),
                    skill_match: "You have relevant skills".to_string(),
                    academic_match: format!("Profile CGPA: {cgpa}"),
                    overall: None,
                },
                learning_roadmap: LEARNING_ROADMAP.iter().map(|s| s.to_string()).collect(),
                career_details: CareerDetails {
                    description: career.description.clone(),
                    avg_salary: career.avg_salary.clone(),
                    growth_rate: career.growth_rate.clone(),
                    job_outlook: career.job_outlook.clone(),
                },
            }
        })
        .collect()
}

/// Reads cached state, synthesizes, and replaces the stored list wholesale.
pub fn generate_and_store<R: Rng>(
    store: &dyn Store,
    catalog: &[Career],
    rng: &mut R,
) -> Vec<Recommendation> {
    let state = CachedState::load(store);
    let recs = synthesize(
        state.profile.as_ref(),
        state.survey.as_ref(),
        state.skills.as_ref(),
        catalog,
        rng,
    );
    records::save(store, keys::RECOMMENDATIONS, &recs);
    info!(count = recs.len(), "recommendations generated locally");
    recs
}

/// Halves round toward +∞, matching the backend's rounding.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
