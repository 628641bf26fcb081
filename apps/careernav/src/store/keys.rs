/// Key schema. Every value is an independently serialized record:
/// - `careernav:v1:token` — bare session token string
/// - `careernav:v1:profile` — versioned `Profile`
/// - `careernav:v1:survey` — versioned `SurveyResult`
/// - `careernav:v1:skills` — versioned `SkillSet`
/// - `careernav:v1:recommendations` — versioned `Vec<Recommendation>`
/// - `careernav:v1:registered_user` — versioned `RegisteredUser`
pub const TOKEN: &str = "careernav:v1:token";
pub const PROFILE: &str = "careernav:v1:profile";
pub const SURVEY: &str = "careernav:v1:survey";
pub const SKILLS: &str = "careernav:v1:skills";
pub const RECOMMENDATIONS: &str = "careernav:v1:recommendations";
pub const REGISTERED_USER: &str = "careernav:v1:registered_user";

pub const ALL: [&str; 6] = [
    TOKEN,
    PROFILE,
    SURVEY,
    SKILLS,
    RECOMMENDATIONS,
    REGISTERED_USER,
];
