pub mod auth;
pub mod career;
pub mod profile;
pub mod recommendation;
pub mod skills;
pub mod survey;

pub use auth::{Credentials, DemoUser, LoginResponse, RegisteredUser, UserEcho};
pub use career::Career;
pub use profile::Profile;
pub use recommendation::{CareerDetails, Reasoning, Recommendation};
pub use skills::{SkillEntry, SkillSet};
pub use survey::{Answer, AxisScores, SurveyResponse, SurveyResult, SurveySubmission};
