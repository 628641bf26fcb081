use serde::{Deserialize, Deserializer, Serialize};

/// Forced-choice answer. Anything other than "A", including a missing or
/// null answer, counts as the second option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Answer {
    A,
    #[default]
    B,
}

impl From<Option<String>> for Answer {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("A") => Answer::A,
            _ => Answer::B,
        }
    }
}

impl From<Answer> for String {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::A => "A".to_string(),
            Answer::B => "B".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyResponse {
    pub question_id: i64,
    #[serde(default)]
    pub answer: Answer,
}

impl SurveyResponse {
    pub fn new(question_id: i64, answer: Answer) -> Self {
        Self {
            question_id,
            answer,
        }
    }
}

/// Body of `POST mbti/submit/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveySubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responses: Vec<SurveyResponse>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SurveyResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SurveyResponse>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AxisScores {
    pub ei_score: i32,
    pub sn_score: i32,
    pub tf_score: i32,
    pub jp_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyResult {
    pub personality_type: String,
    #[serde(default)]
    pub scores: AxisScores,
}
