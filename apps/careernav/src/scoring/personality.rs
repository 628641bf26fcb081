//! Four-axis personality classification from forced-choice survey answers.
//!
//! Questions are split into four bands of 15 (1–15 EI, 16–30 SN, 31–45 TF,
//! 46–60 JP). Each answer adds +1 ("A") or −1 (anything else) to its band.
//! A letter is the first pole only for a strictly positive sum; a zero sum
//! resolves to the second pole on every axis (tie-break policy).

use crate::models::{Answer, AxisScores, SurveyResponse, SurveyResult};

pub const QUESTION_COUNT: i64 = 60;
const BAND_SIZE: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    /// Band lookup. Ids below 1 land in EI and ids above 60 in JP.
    pub fn for_question(question_id: i64) -> Self {
        if question_id <= BAND_SIZE {
            Axis::EI
        } else if question_id <= 2 * BAND_SIZE {
            Axis::SN
        } else if question_id <= 3 * BAND_SIZE {
            Axis::TF
        } else {
            Axis::JP
        }
    }

    /// (positive letter, tie-or-negative letter)
    fn poles(self) -> (char, char) {
        match self {
            Axis::EI => ('E', 'I'),
            Axis::SN => ('S', 'N'),
            Axis::TF => ('T', 'F'),
            Axis::JP => ('J', 'P'),
        }
    }

    fn letter(self, sum: i32) -> char {
        let (positive, other) = self.poles();
        if sum > 0 {
            positive
        } else {
            other
        }
    }
}

/// A survey prompt as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub text: String,
}

/// The full 60-question form.
pub fn questions() -> Vec<Question> {
    (1..=QUESTION_COUNT)
        .map(|id| Question {
            id,
            text: format!("Question {id}: Which option describes you better?"),
        })
        .collect()
}

/// Scores a (possibly partial, unordered) response list. Deterministic.
pub fn score_responses(responses: &[SurveyResponse]) -> SurveyResult {
    let mut scores = AxisScores::default();

    for response in responses {
        let delta = match response.answer {
            Answer::A => 1,
            Answer::B => -1,
        };
        let slot = match Axis::for_question(response.question_id) {
            Axis::EI => &mut scores.ei_score,
            Axis::SN => &mut scores.sn_score,
            Axis::TF => &mut scores.tf_score,
            Axis::JP => &mut scores.jp_score,
        };
        *slot += delta;
    }

    let personality_type = [
        Axis::EI.letter(scores.ei_score),
        Axis::SN.letter(scores.sn_score),
        Axis::TF.letter(scores.tf_score),
        Axis::JP.letter(scores.jp_score),
    ]
    .iter()
    .collect();

    SurveyResult {
        personality_type,
        scores,
    }
}
