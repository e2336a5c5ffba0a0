//! Trait Accumulator: folds submitted answers into a `TraitVector`.
//!
//! Pure function of the answers and the question bank: no normalization,
//! no hidden state. Any unresolvable answer fails the whole submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::error::AssessmentError;
use crate::assessment::questions::QuestionBank;
use crate::assessment::traits::TraitVector;

/// One (question, chosen option) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    /// Signed so that a negative index reaches `accumulate` and is reported
    /// against its question instead of failing body deserialization.
    pub option_index: i64,
}

/// Answers as submitted by clients: either an explicit list, or the legacy
/// `{"<question_id>": option_index}` map sent by the quiz page.
///
/// Map keys stay strings here: `untagged` buffers the input, and buffered
/// string keys do not coerce to integers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerSet {
    List(Vec<Answer>),
    Map(BTreeMap<String, i64>),
}

impl AnswerSet {
    /// Map form is flattened in ascending question-id order.
    pub fn into_answers(self) -> Result<Vec<Answer>, AssessmentError> {
        match self {
            AnswerSet::List(answers) => Ok(answers),
            AnswerSet::Map(map) => {
                let mut answers = map
                    .into_iter()
                    .map(|(key, option_index)| {
                        let question_id = key
                            .trim()
                            .parse::<u32>()
                            .map_err(|_| AssessmentError::MalformedQuestionId(key.clone()))?;
                        Ok(Answer {
                            question_id,
                            option_index,
                        })
                    })
                    .collect::<Result<Vec<_>, AssessmentError>>()?;
                answers.sort_by_key(|a| a.question_id);
                Ok(answers)
            }
        }
    }
}

pub fn accumulate(answers: &[Answer], bank: &QuestionBank) -> Result<TraitVector, AssessmentError> {
    let mut vector = TraitVector::new();

    for answer in answers {
        let question = bank
            .get(answer.question_id)
            .ok_or_else(|| AssessmentError::InvalidAnswer {
                question_id: answer.question_id,
                reason: "unknown question".to_string(),
            })?;

        let option = usize::try_from(answer.option_index)
            .ok()
            .and_then(|idx| question.options.get(idx))
            .ok_or_else(|| AssessmentError::InvalidAnswer {
                question_id: answer.question_id,
                reason: format!(
                    "option index {} out of range (question has {} options)",
                    answer.option_index,
                    question.options.len()
                ),
            })?;

        vector.add(option.trait_, option.score);
    }

    Ok(vector)
}
