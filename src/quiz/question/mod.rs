use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;


const MIN_OPTIONS: usize = 2;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum QuestionKind {
    MultipleChoice,
    OpenEnded,
    TrueFalse,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::MultipleChoice => "MultipleChoice",
            QuestionKind::OpenEnded => "OpenEnded",
            QuestionKind::TrueFalse => "TrueFalse",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("multiple choice questions need at least 2 options, got {0}")]
    TooFewOptions(usize),
    #[error("correct option index {index} is out of range for {count} options")]
    CorrectOptionOutOfRange { index: i64, count: usize },
    #[error("open ended questions need at least one acceptable answer")]
    NoAcceptableAnswers,
    #[error("{kind} questions require the `{field}` field")]
    MissingField {
        kind: QuestionKind,
        field: &'static str,
    },
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Question as submitted by a client or read from a quiz file, before validation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_option_index: Option<i64>,
    #[serde(default)]
    pub acceptable_answers: Option<Vec<String>>,
    #[serde(default)]
    pub correct_bool_answer: Option<bool>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AnswerKey {
    MultipleChoice {
        options: Vec<String>,
        correct_index: usize,
    },
    OpenEnded {
        acceptable_answers: Vec<String>,
    },
    TrueFalse {
        correct_answer: bool,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    text: String,
    key: AnswerKey,
}

impl Question {
    pub fn multiple_choice<T: Into<String>>(
        text: T,
        options: Vec<String>,
        correct_index: i64,
    ) -> Result<Question, QuestionError> {
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        let correct_index = usize::try_from(correct_index)
            .ok()
            .filter(|i| *i < options.len())
            .ok_or(QuestionError::CorrectOptionOutOfRange {
                index: correct_index,
                count: options.len(),
            })?;
        Ok(Question {
            text: text.into(),
            key: AnswerKey::MultipleChoice {
                options,
                correct_index,
            },
        })
    }

    pub fn open_ended<T, I, S>(text: T, acceptable_answers: I) -> Result<Question, QuestionError>
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let acceptable_answers: Vec<String> = acceptable_answers
            .into_iter()
            .map(|answer| normalize(answer.as_ref()))
            .filter(|answer| !answer.is_empty())
            .collect();
        if acceptable_answers.is_empty() {
            return Err(QuestionError::NoAcceptableAnswers);
        }
        Ok(Question {
            text: text.into(),
            key: AnswerKey::OpenEnded { acceptable_answers },
        })
    }

    pub fn true_false<T: Into<String>>(text: T, correct_answer: bool) -> Question {
        Question {
            text: text.into(),
            key: AnswerKey::TrueFalse { correct_answer },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> QuestionKind {
        match self.key {
            AnswerKey::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            AnswerKey::OpenEnded { .. } => QuestionKind::OpenEnded,
            AnswerKey::TrueFalse { .. } => QuestionKind::TrueFalse,
        }
    }

    /// Only multiple choice questions expose options to players.
    pub fn options(&self) -> Option<&[String]> {
        match &self.key {
            AnswerKey::MultipleChoice { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Unparseable answers are wrong answers, not errors.
    pub fn is_correct(&self, answer: &str) -> bool {
        match &self.key {
            AnswerKey::MultipleChoice { correct_index, .. } => answer
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|choice| choice.checked_sub(1))
                .map_or(false, |choice| choice == *correct_index as i64),
            AnswerKey::OpenEnded { acceptable_answers } => {
                let answer = normalize(answer);
                acceptable_answers.iter().any(|a| *a == answer)
            }
            AnswerKey::TrueFalse { correct_answer } => match normalize(answer).as_str() {
                "true" | "t" => *correct_answer,
                "false" | "f" => !*correct_answer,
                _ => false,
            },
        }
    }

    pub fn correct_answer(&self) -> &str {
        match &self.key {
            AnswerKey::MultipleChoice {
                options,
                correct_index,
            } => &options[*correct_index],
            AnswerKey::OpenEnded { acceptable_answers } => &acceptable_answers[0],
            AnswerKey::TrueFalse { correct_answer: true } => "True",
            AnswerKey::TrueFalse {
                correct_answer: false,
            } => "False",
        }
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw_question: RawQuestion) -> Result<Self, Self::Error> {
        let kind = raw_question.kind;
        let missing = |field| QuestionError::MissingField { kind, field };
        match kind {
            QuestionKind::MultipleChoice => {
                let options = raw_question.options.ok_or_else(|| missing("options"))?;
                let correct_index = raw_question
                    .correct_option_index
                    .ok_or_else(|| missing("correctOptionIndex"))?;
                Question::multiple_choice(raw_question.text, options, correct_index)
            }
            QuestionKind::OpenEnded => {
                let answers = raw_question
                    .acceptable_answers
                    .ok_or_else(|| missing("acceptableAnswers"))?;
                Question::open_ended(raw_question.text, answers)
            }
            QuestionKind::TrueFalse => {
                let correct_answer = raw_question
                    .correct_bool_answer
                    .ok_or_else(|| missing("correctBoolAnswer"))?;
                Ok(Question::true_false(raw_question.text, correct_answer))
            }
        }
    }
}
