use anyhow::{Context, Result};
use serde::de;
use serde::{Deserialize, Deserializer};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::quiz::{Question, QuestionKind, Quiz, RawQuestion};
use crate::registry::Registry;


const LIST_SEPARATOR: char = '|';

fn bool_from_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match String::deserialize(deserializer)?
        .trim()
        .to_lowercase()
        .as_ref()
    {
        "true" | "t" => Ok(Some(true)),
        "false" | "f" => Ok(Some(false)),
        "" => Ok(None),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"true, false or blank",
        )),
    }
}

fn split_list(list: Option<String>) -> Option<Vec<String>> {
    list.map(|l| {
        l.split(LIST_SEPARATOR)
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect()
    })
}

/// One row of a quiz file. List cells hold `|`-separated values.
#[derive(Debug, Deserialize)]
struct CsvQuestion {
    #[serde(rename = "type")]
    kind: QuestionKind,
    text: String,
    #[serde(default)]
    options: Option<String>,
    #[serde(default)]
    correct_option_index: Option<i64>,
    #[serde(default)]
    acceptable_answers: Option<String>,
    #[serde(default, deserialize_with = "bool_from_string")]
    correct_bool_answer: Option<bool>,
}

impl From<CsvQuestion> for RawQuestion {
    fn from(csv_question: CsvQuestion) -> Self {
        RawQuestion {
            kind: csv_question.kind,
            text: csv_question.text,
            options: split_list(csv_question.options),
            correct_option_index: csv_question.correct_option_index,
            acceptable_answers: split_list(csv_question.acceptable_answers),
            correct_bool_answer: csv_question.correct_bool_answer,
        }
    }
}

#[derive(Debug)]
pub struct QuizDefinition {
    name: String,
    questions: Vec<Question>,
}

impl QuizDefinition {
    /// Reads a quiz file, naming the quiz after the file stem.
    pub fn open(source: &Path) -> Result<QuizDefinition> {
        let name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .context("Quiz file name is not valid unicode")?;
        let file = File::open(source)?;
        QuizDefinition::from_reader(name, file)
    }

    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<QuizDefinition> {
        let mut questions = Vec::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for (row, question) in csv_reader.deserialize().enumerate() {
            let line = row + 2;
            let csv_question: CsvQuestion =
                question.with_context(|| format!("Could not parse line {}", line))?;
            let question = Question::try_from(RawQuestion::from(csv_question))
                .with_context(|| format!("Invalid question on line {}", line))?;
            questions.push(question);
        }
        Ok(QuizDefinition {
            name: name.to_owned(),
            questions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_quiz(self) -> Quiz {
        let mut quiz = Quiz::new(self.name);
        for question in self.questions {
            quiz.add_question(question);
        }
        quiz
    }
}

/// Registers every `.csv` quiz file found in `dir`. Files that fail to parse are skipped.
pub fn import_directory(registry: &Registry, dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        debug!("No quiz directory at {:?}", dir);
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Could not read {:?}", dir))? {
        let path = entry?.path();
        if path.extension().map_or(false, |e| e == "csv") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut ids = Vec::new();
    for path in paths {
        match QuizDefinition::open(&path) {
            Ok(definition) => {
                info!(
                    "Imported quiz {:?} with {} questions from {:?}",
                    definition.name(),
                    definition.questions().len(),
                    path
                );
                ids.push(registry.insert(definition.into_quiz()));
            }
            Err(e) => warn!("Skipping quiz file {:?}: {:#}", path, e),
        }
    }
    Ok(ids)
}
