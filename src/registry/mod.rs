use itertools::Itertools;
use lazy_static::lazy_static;
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use unidecode::unidecode;

use crate::quiz::Quiz;


lazy_static! {
    static ref FORBIDDEN_SLUG_CHARACTERS_REGEX: Regex = Regex::new("[^\\sa-z0-9-]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new("\\s+").unwrap();
}

const FALLBACK_SLUG: &str = "quiz";

fn slugify(name: &str) -> String {
    let name = unidecode(name);
    let name: String = FORBIDDEN_SLUG_CHARACTERS_REGEX
        .replace_all(&name.to_lowercase(), "")
        .into();
    let name = name.trim();
    if name.is_empty() {
        return FALLBACK_SLUG.to_owned();
    }
    WHITESPACE_REGEX.replace_all(name, "-").into()
}

/// The salt is fixed-width, so the serial alone keeps ids distinct.
fn format_id(slug: &str, salt: u16, serial: u64) -> String {
    format!("{}-{:04x}{:x}", slug, salt, serial)
}

fn generate_id(slug: &str, serial: u64) -> String {
    format_id(slug, rand::thread_rng().gen(), serial)
}

pub type QuizHandle = Arc<Mutex<Quiz>>;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
}

#[derive(Default)]
pub struct Registry {
    quizzes: RwLock<HashMap<String, QuizHandle>>,
    next_serial: AtomicU64,
}

impl Registry {
    pub fn create(&self, name: &str) -> String {
        self.insert(Quiz::new(name))
    }

    /// Registers a quiz under a fresh URL-safe id derived from its name.
    pub fn insert(&self, quiz: Quiz) -> String {
        let slug = slugify(quiz.name());
        let name = quiz.name().to_owned();
        let mut map = self.quizzes.write();
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        let id = generate_id(&slug, serial);
        debug_assert!(!map.contains_key(&id));
        map.insert(id.clone(), Arc::new(Mutex::new(quiz)));
        info!(id = %id, name = %name, "Registered quiz");
        id
    }

    pub fn get(&self, id: &str) -> Option<QuizHandle> {
        self.quizzes.read().get(id).cloned()
    }

    pub fn list(&self) -> Vec<QuizSummary> {
        let map = self.quizzes.read();
        map.iter()
            .map(|(id, quiz)| QuizSummary {
                id: id.clone(),
                name: quiz.lock().name().to_owned(),
            })
            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
            .collect()
    }
}
