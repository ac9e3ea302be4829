use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;


const ENV_ADDRESS: &str = "QUIZBOARD_ADDRESS";
const ENV_STATIC_DIR: &str = "QUIZBOARD_STATIC_DIR";
const ENV_QUIZ_DIR: &str = "QUIZBOARD_QUIZ_DIR";

fn get_default_quiz_dir() -> PathBuf {
    match BaseDirs::new() {
        Some(dirs) => {
            let mut dir = dirs.data_dir().to_path_buf();
            dir.push("quizboard");
            dir.push("quizzes");
            dir
        }
        None => PathBuf::from("quizzes"),
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub address: SocketAddr,
    pub static_dir: PathBuf,
    pub quiz_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: PathBuf::from("static"),
            quiz_dir: get_default_quiz_dir(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(address) = lookup(ENV_ADDRESS) {
            settings.address = address
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", ENV_ADDRESS, address))?;
        }
        if let Some(dir) = lookup(ENV_STATIC_DIR) {
            settings.static_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_QUIZ_DIR) {
            settings.quiz_dir = PathBuf::from(dir);
        }
        Ok(settings)
    }
}
