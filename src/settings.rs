use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The filmography subject the app ships with (Benedict Cumberbatch).
pub const DEFAULT_PERSON_ID: u64 = 71580;

fn default_person_id() -> u64 {
    DEFAULT_PERSON_ID
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub api_key: String,
    pub language: String,
    #[serde(default = "default_person_id")]
    pub person_id: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: String::from("en-US"),
            person_id: DEFAULT_PERSON_ID,
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("cinelist")
                .join("config.json")
        })
    }

    pub fn load() -> Option<Self> {
        let path = Self::config_path()?;
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path().ok_or("Could not determine config path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
