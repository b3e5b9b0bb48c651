use super::keymap::KeyConfig;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const MAX_RECENT: usize = 9;

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub keymap: KeyConfig,
    #[serde(default)]
    pub palette: PaletteType,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentTemplates {
    paths: Vec<PathBuf>,
}

fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("letterpress");
        path
    })
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

fn recent_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("recent.toml"))
}

/// Missing or unreadable config falls back to defaults; a template editor
/// should not refuse to start over a bad dotfile.
#[must_use]
pub fn load_config() -> Config {
    if let Some(path) = config_path() {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str::<Config>(&content) {
                    return config;
                }
            }
        }
    }
    Config::default()
}

#[must_use]
pub fn load_recent() -> Vec<PathBuf> {
    if let Some(path) = recent_path() {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(recent) = toml::from_str::<RecentTemplates>(&content) {
                    return recent.paths;
                }
            }
        }
    }
    Vec::new()
}

pub fn save_recent(paths: &[PathBuf]) {
    if let Some(path) = recent_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let recent = RecentTemplates {
            paths: paths.iter().take(MAX_RECENT).cloned().collect(),
        };

        if let Ok(content) = toml::to_string(&recent) {
            let _ = std::fs::write(path, content);
        }
    }
}

/// Move (or insert) `path` to the front of the recent list.
#[must_use]
pub fn push_recent(mut recent: Vec<PathBuf>, path: PathBuf) -> Vec<PathBuf> {
    recent.retain(|p| p != &path);
    recent.insert(0, path);
    recent.truncate(MAX_RECENT);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_recent_dedupes_and_caps() {
        let mut recent = Vec::new();
        for i in 0..12 {
            recent = push_recent(recent, PathBuf::from(format!("t{i}.json")));
        }
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent[0], PathBuf::from("t11.json"));

        let len = recent.len();
        recent = push_recent(recent, PathBuf::from("t11.json"));
        assert_eq!(recent.len(), len);
        assert_eq!(recent[0], PathBuf::from("t11.json"));
    }

    #[test]
    fn config_parses_partial_files() {
        let config: Config = toml::from_str("[keymap]\nprofile = \"vim\"\n").unwrap();
        assert_eq!(config.keymap.profile, "vim");
        assert_eq!(config.palette, PaletteType::default());

        let config: Config = toml::from_str("palette = \"nord\"\n").unwrap();
        assert_eq!(config.palette, PaletteType::Nord);
    }
}
