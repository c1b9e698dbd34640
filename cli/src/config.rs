use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::logger::LogLevel;
use tictactoe_engine::{DEFAULT_MEDIUM_SEARCH_PROBABILITY, Difficulty, SessionSettings};

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub type GameConfigManager = ConfigManager<FileContentConfigProvider, GameConfig, YamlConfigSerializer>;

pub fn get_config_manager(path: Option<&str>) -> GameConfigManager {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub medium_search_probability: f64,
    pub human_first: bool,
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl GameConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            difficulty: self.difficulty,
            human_first: self.human_first,
            medium_search_probability: self.medium_search_probability,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let p = self.medium_search_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(format!(
                "medium_search_probability must be between 0 and 1, got {}",
                p
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            medium_search_probability: DEFAULT_MEDIUM_SEARCH_PROBABILITY,
            human_first: true,
            seed: None,
            log_level: LogLevel::Info,
        }
    }
}
