use crate::color::{Catalog, ColorName};
use crate::round::TARGET_QUESTIONS;
use crate::settings::{GameSettings, Options};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_PATH: &str = "game_config.json";

/// Contents of the optional JSON config. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_choices: u8,
    pub enabled_colors: Vec<ColorName>,
    pub forced_color: Option<ColorName>,
    pub target_questions: u32,
    pub assets_dir: PathBuf,
    pub speech_cache_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            num_choices: settings.num_choices,
            enabled_colors: Catalog::default().enabled().collect(),
            forced_color: settings.forced_color,
            target_questions: TARGET_QUESTIONS,
            assets_dir: PathBuf::from("assets"),
            speech_cache_dir: PathBuf::from("assets/speech"),
        }
    }
}

impl GameConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.target_questions = config.target_questions.clamp(1, 100);
        Ok(config)
    }

    pub fn options(&self) -> Options {
        Options::new(
            Catalog::with_enabled(&self.enabled_colors),
            GameSettings {
                num_choices: self.num_choices,
                forced_color: self.forced_color,
            },
        )
    }
}

/// Reads `path`, falling back to the defaults on any failure.
pub fn load_config(path: &Path) -> GameConfig {
    let loaded = fs::read_to_string(path)
        .map_err(Into::into)
        .and_then(|text| GameConfig::parse(&text));
    match loaded {
        Ok(config) => {
            log::info!("loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!(
                "error loading configuration from {}, using defaults: {e}",
                path.display()
            );
            GameConfig::default()
        }
    }
}
