use crate::config::{CONFIG_FILE_PATH, GameConfig};
use crate::settings::{MAX_CHOICES, MIN_CHOICES};
use clap::Parser;
use std::path::PathBuf;

/// Find the color! A color quiz for kids
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct ColorsArgs {
    /// JSON config file
    #[arg(short, long, default_value = CONFIG_FILE_PATH)]
    pub config: PathBuf,
    /// squares per question, overrides the config
    #[arg(short = 'n', long)]
    pub choices: Option<u8>,
    /// where the log goes
    #[arg(short, long, default_value = "learning_colors.log")]
    pub log_file: PathBuf,
    /// no sound at all
    #[arg(short, long)]
    pub mute: bool,
}

impl ColorsArgs {
    pub fn clamped(mut self) -> Self {
        self.choices = self.choices.map(|c| c.clamp(MIN_CHOICES, MAX_CHOICES));
        self
    }

    /// Command line values win over the config file.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(choices) = self.choices {
            config.num_choices = choices;
        }
        config
    }
}
