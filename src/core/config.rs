use crate::models::hand::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// How long a gesture must persist before it is acted on (seconds)
    pub stability_threshold_secs: f32,
    /// Minimum detector confidence for a hand to be reported (0.0-1.0)
    pub min_detection_confidence: f32,
    /// Minimum detector confidence for a hand to stay tracked (0.0-1.0)
    pub min_tracking_confidence: f32,
    /// Maximum number of hands processed per frame (1 or 2)
    pub max_hands: u32,
    /// Frames per second the frontend should capture and ship
    pub target_fps: u32,
    /// Mirror the video feed horizontally before display
    pub mirror_video: bool,
    /// Items shown in the gesture-navigated demo list
    pub list_items: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stability_threshold_secs: 0.5,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
            max_hands: 2,
            target_fps: 30,
            mirror_video: true,
            list_items: (1..=10).map(|n| format!("Item {}", n)).collect(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating with defaults if it doesn't exist
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            // Create default config and save it
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.validate()?;

        let config_path = Self::get_config_path()?;

        // Create parent directories if they don't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(0.05..=10.0).contains(&self.stability_threshold_secs) {
            return Err(format!(
                "Invalid stability threshold: {}. Must be between 0.05 and 10 seconds",
                self.stability_threshold_secs
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_detection_confidence) {
            return Err(format!(
                "Invalid detection confidence: {}. Must be between 0.0 and 1.0",
                self.min_detection_confidence
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.min_tracking_confidence) {
            return Err(format!(
                "Invalid tracking confidence: {}. Must be between 0.0 and 1.0",
                self.min_tracking_confidence
            )
            .into());
        }

        if self.max_hands == 0 || self.max_hands > 2 {
            return Err(format!(
                "Invalid max hands: {}. Must be 1 or 2",
                self.max_hands
            )
            .into());
        }

        if self.target_fps == 0 || self.target_fps > 60 {
            return Err(format!(
                "Invalid target FPS: {}. Must be between 1 and 60",
                self.target_fps
            )
            .into());
        }

        if self.list_items.is_empty() {
            return Err("List items cannot be empty".into());
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Detector configuration derived from the app settings
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            min_detection_confidence: self.min_detection_confidence,
            min_tracking_confidence: self.min_tracking_confidence,
            max_hands: self.max_hands,
            target_fps: self.target_fps,
        }
    }

    /// Get the configuration file path
    fn get_config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| "Could not determine home directory")?;

        let mut path = PathBuf::from(home);
        path.push(".handwave");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
