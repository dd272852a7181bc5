//! Player profile: per-mode best scores and the preferred snake color
//!
//! Stored as a small JSON file. A missing or corrupt file yields defaults so
//! the game can always start; only saving surfaces an error.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::SnakeColor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub high_score_classic: u32,
    pub high_score_glide: u32,
    pub snake_color: SnakeColor,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            high_score_classic: 0,
            high_score_glide: 0,
            snake_color: SnakeColor::Solid([255, 182, 193]),
        }
    }
}

impl PlayerProfile {
    /// Load the profile, falling back to defaults on any problem
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(profile) => {
                    log::info!("profile loaded from {}", path.display());
                    profile
                }
                Err(err) => {
                    log::warn!("corrupt profile {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no profile at {}, starting fresh", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("profile saved to {}", path.display());
        Ok(())
    }

    /// Record a finished classic run; true when it set a new best
    pub fn record_classic(&mut self, score: u32) -> bool {
        if score > self.high_score_classic {
            self.high_score_classic = score;
            return true;
        }
        false
    }

    /// Record a finished glide run; true when it set a new best
    pub fn record_glide(&mut self, score: u32) -> bool {
        if score > self.high_score_glide {
            self.high_score_glide = score;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("serpent-arena-test-{name}.json"))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let profile = PlayerProfile::load(Path::new("/nonexistent/profile.json"));
        assert_eq!(profile, PlayerProfile::default());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let path = scratch_path("corrupt");
        fs::write(&path, "not json {").unwrap();
        let profile = PlayerProfile::load(&path);
        assert_eq!(profile, PlayerProfile::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = scratch_path("roundtrip");
        let mut profile = PlayerProfile::default();
        profile.record_classic(12);
        profile.record_glide(7);
        profile.snake_color = SnakeColor::Gradient("rainbow".to_string());
        profile.save(&path).unwrap();
        assert_eq!(PlayerProfile::load(&path), profile);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_record_keeps_the_best() {
        let mut profile = PlayerProfile::default();
        assert!(profile.record_classic(5));
        assert!(!profile.record_classic(3));
        assert_eq!(profile.high_score_classic, 5);
    }
}
