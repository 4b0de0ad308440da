//! Simple configuration persistence for Serenade
//!
//! Stores the last played track and volume so the card resumes where it
//! left off.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Default)]
pub struct Config {
    /// Last track that was loaded
    pub last_track: Option<PathBuf>,
    /// Last volume setting (0.0 - 1.0)
    pub volume: Option<f32>,
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save config to the default location
    pub fn save(&self) -> io::Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = self.serialize();
        fs::write(path, content)
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("serenade")
            .join("config.txt")
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                match key {
                    "last_track" => {
                        if !value.is_empty() {
                            config.last_track = Some(PathBuf::from(value));
                        }
                    }
                    "volume" => {
                        if let Ok(v) = value.parse::<f32>() {
                            config.volume = Some(v.clamp(0.0, 1.0));
                        }
                    }
                    _ => {} // Ignore unknown keys
                }
            }
        }

        config
    }

    /// Serialize config to simple key=value format
    fn serialize(&self) -> String {
        let mut lines = Vec::new();
        lines.push("# Serenade Configuration".to_string());

        if let Some(ref track) = self.last_track {
            lines.push(format!("last_track={}", track.display()));
        }
        if let Some(volume) = self.volume {
            lines.push(format!("volume={}", volume));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let config = Config::parse("");
        assert!(config.last_track.is_none());
        assert!(config.volume.is_none());
    }

    #[test]
    fn test_parse_with_values() {
        let config = Config::parse("last_track=/home/user/song.mp3\nvolume=0.6");
        assert_eq!(config.last_track, Some(PathBuf::from("/home/user/song.mp3")));
        assert_eq!(config.volume, Some(0.6));
    }

    #[test]
    fn test_parse_with_comments() {
        let content = "# Comment\nlast_track=/music/a.ogg\n# Another comment";
        let config = Config::parse(content);
        assert_eq!(config.last_track, Some(PathBuf::from("/music/a.ogg")));
    }

    #[test]
    fn test_parse_clamps_volume() {
        let config = Config::parse("volume=3.5");
        assert_eq!(config.volume, Some(1.0));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config {
            last_track: Some(PathBuf::from("/test/song.flac")),
            volume: Some(0.45),
        };

        let serialized = config.serialize();
        let parsed = Config::parse(&serialized);

        assert_eq!(parsed.last_track, config.last_track);
        assert_eq!(parsed.volume, config.volume);
    }
}
