//! Character list stored in `Flames/config.json`.

#[cfg(feature = "json")]
use std::path::{Path, PathBuf};

#[cfg(feature = "json")]
use tracing::{debug, warn};

#[cfg(feature = "json")]
use crate::ConfigError;

/// One selectable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterEntry {
    /// Folder name under `Flames/`
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
}

impl CharacterEntry {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The list of characters offered in the settings dialog.
///
/// Never empty once resolved: a missing, unreadable or empty config falls
/// back to a single built-in character with id 0.
///
/// ```json
/// { "characters": [ { "id": 0, "name": "Don" }, { "id": 1, "name": "Katsu" } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: Vec<CharacterEntry>,
}

impl CharacterConfig {
    /// Name of the built-in fallback character.
    pub const DEFAULT_NAME: &'static str = "Character 0";

    /// The single built-in character list.
    pub fn builtin() -> Self {
        Self {
            characters: vec![CharacterEntry::new(0, Self::DEFAULT_NAME)],
        }
    }

    /// Replace an empty list with the built-in one.
    pub fn or_builtin(self) -> Self {
        if self.characters.is_empty() {
            Self::builtin()
        } else {
            self
        }
    }

    /// Characters in dialog order.
    pub fn characters(&self) -> &[CharacterEntry] {
        &self.characters
    }

    /// Character shown at startup: the first entry, or id 0.
    pub fn initial_id(&self) -> i32 {
        self.characters.first().map_or(0, |c| c.id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.characters.iter().any(|c| c.id == id)
    }

    pub fn find(&self, id: i32) -> Option<&CharacterEntry> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Path of the config file under an application base dir.
    #[cfg(feature = "json")]
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(crate::ASSET_DIR).join("config.json")
    }

    /// Parse a `config.json` string.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read `Flames/config.json` under `base_dir`.
    ///
    /// A missing file is not an error and yields an empty list.
    #[cfg(feature = "json")]
    pub fn try_load(base_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(base_dir);
        if !path.exists() {
            debug!(path = %path.display(), "no character config");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(&path)?;
        Self::from_json_str(&json)
    }

    /// Read the character list, falling back to the built-in one.
    #[cfg(feature = "json")]
    pub fn load(base_dir: &Path) -> Self {
        let config = match Self::try_load(base_dir) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "character config unreadable, using built-in character");
                Self::default()
            }
        };
        config.or_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_single_character() {
        let config = CharacterConfig::default().or_builtin();
        assert_eq!(config, CharacterConfig::builtin());
        assert_eq!(config.initial_id(), 0);
        assert!(config.contains(0));
    }

    #[test]
    fn non_empty_list_kept() {
        let config = CharacterConfig {
            characters: vec![CharacterEntry::new(4, "Four"), CharacterEntry::new(2, "Two")],
        }
        .or_builtin();
        assert_eq!(config.initial_id(), 4);
        assert_eq!(config.find(2).map(|c| c.name.as_str()), Some("Two"));
        assert!(!config.contains(0));
    }

    #[cfg(feature = "json")]
    #[test]
    fn load_valid_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = CharacterConfig::path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{ "characters": [ { "id": 1, "name": "Katsu" }, { "id": 3, "name": "Don" } ] }"#,
        )
        .unwrap();

        let config = CharacterConfig::load(tmp.path());
        assert_eq!(
            config.characters(),
            &[CharacterEntry::new(1, "Katsu"), CharacterEntry::new(3, "Don")]
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn load_missing_config_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(CharacterConfig::load(tmp.path()), CharacterConfig::builtin());
    }

    #[cfg(feature = "json")]
    #[test]
    fn load_malformed_config_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = CharacterConfig::path(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(CharacterConfig::try_load(tmp.path()).is_err());
        assert_eq!(CharacterConfig::load(tmp.path()), CharacterConfig::builtin());
    }

    #[cfg(feature = "json")]
    #[test]
    fn load_empty_list_falls_back() {
        assert_eq!(
            CharacterConfig::from_json_str(r#"{ "characters": [] }"#).unwrap().or_builtin(),
            CharacterConfig::builtin()
        );
        assert_eq!(
            CharacterConfig::from_json_str("{}").unwrap().or_builtin(),
            CharacterConfig::builtin()
        );
    }
}
