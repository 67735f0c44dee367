use formsmith_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "formsmith.config.json";

/// Formsmith configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File holding the persisted editor state
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Editor tunables (history bound, auto-save, share origin)
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_state_file() -> String {
    "formsmith-state.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.editor.validate()?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Absolute path to the state file, `--state` taking precedence
    pub fn state_path(&self, cwd: &Path, overridden: Option<&Path>) -> PathBuf {
        match overridden {
            Some(path) => cwd.join(path),
            None => cwd.join(&self.state_file),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "stateFile": "forms/state.json",
            "maxHistory": 20,
            "autoSaveEnabled": false,
            "shareBaseUrl": "https://forms.example.com"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.state_file, "forms/state.json");
        assert_eq!(config.editor.max_history, 20);
        assert!(!config.editor.auto_save_enabled);
        assert_eq!(config.editor.share_base_url, "https://forms.example.com");
        assert_eq!(config.editor.auto_save_delay_ms, 1000);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.state_file, "formsmith-state.json");
        assert_eq!(config.editor.max_history, 50);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.state_file, "formsmith-state.json");

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{"shareBaseUrl": "ftp://nope"}"#,
        )
        .unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_state_path_override() {
        let config = Config::default();
        let cwd = Path::new("/work");
        assert_eq!(config.state_path(cwd, None), PathBuf::from("/work/formsmith-state.json"));
        assert_eq!(
            config.state_path(cwd, Some(Path::new("other.json"))),
            PathBuf::from("/work/other.json")
        );
    }
}
