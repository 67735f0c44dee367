//! Editor configuration

use crate::errors::{EditorError, EditorResult};
use crate::history::DEFAULT_MAX_HISTORY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a `FormStore`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Snapshots kept for undo (0 = unlimited)
    pub max_history: usize,

    /// Quiet period before an auto-save fires
    pub auto_save_delay_ms: u64,

    /// Initial auto-save switch for a store without persisted state
    pub auto_save_enabled: bool,

    /// Origin used when building shareable links
    pub share_base_url: String,

    /// Reported with every submitted response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl EditorConfig {
    pub fn auto_save_delay(&self) -> Duration {
        Duration::from_millis(self.auto_save_delay_ms)
    }

    pub fn validate(&self) -> EditorResult<()> {
        let base = self.share_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(EditorError::Config(format!(
                "shareBaseUrl must be an http(s) origin, got {:?}",
                self.share_base_url
            )));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            auto_save_delay_ms: 1000,
            auto_save_enabled: true,
            share_base_url: "http://localhost:3000".to_string(),
            user_agent: Some(concat!("formsmith/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.max_history, 50);
        assert_eq!(config.auto_save_delay(), Duration::from_secs(1));
        assert!(config.auto_save_enabled);
    }

    #[test]
    fn test_partial_json() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"maxHistory": 10, "shareBaseUrl": "https://forms.example"}"#)
                .unwrap();
        config.validate().unwrap();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.share_base_url, "https://forms.example");
        assert_eq!(config.auto_save_delay_ms, 1000);
    }

    #[test]
    fn test_rejects_bad_origin() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"shareBaseUrl": "forms.example"}"#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }
}
