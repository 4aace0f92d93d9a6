//! Sync-related domain models and configuration.
//!
//! Contains the application configuration (loaded from TOML) and the
//! view state remembered between quote selections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::models::ALL_CATEGORIES;

/// Configuration for the sync loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Interval between reconcile cycles in seconds.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Whether periodic sync is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            enabled: default_enabled(),
        }
    }
}

const fn default_interval() -> u64 {
    30
}

const fn default_enabled() -> bool {
    true
}

/// Configuration for the remote quote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Endpoint serving the remote quote collection (GET and POST).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds. Bounds how long a stalled cycle can
    /// block the next scheduled one.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

const fn default_timeout() -> u64 {
    10
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Sync loop configuration.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Remote service configuration.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quotesync")
    }

    /// Get the quote database path.
    #[must_use]
    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir().join("quotes.db")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// Path of the session state file. Lives in the OS temp directory so
    /// the platform discards it between sessions.
    #[must_use]
    pub fn session_file_path() -> PathBuf {
        std::env::temp_dir().join("quotesync-session.json")
    }
}

/// View state remembered between quote selections.
///
/// `last_shown_index` is an index into the filtered view for
/// `last_shown_category` at the time it was recorded; it is not stable
/// across store mutations and gets clamped on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewState {
    /// Category filter last chosen by the user (persistent).
    pub last_selected_category: String,
    /// Index of the last shown quote within its filtered view (session).
    pub last_shown_index: usize,
    /// Category the index was recorded against (session).
    pub last_shown_category: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            last_selected_category: ALL_CATEGORIES.to_string(),
            last_shown_index: 0,
            last_shown_category: ALL_CATEGORIES.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sync.interval_secs, 30);
        assert!(config.sync.enabled);
        assert_eq!(config.remote.timeout_secs, 10);
        assert!(config.remote.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_default_view_state() {
        let state = ViewState::default();
        assert_eq!(state.last_selected_category, ALL_CATEGORIES);
        assert_eq!(state.last_shown_index, 0);
    }

    #[test]
    fn test_data_dir_override() {
        let config = AppConfig {
            paths: PathConfig {
                data_dir: Some(PathBuf::from("/tmp/custom")),
            },
            ..Default::default()
        };
        assert_eq!(config.storage_db_path(), PathBuf::from("/tmp/custom/quotes.db"));
    }
}
