// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Manager configuration
//!
//! Session-wide settings for a [`HotkeyManager`](crate::manager::HotkeyManager):
//! the platform used to resolve `Mod` and the default key-sequence timeout.
//! Settings can be built in code or loaded from JSON.
//!
//! # Example
//!
//! ```
//! use hotkey_manager::config::ManagerConfig;
//! use hotkey_manager::core::Platform;
//!
//! let config = ManagerConfig::from_json_str(r#"{ "platform": "mac", "sequence_timeout_ms": 750 }"#)?;
//! assert_eq!(config.platform, Some(Platform::Mac));
//! assert_eq!(config.sequence_timeout().as_millis(), 750);
//! # Ok::<(), hotkey_manager::config::ConfigError>(())
//! ```

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::Platform;
use crate::manager::DEFAULT_SEQUENCE_TIMEOUT;

/// Settings shared by every registration of a manager.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Platform used to resolve `Mod`; detected when absent.
    pub platform: Option<Platform>,
    /// Default gap allowed between sequence steps, in milliseconds.
    pub sequence_timeout_ms: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            platform: None,
            sequence_timeout_ms: DEFAULT_SEQUENCE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl ManagerConfig {
    /// Config pinned to one platform, other fields default.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform: Some(platform),
            ..Self::default()
        }
    }

    pub fn sequence_timeout(&self) -> Duration {
        Duration::from_millis(self.sequence_timeout_ms)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON config file; `~` is expanded.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_path(path)?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    /// Rejects settings the manager cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Expands a leading `~` in a path.
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.display().to_string()))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.platform, None);
        assert_eq!(config.sequence_timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ManagerConfig::from_json_str(r#"{ "platform": "windows" }"#).unwrap();
        assert_eq!(config.platform, Some(Platform::Windows));
        assert_eq!(config.sequence_timeout_ms, 1000);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(matches!(
            ManagerConfig::from_json_str(r#"{ "sequence_timeout_ms": 0 }"#),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!(matches!(
            ManagerConfig::from_json_str(r#"{ "platform": "amiga" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = ManagerConfig::load(Path::new("/nonexistent/hotkeys.json"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
