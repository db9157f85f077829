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

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading manager configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    /// Path could not be expanded or is not valid UTF-8.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),
    /// JSON could not be deserialised.
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A sequence timeout of zero would make every sequence time out.
    #[error("Sequence timeout must be greater than zero")]
    InvalidTimeout,
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
