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

//! Platform tags and detection
//!
//! The platform decides what the virtual `Mod` modifier means (Meta on mac,
//! Control elsewhere) and how hotkeys are labelled for display.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::core::parser::ParseError;
use crate::core::types::Modifier;

/// Target platform
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Windows,
    Linux,
}

impl Platform {
    /// Canonical modifier the virtual `Mod` resolves to
    pub fn primary_modifier(&self) -> Modifier {
        match self {
            Platform::Mac => Modifier::Meta,
            Platform::Windows | Platform::Linux => Modifier::Control,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Mac => write!(f, "mac"),
            Platform::Windows => write!(f, "windows"),
            Platform::Linux => write!(f, "linux"),
        }
    }
}

impl FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mac" | "macos" | "darwin" => Ok(Platform::Mac),
            "windows" | "win" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            _ => Err(ParseError::InvalidPlatformTag(s.to_string())),
        }
    }
}

/// Detects the platform this binary was built for
///
/// Anything that is neither macOS nor Windows is treated as Linux.
pub fn detect_platform() -> Platform {
    if cfg!(any(target_os = "macos", target_os = "ios")) {
        Platform::Mac
    } else if cfg!(target_os = "windows") {
        Platform::Windows
    } else {
        Platform::Linux
    }
}
