// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::audio::WavFormat;

/// Environment variables starting with this prefix override file settings,
/// e.g. `TACPACK_DEFAULT_FORMAT=float32`.
pub const ENV_PREFIX: &str = "TACPACK";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Tool-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Encoding used when writing WAV files without an explicit format.
    default_format: WavFormat,
    /// Log filter used when RUST_LOG isn't set.
    log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_format: WavFormat::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from an optional YAML file, then applies `TACPACK_*`
    /// environment overrides. Anything left unset takes its default.
    pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        Ok(builder
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    pub fn default_format(&self) -> WavFormat {
        self.default_format
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Renders the settings as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }
}
