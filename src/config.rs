// Copyright 2025 Fernando Borretti
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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::Backend;

const DATA_DIR_NAME: &str = ".flashcards";

const CONFIG_FILE_NAME: &str = "config.toml";

/// The optional `config.toml` in the data directory.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub backend: Option<Backend>,
}

/// Where and how review records are stored.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub backend: Backend,
}

impl Config {
    /// Resolve the configuration. Command-line values win over the config
    /// file, which wins over the defaults.
    pub fn load(data_dir: Option<PathBuf>, backend: Option<Backend>) -> Fallible<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let file = ConfigFile::load(&data_dir)?;
        let backend = backend.or(file.backend).unwrap_or_default();
        Ok(Self { data_dir, backend })
    }
}

impl ConfigFile {
    pub fn load(data_dir: &Path) -> Fallible<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading configuration from {}", path.display());
        let content = read_to_string(&path)?;
        Self::parse(&content)
            .map_err(|e| ErrorReport::new(format!("invalid {}: {e}", path.display())))
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

fn default_data_dir() -> Fallible<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| ErrorReport::new("cannot find home directory"))?;
    Ok(home.join(DATA_DIR_NAME))
}
