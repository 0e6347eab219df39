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

pub mod json;
#[cfg(test)]
pub mod memory;
pub mod sqlite;

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::json::JsonStore;
use crate::store::sqlite::SqliteStore;
use crate::types::fingerprint::Fingerprint;
use crate::types::record::MemoryRecord;

/// Durable mapping from card fingerprints to their review statistics.
///
/// A missing record means the card has never been rated. Implementations
/// must report undecodable entries as `CorruptRecord` rather than as
/// missing.
pub trait FingerprintStore {
    /// Find the record for a fingerprint.
    fn lookup(&self, fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>>;

    /// Insert the record, or replace the existing record with the same
    /// fingerprint.
    fn upsert(&mut self, record: &MemoryRecord) -> Fallible<()>;

    /// Every record, in the order they were first inserted.
    fn all(&self) -> Fallible<Vec<MemoryRecord>>;
}

impl<S: FingerprintStore + ?Sized> FingerprintStore for Box<S> {
    fn lookup(&self, fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>> {
        (**self).lookup(fingerprint)
    }

    fn upsert(&mut self, record: &MemoryRecord) -> Fallible<()> {
        (**self).upsert(record)
    }

    fn all(&self) -> Fallible<Vec<MemoryRecord>> {
        (**self).all()
    }
}

#[derive(ValueEnum, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// An SQLite database file.
    #[default]
    Sqlite,
    /// A JSON document file.
    Json,
}

impl Backend {
    fn extension(self) -> &'static str {
        match self {
            Backend::Sqlite => "db",
            Backend::Json => "json",
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Sqlite => write!(f, "sqlite"),
            Backend::Json => write!(f, "json"),
        }
    }
}

/// The path of a deck's store file inside the data directory.
pub fn store_path(data_dir: &Path, deck_name: &str, backend: Backend) -> PathBuf {
    data_dir.join(format!("{deck_name}.{}", backend.extension()))
}

/// Open (creating if necessary) the store for a deck.
pub fn open_store(
    data_dir: &Path,
    deck_name: &str,
    backend: Backend,
) -> Fallible<Box<dyn FingerprintStore>> {
    create_dir_all(data_dir).map_err(|e| {
        ErrorReport::storage_unavailable(format!(
            "failed to create data directory {}: {e}",
            data_dir.display()
        ))
    })?;
    let path = store_path(data_dir, deck_name, backend);
    log::debug!("Opening {backend} store at {}", path.display());
    let store: Box<dyn FingerprintStore> = match backend {
        Backend::Sqlite => Box::new(SqliteStore::open(&path)?),
        Backend::Json => Box::new(JsonStore::open(&path)?),
    };
    Ok(store)
}
