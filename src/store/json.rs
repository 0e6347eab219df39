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

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::FingerprintStore;
use crate::types::fingerprint::Fingerprint;
use crate::types::record::MemoryRecord;

/// A store kept as a JSON array of records in a single file.
///
/// The whole file is decoded when the store is opened, so a corrupt entry
/// is reported there. Every write replaces the file through a temporary
/// sibling and a rename.
pub struct JsonStore {
    path: PathBuf,
    records: Vec<MemoryRecord>,
}

impl JsonStore {
    pub fn open(path: &Path) -> Fallible<Self> {
        let exists = path.try_exists().map_err(|e| {
            ErrorReport::storage_unavailable(format!("failed to access {}: {e}", path.display()))
        })?;
        let records = if exists {
            log::debug!("Loading records from {}", path.display());
            let content = fs::read_to_string(path).map_err(|e| {
                ErrorReport::storage_unavailable(format!(
                    "failed to read {}: {e}",
                    path.display()
                ))
            })?;
            decode_records(&content)?
        } else {
            log::debug!("Using empty record file.");
            Vec::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    fn write(&self, records: &[MemoryRecord]) -> Fallible<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .and_then(|_| fs::rename(&tmp_path, &self.path))
            .map_err(|e| {
                ErrorReport::storage_unavailable(format!(
                    "failed to write {}: {e}",
                    self.path.display()
                ))
            })
    }
}

impl FingerprintStore for JsonStore {
    fn lookup(&self, fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.fingerprint == fingerprint)
            .cloned())
    }

    fn upsert(&mut self, record: &MemoryRecord) -> Fallible<()> {
        log::debug!(
            "Saving record {}: easiness={}, interval={}, repetitions={}",
            record.fingerprint,
            record.easiness,
            record.interval,
            record.repetitions
        );
        let mut records = self.records.clone();
        match records
            .iter_mut()
            .find(|r| r.fingerprint == record.fingerprint)
        {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        // Only adopt the new state once it is on disk.
        self.write(&records)?;
        self.records = records;
        Ok(())
    }

    fn all(&self) -> Fallible<Vec<MemoryRecord>> {
        Ok(self.records.clone())
    }
}

fn decode_records(content: &str) -> Fallible<Vec<MemoryRecord>> {
    let values: Vec<Value> = serde_json::from_str(content)
        .map_err(|e| ErrorReport::corrupt_record(format!("malformed record file: {e}")))?;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let record: MemoryRecord = serde_json::from_value(value).map_err(|e| {
            ErrorReport::corrupt_record(format!("malformed record at index {index}: {e}"))
        })?;
        let record = record.validate()?;
        if !seen.insert(record.fingerprint) {
            return Err(ErrorReport::corrupt_record(format!(
                "duplicate record for {}",
                record.fingerprint
            )));
        }
        records.push(record);
    }
    Ok(records)
}
