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

use crate::error::Fallible;
use crate::store::FingerprintStore;
use crate::types::fingerprint::Fingerprint;
use crate::types::record::MemoryRecord;

/// A store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<MemoryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FingerprintStore for MemoryStore {
    fn lookup(&self, fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.fingerprint == fingerprint)
            .cloned())
    }

    fn upsert(&mut self, record: &MemoryRecord) -> Fallible<()> {
        match self
            .records
            .iter_mut()
            .find(|r| r.fingerprint == record.fingerprint)
        {
            Some(existing) => *existing = record.clone(),
            None => self.records.push(record.clone()),
        }
        Ok(())
    }

    fn all(&self) -> Fallible<Vec<MemoryRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str, easiness: f64) -> MemoryRecord {
        MemoryRecord {
            fingerprint: Fingerprint::of(question, "a"),
            easiness,
            interval: 1,
            repetitions: 1,
        }
    }

    #[test]
    fn test_lookup_missing() -> Fallible<()> {
        let store = MemoryStore::new();
        assert_eq!(store.lookup(Fingerprint::of("q", "a"))?, None);
        Ok(())
    }

    #[test]
    fn test_upsert_replaces_in_place() -> Fallible<()> {
        let mut store = MemoryStore::new();
        store.upsert(&record("a", 2.5))?;
        store.upsert(&record("b", 2.0))?;
        store.upsert(&record("a", 1.3))?;
        let all = store.all()?;
        assert_eq!(all, vec![record("a", 1.3), record("b", 2.0)]);
        Ok(())
    }
}
