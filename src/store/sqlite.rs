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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::FingerprintStore;
use crate::types::fingerprint::Fingerprint;
use crate::types::record::MemoryRecord;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(database_path: &Path) -> Fallible<Self> {
        let mut conn = Connection::open(database_path).map_err(|e| {
            ErrorReport::storage_unavailable(format!(
                "failed to open database {}: {e}",
                database_path.display()
            ))
        })?;
        {
            let tx = conn.transaction().map_err(unavailable)?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {}", database_path.display());
                tx.execute_batch(include_str!("schema.sql"))
                    .map_err(unavailable)?;
                tx.commit().map_err(unavailable)?;
            }
        }
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl FingerprintStore for SqliteStore {
    fn lookup(&self, fingerprint: Fingerprint) -> Fallible<Option<MemoryRecord>> {
        let sql = "select fingerprint, easiness, interval, repetitions from records where fingerprint = ?;";
        let mut stmt = self.conn.prepare(sql).map_err(unavailable)?;
        let mut rows = stmt.query([fingerprint]).map_err(unavailable)?;
        let record = match rows.next().map_err(unavailable)? {
            Some(row) => Some(decode_row(row)?),
            None => None,
        };
        Ok(record)
    }

    fn upsert(&mut self, record: &MemoryRecord) -> Fallible<()> {
        log::debug!(
            "Saving record {}: easiness={}, interval={}, repetitions={}",
            record.fingerprint,
            record.easiness,
            record.interval,
            record.repetitions
        );
        let tx = self.conn.transaction().map_err(unavailable)?;
        upsert_record(&tx, record)?;
        tx.commit().map_err(unavailable)?;
        Ok(())
    }

    fn all(&self) -> Fallible<Vec<MemoryRecord>> {
        let sql = "select fingerprint, easiness, interval, repetitions from records order by rowid;";
        let mut stmt = self.conn.prepare(sql).map_err(unavailable)?;
        let mut rows = stmt.query([]).map_err(unavailable)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(unavailable)? {
            records.push(decode_row(row)?);
        }
        Ok(records)
    }
}

/// Updating in place keeps the row's rowid, so `all` keeps first-insertion
/// order.
fn upsert_record(tx: &Transaction, record: &MemoryRecord) -> Fallible<()> {
    let sql = "insert into records (fingerprint, easiness, interval, repetitions) values (?, ?, ?, ?) on conflict (fingerprint) do update set easiness = excluded.easiness, interval = excluded.interval, repetitions = excluded.repetitions;";
    tx.execute(
        sql,
        (
            record.fingerprint,
            record.easiness,
            record.interval,
            record.repetitions,
        ),
    )
    .map_err(unavailable)?;
    Ok(())
}

fn decode_row(row: &Row) -> Fallible<MemoryRecord> {
    let record = MemoryRecord {
        fingerprint: row.get(0).map_err(corrupt)?,
        easiness: row.get(1).map_err(corrupt)?,
        interval: row.get(2).map_err(corrupt)?,
        repetitions: row.get(3).map_err(corrupt)?,
    };
    record.validate()
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx
        .query_row(sql, ["records"], |row| row.get(0))
        .map_err(unavailable)?;
    Ok(count > 0)
}

fn unavailable(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::storage_unavailable(format!("database error: {e}"))
}

fn corrupt(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::corrupt_record(format!("failed to decode stored record: {e}"))
}
