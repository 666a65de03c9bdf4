use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export;
use crate::record::Record;
use crate::result::{DbError, DbResult};
use crate::snapshot;

/// The employee table.
///
/// [`Table`] owns its records in insertion order together with the counter
/// used to assign ids. Every lookup is a linear scan; there are no indexes.
///
/// Mutating operations take `&mut self`. The table does no locking of its
/// own, so a host that shares it between threads must wrap it in a lock.
///
/// Deserializing a table goes through [`Table::try_from`], so a decoded
/// table always satisfies the id invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    records: Vec<Record>,
    next_id: u64,
}

/// Largest counter value a restored table may carry. Keeps `insert` from
/// ever reaching `u64::MAX`.
pub const MAX_NEXT_ID: u64 = i64::MAX as u64;

/// Unvalidated table fields as they come out of a decoder.
#[derive(Deserialize)]
pub(crate) struct RawTable {
    records: Vec<Record>,
    next_id: u64,
}

impl TryFrom<RawTable> for Table {
    type Error = DbError;

    fn try_from(raw: RawTable) -> DbResult<Self> {
        let table = Self {
            records: raw.records,
            next_id: raw.next_id,
        };
        table.check_invariants()?;
        Ok(table)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Creates an empty table whose first record will get id 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Id the next inserted record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Insert a new record at the end of the table.
    ///
    /// # Returns
    ///
    /// A copy of the stored record, carrying its newly assigned id.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        age: i32,
        address: impl Into<String>,
        salary: i64,
    ) -> Record {
        let record = Record::new(self.next_id, name.into(), age, address.into(), salary);
        self.next_id += 1;

        debug!(id = record.id, "inserted record");
        self.records.push(record.clone());

        record
    }

    /// Borrowing iterator over the records in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// All records in table order.
    pub fn select_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Select a record by its ID.
    ///
    /// # Returns
    ///
    /// An [`Option`] containing a copy of the record if it exists, or [`None`] otherwise.
    pub fn select_by_id(&self, id: u64) -> Option<Record> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    /// Select every record whose name equals `name`, ignoring case.
    pub fn select_by_name(&self, name: &str) -> Vec<Record> {
        let wanted = name.to_lowercase();

        self.records
            .iter()
            .filter(|record| record.name.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Select every record with `min_age <= age <= max_age`.
    pub fn select_by_age_range(&self, min_age: i32, max_age: i32) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| (min_age..=max_age).contains(&record.age))
            .cloned()
            .collect()
    }

    /// Delete a record by its ID.
    ///
    /// # Returns
    ///
    /// `true` if a record was removed.
    pub fn delete_by_id(&mut self, id: u64) -> bool {
        match self.records.iter().position(|record| record.id == id) {
            Some(position) => {
                self.records.remove(position);
                debug!(id, "deleted record");
                true
            }
            None => false,
        }
    }

    /// Set the salary of the record with the given ID. No other field changes.
    ///
    /// # Returns
    ///
    /// `true` if the record was found.
    pub fn update_salary_by_id(&mut self, id: u64, salary: i64) -> bool {
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                debug!(id, old = record.salary, new = salary, "updated salary");
                record.salary = salary;
                true
            }
            None => false,
        }
    }

    /// Reorder the table by ascending salary. The sort is stable, so equal
    /// salaries keep their current relative order.
    pub fn sort_by_salary(&mut self) {
        self.records.sort_by_key(|record| record.salary);
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Highest salary, or 0 for an empty table.
    pub fn max_salary(&self) -> i64 {
        self.records.iter().map(|record| record.salary).max().unwrap_or(0)
    }

    /// Lowest salary, or 0 for an empty table.
    pub fn min_salary(&self) -> i64 {
        self.records.iter().map(|record| record.salary).min().unwrap_or(0)
    }

    /// Mean salary, or 0.0 for an empty table.
    pub fn average_salary(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }

        let total: i128 = self.records.iter().map(|record| record.salary as i128).sum();
        total as f64 / self.records.len() as f64
    }

    /// Write the table as CSV to `path`.
    ///
    /// Fields are joined with commas and never quoted, so names or addresses
    /// containing a comma produce extra columns.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> DbResult<()> {
        export::write_csv_file(self, path.as_ref())
    }

    /// Serialize the whole table, counter included, to `path`.
    ///
    /// An existing file is overwritten in place. A crash mid-write can leave
    /// a truncated file behind.
    pub fn snapshot(&self, path: impl AsRef<Path>) -> DbResult<()> {
        snapshot::write(self, path.as_ref())
    }

    /// Load a table previously written by [`Table::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable, is not a
    /// snapshot, was written by another format version, or holds records
    /// that break the id invariants.
    pub fn restore(path: impl AsRef<Path>) -> DbResult<Self> {
        snapshot::read(path.as_ref())
    }

    /// Like [`Table::restore`], but any failure yields a fresh empty table.
    ///
    /// The caller cannot tell a first start from a damaged snapshot; the
    /// reason is only reported through the log.
    pub fn restore_or_default(path: impl AsRef<Path>) -> Self {
        snapshot::read_or_default(path.as_ref())
    }

    /// Verify that the counter is in range and ids are distinct and below it.
    pub(crate) fn check_invariants(&self) -> DbResult<()> {
        if self.next_id == 0 {
            return Err(DbError::Corrupt("next id must be at least 1".to_owned()));
        }
        if self.next_id > MAX_NEXT_ID {
            return Err(DbError::Corrupt(format!(
                "next id {} exceeds the maximum {MAX_NEXT_ID}",
                self.next_id
            )));
        }

        let mut seen = HashSet::with_capacity(self.records.len());

        for record in &self.records {
            if !seen.insert(record.id) {
                return Err(DbError::Corrupt(format!("duplicate id {}", record.id)));
            }
            if record.id >= self.next_id {
                return Err(DbError::Corrupt(format!(
                    "id {} is not below the next id {}",
                    record.id, self.next_id
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(records: Vec<Record>, next_id: u64) -> Self {
        Self { records, next_id }
    }
}
