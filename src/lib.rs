//! A tiny in-memory employee table.
//!
//! The whole database is one [`Table`] of [`Record`]s held in memory. It is
//! persisted on demand by writing a full snapshot to a single file and can be
//! exported as CSV.
//!
//! # Example
//!
//! ```
//! use employeedb::Table;
//!
//! let mut table = Table::new();
//! let alice = table.insert("Alice", 30, "X", 1000);
//! table.insert("Bob", 25, "Y", 2000);
//!
//! assert_eq!(alice.id(), 1);
//! assert_eq!(table.select_by_age_range(25, 30).len(), 2);
//! assert_eq!(table.average_salary(), 1500.0);
//! ```

pub mod export;
pub use export::{write_csv, CSV_HEADER};

pub mod result;
pub use result::{DbError, DbResult};

pub mod record;
pub use record::Record;

pub mod snapshot;
pub use snapshot::FORMAT_VERSION;

pub mod table;
pub use table::{Table, MAX_NEXT_ID};

mod encoding;
