//! On-disk snapshot of a [`Table`].
//!
//! A snapshot file holds a fixed header (magic + format version) followed by
//! the table itself, all bincode encoded. The header is decoded first so a
//! file from another format version is refused before its body is parsed.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoding::{decode, encode};
use crate::result::{DbError, DbResult};
use crate::table::{RawTable, Table};

const MAGIC: [u8; 4] = *b"EMDB";

/// Current snapshot format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    header: Header,
    table: &'a Table,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    #[allow(dead_code)]
    header: Header,
    table: RawTable,
}

pub(crate) fn write(table: &Table, path: &Path) -> DbResult<()> {
    let bytes = encode(&SnapshotRef {
        header: Header {
            magic: MAGIC,
            version: FORMAT_VERSION,
        },
        table,
    })?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    info!(
        path = %path.display(),
        records = table.count(),
        bytes = bytes.len(),
        "snapshot written"
    );
    Ok(())
}

pub(crate) fn read(path: &Path) -> DbResult<Table> {
    let bytes = std::fs::read(path)?;
    let table = from_bytes(&bytes)?;

    info!(path = %path.display(), records = table.count(), "snapshot restored");
    Ok(table)
}

pub(crate) fn read_or_default(path: &Path) -> Table {
    match read(path) {
        Ok(table) => table,
        Err(DbError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting with an empty table");
            Table::new()
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "snapshot could not be restored, starting with an empty table"
            );
            Table::new()
        }
    }
}

fn from_bytes(bytes: &[u8]) -> DbResult<Table> {
    let header: Header = decode(bytes)?;
    if header.magic != MAGIC {
        return Err(DbError::BadMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(DbError::VersionMismatch {
            found: header.version,
            expected: FORMAT_VERSION,
        });
    }

    let snapshot: SnapshotOwned = decode(bytes)?;
    Table::try_from(snapshot.table)
}
