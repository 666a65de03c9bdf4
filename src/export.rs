use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::result::DbResult;
use crate::table::Table;

pub const CSV_HEADER: &str = "ID,Name,Age,Address,Salary";

/// Write `table` as CSV into any writer. Fields are not quoted or escaped.
pub fn write_csv<W: Write>(table: &Table, mut writer: W) -> DbResult<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for record in table.iter() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            record.id(),
            record.name(),
            record.age(),
            record.address(),
            record.salary()
        )?;
    }
    Ok(())
}

pub(crate) fn write_csv_file(table: &Table, path: &Path) -> DbResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_csv(table, &mut writer)?;
    writer.flush()?;

    info!(path = %path.display(), records = table.count(), "table exported to csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_and_bob() -> Table {
        let mut table = Table::new();
        table.insert("Alice", 30, "X", 1000);
        table.insert("Bob", 25, "Y", 2000);
        table
    }

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let mut out = Vec::new();
        write_csv(&alice_and_bob(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Name,Age,Address,Salary\n1,Alice,30,X,1000\n2,Bob,25,Y,2000\n"
        );
    }

    #[test]
    fn empty_table_exports_only_header() {
        let mut out = Vec::new();
        write_csv(&Table::new(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "ID,Name,Age,Address,Salary\n");
    }

    #[test]
    fn export_csv_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("employees.csv");

        alice_and_bob().export_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "1,Alice,30,X,1000", "2,Bob,25,Y,2000"]);
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no_such_dir").join("employees.csv");

        assert!(alice_and_bob().export_csv(&path).is_err());
    }

    #[test]
    fn embedded_commas_are_not_escaped() {
        let mut table = Table::new();
        table.insert("Doe, Jane", 40, "1 Main St, Springfield", 10);

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("1,Doe, Jane,40,1 Main St, Springfield,10"));
    }
}
