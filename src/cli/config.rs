use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use employeedb::{DbError, Table};
use tracing::info;

pub const DEFAULT_SNAPSHOT: &str = "employeedb.snapshot";

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "employeedb",
    version,
    about = "Interactive in-memory employee table with snapshot persistence"
)]
pub struct Args {
    /// Snapshot file restored at startup and written by the backup option
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SNAPSHOT, env = "EMPLOYEEDB_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Fail at startup if the snapshot exists but cannot be restored
    #[arg(long, env = "EMPLOYEEDB_STRICT_RESTORE")]
    pub strict_restore: bool,

    /// Suppress banner and menu (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings the REPL runs with.
#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub strict_restore: bool,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
            strict_restore: false,
            quiet: false,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            snapshot_path: args.snapshot.clone(),
            strict_restore: args.strict_restore,
            quiet: args.quiet,
        }
    }
}

impl Config {
    /// Restore the table from the configured snapshot.
    ///
    /// A missing snapshot always starts an empty table. Any other failure is
    /// an error in strict mode and an empty table otherwise.
    pub fn load_table(&self) -> Result<Table> {
        let path = &self.snapshot_path;

        if !self.strict_restore {
            return Ok(Table::restore_or_default(path));
        }

        match Table::restore(path) {
            Ok(table) => Ok(table),
            Err(DbError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot found, starting with an empty table");
                Ok(Table::new())
            }
            Err(err) => Err(err)
                .with_context(|| format!("failed to restore snapshot {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["employeedb"]).unwrap();
        let config = Config::from(&args);

        assert_eq!(config.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT));
        assert!(!config.strict_restore);
        assert!(!config.quiet);
        assert!(!args.verbose);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "employeedb",
            "--snapshot",
            "/tmp/staff.snapshot",
            "--strict-restore",
            "-q",
        ])
        .unwrap();
        let config = Config::from(&args);

        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/staff.snapshot"));
        assert!(config.strict_restore);
        assert!(config.quiet);
    }

    fn config_for(snapshot_path: PathBuf, strict_restore: bool) -> Config {
        Config {
            snapshot_path,
            strict_restore,
            ..Config::default()
        }
    }

    #[test]
    fn strict_restore_of_missing_snapshot_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path().join("missing.snapshot"), true);

        assert_eq!(config.load_table().unwrap(), Table::new());
    }

    #[test]
    fn strict_restore_of_unreadable_snapshot_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("garbage.snapshot");
        std::fs::write(&path, b"not a snapshot").unwrap();

        let err = config_for(path, true).load_table().unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::BadMagic)));
    }

    #[test]
    fn strict_restore_of_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();

        // reading a directory is an io error other than NotFound
        assert!(config_for(tmp.path().to_path_buf(), true).load_table().is_err());
        assert_eq!(
            config_for(tmp.path().to_path_buf(), false).load_table().unwrap(),
            Table::new()
        );
    }

    #[test]
    fn lenient_restore_of_unreadable_snapshot_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("garbage.snapshot");
        std::fs::write(&path, b"not a snapshot").unwrap();

        assert_eq!(config_for(path, false).load_table().unwrap(), Table::new());
    }

    #[test]
    fn restore_loads_existing_snapshot_in_both_modes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("staff.snapshot");

        let mut table = Table::new();
        table.insert("Alice", 30, "X", 1000);
        table.snapshot(&path).unwrap();

        assert_eq!(config_for(path.clone(), true).load_table().unwrap(), table);
        assert_eq!(config_for(path, false).load_table().unwrap(), table);
    }
}
