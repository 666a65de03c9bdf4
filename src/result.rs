use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serializer error: {0}")]
    Serializer(#[from] bincode::Error),
    #[error("file is not an employeedb snapshot")]
    BadMagic,
    #[error("snapshot format v{found} is not supported, expected v{expected}")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),
}

pub type DbResult<T> = Result<T, DbError>;
