use std::path::PathBuf;

use thiserror::Error;

use crate::schema::StorageKey;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Stored {key} records are malformed: {source}")]
    Malformed {
        key: StorageKey,
        source: serde_json::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize {key} records: {source}")]
    Serialize {
        key: StorageKey,
        source: serde_json::Error,
    },
    #[error("No {key} record with id {id}")]
    NotFound { key: StorageKey, id: u32 },
    #[error("Every {key} id up to u32::MAX is taken")]
    IdsExhausted { key: StorageKey },
    #[error("A to-do needs some text")]
    EmptyTodo,
}
