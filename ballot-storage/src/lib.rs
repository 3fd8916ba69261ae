pub mod error;
pub mod models;
pub mod schema;

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub use crate::error::StorageError;
pub use crate::models::{TodoItem, TodoList};
pub use crate::schema::StorageKey;

/// Load and save of whole datasets.
///
/// A dataset that was never saved loads as an empty list.
pub trait Store {
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>, StorageError>;

    fn save<T: Serialize>(&mut self, key: StorageKey, records: &[T]) -> Result<(), StorageError>;
}

/// One JSON file per dataset inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn path(&self, key: StorageKey) -> PathBuf {
        self.directory.join(key.file_name())
    }
}

impl Store for FileStore {
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>, StorageError> {
        let path = self.path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(%key, path = %path.display(), "nothing stored yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        serde_json::from_str(&contents).map_err(|source| StorageError::Malformed { key, source })
    }

    fn save<T: Serialize>(&mut self, key: StorageKey, records: &[T]) -> Result<(), StorageError> {
        let path = self.path(key);
        let write_error = |source: io::Error| StorageError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.directory).map_err(write_error)?;
        // write next to the target and rename so a crash never leaves half a file
        let file = NamedTempFile::new_in(&self.directory).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|source| StorageError::Serialize { key, source })?;
        writer.flush().map_err(write_error)?;
        let file = writer
            .into_inner()
            .map_err(|error| write_error(error.into_error()))?;
        file.persist(&path)
            .map_err(|error| write_error(error.error))?;

        info!(%key, records = records.len(), path = %path.display(), "saved");
        Ok(())
    }
}

/// Keeps datasets as JSON text in memory, so records still pass through
/// serialization like they would on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    datasets: HashMap<StorageKey, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn raw(&self, key: StorageKey) -> Option<&str> {
        self.datasets.get(&key).map(String::as_str)
    }

    pub fn insert_raw(&mut self, key: StorageKey, json: impl Into<String>) {
        self.datasets.insert(key, json.into());
    }
}

impl Store for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>, StorageError> {
        self.datasets.get(&key).map_or_else(
            || Ok(Vec::new()),
            |json| {
                serde_json::from_str(json).map_err(|source| StorageError::Malformed { key, source })
            },
        )
    }

    fn save<T: Serialize>(&mut self, key: StorageKey, records: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)
            .map_err(|source| StorageError::Serialize { key, source })?;
        self.datasets.insert(key, json);
        Ok(())
    }
}

/// Reads a JSON list that is an input of the application (teams, cocktails).
///
/// Unlike [`Store::load`] a missing file is an error.
pub fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let contents = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::{read_json_list, FileStore, MemoryStore, Store};
    use crate::error::StorageError;
    use crate::schema::StorageKey;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Row {
        id: u32,
        name: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "moritz".to_owned(),
            },
            Row {
                id: 2,
                name: "anna".to_owned(),
            },
        ]
    }

    #[test]
    fn missing_dataset_loads_empty() -> Result<(), StorageError> {
        let directory = tempfile::tempdir().unwrap();
        let store = FileStore::new(directory.path().join("not-yet-created"));
        assert!(store.load::<Row>(StorageKey::Participants)?.is_empty());
        assert!(MemoryStore::new().load::<Row>(StorageKey::Todos)?.is_empty());
        Ok(())
    }

    #[test]
    fn file_store_keeps_datasets_apart() -> Result<(), StorageError> {
        let directory = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(directory.path().join("data"));
        store.save(StorageKey::Participants, &rows())?;
        store.save(StorageKey::Ingredients, &["rum".to_owned()])?;

        assert_eq!(store.load::<Row>(StorageKey::Participants)?, rows());
        assert_eq!(
            store.load::<String>(StorageKey::Ingredients)?,
            vec!["rum".to_owned()]
        );
        assert!(store.path(StorageKey::Participants).ends_with("participants.json"));

        // a second store on the same directory sees the data
        let reopened = FileStore::new(store.directory());
        assert_eq!(reopened.load::<Row>(StorageKey::Participants)?, rows());

        store.save::<Row>(StorageKey::Participants, &[])?;
        assert!(reopened.load::<Row>(StorageKey::Participants)?.is_empty());
        Ok(())
    }

    #[test]
    fn memory_store_serializes_records() -> Result<(), StorageError> {
        let mut store = MemoryStore::new();
        store.save(StorageKey::Participants, &rows())?;
        assert_eq!(
            store.raw(StorageKey::Participants),
            Some(r#"[{"id":1,"name":"moritz"},{"id":2,"name":"anna"}]"#)
        );
        assert_eq!(store.load::<Row>(StorageKey::Participants)?, rows());
        Ok(())
    }

    #[test]
    fn malformed_records_are_reported() {
        let mut store = MemoryStore::new();
        store.insert_raw(StorageKey::Participants, r#"[{"id":"one"}]"#);
        assert!(matches!(
            store.load::<Row>(StorageKey::Participants),
            Err(StorageError::Malformed {
                key: StorageKey::Participants,
                ..
            })
        ));
    }

    #[test]
    fn input_lists_must_exist() {
        let directory = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_json_list::<Row>(&directory.path().join("teams.json")),
            Err(StorageError::Read { .. })
        ));

        let path = directory.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            read_json_list::<Row>(&path),
            Err(StorageError::Parse { .. })
        ));
    }
}
