//! Flat file storage
//!
//! Every table is a text file in the data directory. Reads load the whole
//! file; writes rewrite it through a temp file and a rename. A single lock
//! serializes read-modify-write cycles across all tables.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use super::record::{join_line, split_line, LineRecord};

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} line {line}: {reason}")]
    Malformed {
        file: &'static str,
        line: usize,
        reason: String,
    },

    #[error("{file}: field {index} contains a reserved character")]
    InvalidField { file: &'static str, index: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Whether an update closure changed the table
pub enum Outcome<T> {
    Unchanged(T),
    Changed(T),
}

/// Handle to the data directory
#[derive(Clone)]
pub struct DataStore {
    root: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl DataStore {
    /// Open a data directory, creating it if needed
    pub fn open<P: AsRef<Path>>(root: P) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(io_err(&root))?;
        Ok(Self {
            root: Arc::new(root),
            lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a closure with exclusive access to all files
    pub fn with_files<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Files<'_>) -> Result<T, E>,
    {
        let _guard = self.guard();
        f(&Files { root: &self.root })
    }

    /// Load a whole table
    pub fn load<R: LineRecord>(&self) -> StoreResult<Vec<R>> {
        self.with_files(|files| files.load())
    }

    /// Append one record
    pub fn append<R: LineRecord>(&self, record: &R) -> StoreResult<()> {
        self.with_files(|files| files.append(record))
    }

    /// Load a table, let the closure edit it, and rewrite it if it changed
    pub fn update<R, F, T, E>(&self, f: F) -> Result<T, E>
    where
        R: LineRecord,
        F: FnOnce(&mut Vec<R>) -> Result<Outcome<T>, E>,
        E: From<StoreError>,
    {
        self.with_files(|files| {
            let mut records = files.load::<R>()?;
            match f(&mut records)? {
                Outcome::Unchanged(value) => Ok(value),
                Outcome::Changed(value) => {
                    files.rewrite(&records)?;
                    Ok(value)
                }
            }
        })
    }

    /// Size in bytes of a table's file, if present
    pub fn file_size(&self, file: &str) -> Option<u64> {
        fs::metadata(self.root.join(file)).ok().map(|m| m.len())
    }
}

/// File access while the store lock is held
pub struct Files<'a> {
    root: &'a Path,
}

impl Files<'_> {
    pub fn path_of<R: LineRecord>(&self) -> PathBuf {
        self.root.join(R::FILE)
    }

    pub fn exists<R: LineRecord>(&self) -> bool {
        self.path_of::<R>().exists()
    }

    /// Load every record. A missing file is an empty table.
    pub fn load<R: LineRecord>(&self) -> StoreResult<Vec<R>> {
        let path = self.path_of::<R>();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(&path)(e)),
        };

        let mut records = Vec::new();
        for (i, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_line(line, R::FIELDS);
            let record = R::from_fields(&fields).map_err(|reason| StoreError::Malformed {
                file: R::FILE,
                line: i + 1,
                reason,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    fn encode<R: LineRecord>(record: &R) -> StoreResult<String> {
        join_line(&record.to_fields()).map_err(|index| StoreError::InvalidField {
            file: R::FILE,
            index,
        })
    }

    pub fn append<R: LineRecord>(&self, record: &R) -> StoreResult<()> {
        let path = self.path_of::<R>();
        let mut line = Self::encode(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err(&path))?;
        file.write_all(line.as_bytes()).map_err(io_err(&path))?;
        debug!(file = R::FILE, "appended record");
        Ok(())
    }

    /// Replace the whole table
    pub fn rewrite<R: LineRecord>(&self, records: &[R]) -> StoreResult<()> {
        let path = self.path_of::<R>();
        let mut contents = String::new();
        for record in records {
            contents.push_str(&Self::encode(record)?);
            contents.push('\n');
        }

        let tmp = path.with_extension("txt.tmp");
        fs::write(&tmp, contents).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        debug!(file = R::FILE, count = records.len(), "rewrote table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record::parse_field;

    #[derive(Debug, Clone, PartialEq)]
    struct Pair {
        key: String,
        value: u32,
    }

    impl LineRecord for Pair {
        const FILE: &'static str = "pairs.txt";
        const FIELDS: usize = 2;

        fn to_fields(&self) -> Vec<String> {
            vec![self.key.clone(), self.value.to_string()]
        }

        fn from_fields(fields: &[&str]) -> Result<Self, String> {
            match fields {
                [key, value] => Ok(Self {
                    key: key.to_string(),
                    value: parse_field("value", value)?,
                }),
                _ => Err(format!("expected 2 fields, got {}", fields.len())),
            }
        }
    }

    fn pair(key: &str, value: u32) -> Pair {
        Pair {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        assert!(store.load::<Pair>().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        store.append(&pair("a", 1)).unwrap();
        store.append(&pair("b", 2)).unwrap();
        assert_eq!(store.load::<Pair>().unwrap(), vec![pair("a", 1), pair("b", 2)]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pairs.txt"), "a|1\n\n  \nb|2\n").unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        assert_eq!(store.load::<Pair>().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pairs.txt"), "a|1\nb|x\n").unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        match store.load::<Pair>() {
            Err(StoreError::Malformed { file, line, .. }) => {
                assert_eq!(file, "pairs.txt");
                assert_eq!(line, 2);
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_rewrites_only_when_changed() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        store.append(&pair("a", 1)).unwrap();

        let n: usize = store
            .update::<Pair, _, _, StoreError>(|rows| Ok(Outcome::Unchanged(rows.len())))
            .unwrap();
        assert_eq!(n, 1);

        store
            .update::<Pair, _, _, StoreError>(|rows| {
                rows.retain(|p| p.key != "a");
                rows.push(pair("c", 3));
                Ok(Outcome::Changed(()))
            })
            .unwrap();
        assert_eq!(store.load::<Pair>().unwrap(), vec![pair("c", 3)]);
        assert!(!dir.path().join("pairs.txt.tmp").exists());
    }

    #[test]
    fn test_reserved_character_rejected_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let err = store.append(&pair("a|b", 1)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidField { index: 0, .. }));
    }
}
