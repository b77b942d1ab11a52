//! CSV-backed storage (one file per record type).

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::{Module, Rating, User};

use super::error::{StorageError, StorageResult};
use super::store::{ModuleStore, RatingStore, UserStore};

pub const USERS_FILE: &str = "users.csv";
pub const MODULES_FILE: &str = "modules.csv";
pub const RATINGS_FILE: &str = "ratings.csv";

#[derive(Debug)]
/// Stores users, modules and ratings as headed CSV files under one directory.
///
/// Appends from concurrent callers are serialized by an internal lock.
pub struct CsvStore {
    data_path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvStore {
    /// Creates a store rooted at `data_path`. Nothing is touched on disk.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the data directory.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Ensures the data directory exists, creating it if missing.
    pub fn ensure_data_path(&self) -> StorageResult<()> {
        if !self.data_path.exists() {
            fs::create_dir_all(&self.data_path).map_err(|source| StorageError::CreateDataDir {
                path: self.data_path.clone(),
                source,
            })?;
        }
        if !self.data_path.is_dir() {
            return Err(StorageError::DataDirUnavailable {
                path: self.data_path.clone(),
            });
        }
        Ok(())
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.data_path.join(name)
    }

    fn read_records<T: DeserializeOwned>(&self, name: &str, required: bool) -> StorageResult<Vec<T>> {
        let path = self.file_path(name);

        if !path.exists() {
            if required {
                return Err(StorageError::NotFound { path });
            }
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| StorageError::Csv {
                path: path.clone(),
                source,
            })?;

        let records = reader
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()
            .map_err(|source| StorageError::Csv {
                path: path.clone(),
                source,
            })?;

        debug!(file = name, count = records.len(), "Loaded records");
        Ok(records)
    }

    fn append_record<T: Serialize>(&self, name: &str, record: &T) -> StorageResult<()> {
        let _guard = self.write_lock.lock();

        self.ensure_data_path()?;
        let path = self.file_path(name);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let len = file.metadata()?.len();
        let write_header = len == 0;
        if !write_header && !ends_with_newline(&mut file, len)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        writer
            .serialize(record)
            .map_err(|source| StorageError::Csv {
                path: path.clone(),
                source,
            })?;
        writer.flush()?;

        Ok(())
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> StorageResult<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl UserStore for CsvStore {
    fn load_all(&self) -> StorageResult<Vec<User>> {
        self.read_records(USERS_FILE, false)
    }

    fn append(&self, user: &User) -> StorageResult<()> {
        self.append_record(USERS_FILE, user)
    }
}

impl ModuleStore for CsvStore {
    fn load_all(&self) -> StorageResult<Vec<Module>> {
        self.read_records(MODULES_FILE, true)
    }
}

impl RatingStore for CsvStore {
    fn load_all(&self) -> StorageResult<Vec<Rating>> {
        self.read_records(RATINGS_FILE, false)
    }

    fn append(&self, rating: &Rating) -> StorageResult<()> {
        self.append_record(RATINGS_FILE, rating)
    }
}
