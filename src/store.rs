//! Storage backends and the main Store tying them together.

use crate::error::{Result, StoreError};
use crate::id::next_id;
use crate::types::{course_matches, Collection, Record, StudentId};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default backing file name.
pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Port for reading and writing the full collection.
///
/// The whole collection is the unit of persistence: `load` materializes it in
/// full, `save` rewrites it in full. Implementations must be safe to share
/// across request handlers.
pub trait StorageBackend: Send + Sync {
    /// Read the full collection.
    ///
    /// A missing, empty, or malformed backing store yields an empty
    /// collection, never an error; malformed content is logged. Only real
    /// IO failures (permissions, hardware) surface as errors.
    fn load(&self) -> Result<Collection>;

    /// Overwrite the full collection.
    fn save(&self, collection: &Collection) -> Result<()>;
}

/// File-backed storage: one pretty-printed JSON document.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file. The file itself is created
    /// lazily on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn load(&self) -> Result<Collection> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Collection::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Collection::new());
        }

        match serde_json::from_str(&content) {
            Ok(collection) => Ok(collection),
            Err(e) => {
                // Permissive on purpose: a corrupt file must never fail a
                // request, but it should not be invisible either.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "malformed backing file, treating as empty collection"
                );
                Ok(Collection::new())
            }
        }
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        // 4-space indent, matching the historical on-disk layout.
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        collection.serialize(&mut serializer)?;

        fs::write(&self.path, buf)?;
        Ok(())
    }
}

/// In-memory storage, for tests and embedding.
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<Collection>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create in-memory storage seeded with a collection.
    pub fn with_collection(collection: Collection) -> Self {
        Self {
            data: Mutex::new(collection),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Collection> {
        Ok(self.data.lock().clone())
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        *self.data.lock() = collection.clone();
        Ok(())
    }
}

/// The student record store.
///
/// Every operation performs a full load-act-save cycle against the backend;
/// nothing is retained in memory between calls. A single per-process lock
/// serializes the cycles so that overlapping mutations cannot clobber each
/// other's writes.
pub struct Store {
    /// Storage backend.
    backend: Box<dyn StorageBackend>,

    /// Serializes read-modify-write cycles against the shared backing store.
    lock: Mutex<()>,
}

impl Store {
    /// Create a store over the given backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            lock: Mutex::new(()),
        }
    }

    /// Get the full collection.
    pub fn list(&self) -> Result<Collection> {
        let _lock = self.lock.lock();
        self.backend.load()
    }

    /// Get the sub-collection of records whose `course` field equals
    /// `course`. Records without the field are excluded.
    pub fn list_by_course(&self, course: &str) -> Result<Collection> {
        let _lock = self.lock.lock();
        let collection = self.backend.load()?;

        Ok(collection
            .into_iter()
            .filter(|(_, record)| course_matches(record, course))
            .collect())
    }

    /// Get a record by ID.
    pub fn get(&self, id: &str) -> Result<Option<Record>> {
        let _lock = self.lock.lock();
        let collection = self.backend.load()?;
        Ok(collection.get(id).cloned())
    }

    /// Insert a record under a freshly allocated ID and return that ID.
    pub fn create(&self, record: Record) -> Result<StudentId> {
        let _lock = self.lock.lock();
        let mut collection = self.backend.load()?;

        let id = next_id(&collection)?;
        collection.insert(id.clone(), record);
        self.backend.save(&collection)?;

        Ok(id)
    }

    /// Fully overwrite the record at `id`, returning the stored record.
    pub fn replace(&self, id: &str, record: Record) -> Result<Record> {
        let _lock = self.lock.lock();
        let mut collection = self.backend.load()?;

        if !collection.contains_key(id) {
            return Err(StoreError::StudentNotFound(id.to_string()));
        }

        collection.insert(id.to_string(), record.clone());
        self.backend.save(&collection)?;

        Ok(record)
    }

    /// Remove the record at `id`.
    pub fn delete(&self, id: &str) -> Result<()> {
        let _lock = self.lock.lock();
        let mut collection = self.backend.load()?;

        if collection.remove(id).is_none() {
            return Err(StoreError::StudentNotFound(id.to_string()));
        }

        self.backend.save(&collection)?;
        Ok(())
    }
}
