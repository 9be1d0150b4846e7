use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Key under which the recent-search history is stored
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// External string key-value store the widget mirrors its history into
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store backed by a single JSON object on disk.
///
/// The file is re-read on every access so several processes see each other's
/// writes; it is tiny.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; `None` for a missing or blank file
    fn read_contents(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok((!contents.trim().is_empty()).then_some(contents))
    }

    fn parse_entries(&self, contents: &str) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(contents)
            .wrap_err_with(|| format!("corrupt store file {}", self.path.display()))
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match self.read_contents()? {
            Some(contents) => self.parse_entries(&contents),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Writes through a sibling `.tmp` file renamed over the store
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&temp_path, &self.path)
            .wrap_err_with(|| format!("failed to replace {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    /// A file that no longer parses is replaced
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_contents()? {
            Some(contents) => self.parse_entries(&contents).unwrap_or_else(|error| {
                tracing::warn!(%error, "discarding unreadable store file");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Lets a host keep a handle on a store it hands to the widget
impl<S: KeyValueStore> KeyValueStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.borrow_mut().set(key, value)
    }
}

/// Mirrors the history into a store, skipping writes of an unchanged value
pub struct PersistenceBridge {
    store: Box<dyn KeyValueStore>,
    last_written: Option<Vec<String>>,
}

impl PersistenceBridge {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            last_written: None,
        }
    }

    /// Reads the stored history. `Ok(None)` when nothing has been stored yet.
    pub fn load(&mut self) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.store.get(RECENT_SEARCHES_KEY)? else {
            return Ok(None);
        };
        let history: Vec<String> =
            serde_json::from_str(&raw).wrap_err("stored history is not a JSON array of strings")?;
        self.last_written = Some(history.clone());
        Ok(Some(history))
    }

    /// Marks `history` as already persisted
    pub fn mark_synced(&mut self, history: &[String]) {
        self.last_written = Some(history.to_vec());
    }

    /// Writes `history` unless it equals the last value written or loaded.
    /// Returns whether a write happened.
    pub fn sync(&mut self, history: &[String]) -> Result<bool> {
        if self.last_written.as_deref() == Some(history) {
            return Ok(false);
        }
        let serialized = serde_json::to_string(history)?;
        self.store.set(RECENT_SEARCHES_KEY, &serialized)?;
        self.last_written = Some(history.to_vec());
        Ok(true)
    }
}
