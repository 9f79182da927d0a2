use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Durable key-value store backing local charge staging.
///
/// All operations are infallible from the caller's perspective: an
/// implementation that cannot reach its backing medium degrades to
/// empty/no-op behavior and logs, so staging never blocks on a broken disk.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

/// File-per-key store rooted at the config directory (`<key>.json`).
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, path = %path.display(), error = %e, "staging store read failed; treating as empty");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(key, error = %e, "staging store dir create failed; value not persisted");
            return;
        }
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, value) {
            warn!(key, path = %path.display(), error = %e, "staging store write failed; value not persisted");
        }
    }

    fn delete(&mut self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(key, path = %path.display(), error = %e, "staging store delete failed");
            }
        }
    }
}

/// In-memory store, used as the test double for staging logic.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
