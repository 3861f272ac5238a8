use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::db::queries;

/// Key/value store holding the serialized document between restarts.
pub trait MirrorStorage: Send + Sync {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct SqliteMirror {
    db: Arc<Mutex<Connection>>,
}

impl SqliteMirror {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

impl MirrorStorage for SqliteMirror {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("mirror database lock poisoned"))?;
        queries::get_item(&db, key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("mirror database lock poisoned"))?;
        queries::set_item(&db, key, value)
    }
}

#[derive(Default)]
pub struct MemoryMirror {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryMirror {
    pub fn with_item(key: &str, value: &str) -> Self {
        let mirror = Self::default();
        if let Ok(mut items) = mirror.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        mirror
    }
}

impl MirrorStorage for MemoryMirror {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("mirror lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow::anyhow!("mirror lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_sqlite_mirror_round_trip() {
        let conn = db::init_db(":memory:").unwrap();
        let mirror = SqliteMirror::new(Arc::new(Mutex::new(conn)));

        assert_eq!(mirror.get_item("mockData").unwrap(), None);
        mirror.set_item("mockData", "{}").unwrap();
        assert_eq!(mirror.get_item("mockData").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_memory_mirror_seeded() {
        let mirror = MemoryMirror::with_item("mockData", "[]");
        assert_eq!(mirror.get_item("mockData").unwrap().as_deref(), Some("[]"));
        assert_eq!(mirror.get_item("other").unwrap(), None);
    }
}
