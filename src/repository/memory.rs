use std::sync::Mutex;

use async_trait::async_trait;

use super::Repository;
use crate::errors::LoadError;
use crate::models::MockData;

/// Keeps the document in process memory only. Used by tests and local tooling.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    data: Mutex<MockData>,
}

impl InMemoryRepository {
    pub fn new(data: MockData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn snapshot(&self) -> MockData {
        self.data.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn load(&self) -> Result<MockData, LoadError> {
        self.data
            .lock()
            .map(|d| d.clone())
            .map_err(|_| LoadError::Fetch("in-memory document lock poisoned".to_string()))
    }

    async fn save(&self, data: MockData) {
        match self.data.lock() {
            Ok(mut current) => *current = data,
            Err(e) => tracing::warn!(error = %e, "failed to save in-memory document"),
        }
    }

    async fn restore(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_replaces_document() {
        let repo = InMemoryRepository::default();
        let mut data = repo.load().await.unwrap();
        data.categories.push("Beleza".to_string());
        repo.save(data).await;

        assert_eq!(repo.snapshot().categories, vec!["Beleza".to_string()]);
    }

    #[tokio::test]
    async fn test_load_hands_out_copies() {
        let repo = InMemoryRepository::default();
        let mut data = repo.load().await.unwrap();
        data.categories.push("Beleza".to_string());

        assert!(repo.load().await.unwrap().categories.is_empty());
    }
}
