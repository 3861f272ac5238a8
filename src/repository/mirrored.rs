use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{FixtureSource, MirrorStorage, Repository};
use crate::errors::LoadError;
use crate::models::MockData;

/// Production repository: the fixture is fetched once and cached, and every
/// save is copied into the persistent mirror on a best-effort basis.
pub struct MirroredRepository {
    source: Box<dyn FixtureSource>,
    mirror: Box<dyn MirrorStorage>,
    mirror_key: String,
    cache: Mutex<Option<MockData>>,
}

impl MirroredRepository {
    pub fn new(
        source: Box<dyn FixtureSource>,
        mirror: Box<dyn MirrorStorage>,
        mirror_key: impl Into<String>,
    ) -> Self {
        Self {
            source,
            mirror,
            mirror_key: mirror_key.into(),
            cache: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Repository for MirroredRepository {
    async fn load(&self) -> Result<MockData, LoadError> {
        // Held across the fetch so concurrent first loads share one request.
        let mut cache = self.cache.lock().await;
        if let Some(data) = cache.as_ref() {
            return Ok(data.clone());
        }

        let body = self.source.fetch().await.map_err(|e| {
            tracing::error!(error = %e, "error loading fixture");
            LoadError::Fetch(format!("{e:#}"))
        })?;

        let data: MockData = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "error parsing fixture");
            LoadError::Parse(e)
        })?;

        tracing::info!(
            bookings = data.bookings.len(),
            services = data.services.len(),
            "fixture loaded"
        );

        *cache = Some(data.clone());
        Ok(data)
    }

    async fn save(&self, data: MockData) {
        let serialized = serde_json::to_string(&data);
        *self.cache.lock().await = Some(data);

        let result = serialized
            .map_err(anyhow::Error::from)
            .and_then(|json| self.mirror.set_item(&self.mirror_key, &json));

        match result {
            Ok(()) => tracing::debug!(key = %self.mirror_key, "document mirrored"),
            Err(e) => tracing::warn!(error = %e, key = %self.mirror_key, "failed to mirror document"),
        }
    }

    async fn restore(&self) {
        let stored = match self.mirror.get_item(&self.mirror_key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(error = %e, "error reading mirror");
                return;
            }
        };

        match serde_json::from_str::<MockData>(&stored) {
            Ok(data) => {
                tracing::info!(bookings = data.bookings.len(), "restored document from mirror");
                *self.cache.lock().await = Some(data);
            }
            Err(e) => tracing::error!(error = %e, "error restoring from mirror"),
        }
    }
}
