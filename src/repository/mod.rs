//! Persistence for the fixture document.
//!
//! The facade never talks to storage directly; it loads the whole document,
//! edits it and hands it back through [`Repository`]. Which implementation
//! backs it is decided by whoever composes the application.

pub mod memory;
pub mod mirror;
pub mod mirrored;
pub mod source;

use async_trait::async_trait;

use crate::errors::LoadError;
use crate::models::MockData;

pub use memory::InMemoryRepository;
pub use mirror::{MemoryMirror, MirrorStorage, SqliteMirror};
pub use mirrored::MirroredRepository;
pub use source::{fixture_source, FileFixture, FixtureSource, HttpFixture, StaticFixture};

#[async_trait]
pub trait Repository: Send + Sync {
    /// Returns the current document, fetching it on first use.
    async fn load(&self) -> Result<MockData, LoadError>;

    /// Replaces the current document. Never fails from the caller's side.
    async fn save(&self, data: MockData);

    /// Reloads the document from the persistent mirror, if there is a usable one.
    async fn restore(&self);
}
