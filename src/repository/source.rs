use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;

/// Where the fixture document comes from on first load.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<String>;
}

pub struct FileFixture {
    path: PathBuf,
}

impl FileFixture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FixtureSource for FileFixture {
    async fn fetch(&self) -> anyhow::Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read fixture file: {}", self.path.display()))
    }
}

pub struct HttpFixture {
    client: reqwest::Client,
    url: String,
}

impl HttpFixture {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl FixtureSource for HttpFixture {
    async fn fetch(&self) -> anyhow::Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("failed to request fixture: {}", self.url))?;

        if !resp.status().is_success() {
            anyhow::bail!("fixture request returned {}", resp.status());
        }

        Ok(resp.text().await?)
    }
}

pub struct StaticFixture(pub String);

#[async_trait]
impl FixtureSource for StaticFixture {
    async fn fetch(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Picks an HTTP source for `http(s)://` locations, a file source otherwise.
pub fn fixture_source(location: &str) -> Box<dyn FixtureSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFixture::new(location.to_string()))
    } else {
        Box::new(FileFixture::new(location))
    }
}
