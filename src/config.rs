use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub fixture_path: String,
    pub mirror_key: String,
    pub selection_idle_minutes: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "marketplace.db".to_string()),
            fixture_path: env::var("FIXTURE_PATH")
                .unwrap_or_else(|_| "public/mockData.json".to_string()),
            mirror_key: env::var("MIRROR_KEY").unwrap_or_else(|_| "mockData".to_string()),
            selection_idle_minutes: env::var("SELECTION_IDLE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}
