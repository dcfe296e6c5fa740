use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub hf_api_key: Option<String>,
    pub insight_base_url: String,
    pub insight_model: String,
    pub insight_timeout_secs: u64,
    pub overpass_base_url: String,
    pub locator_radius_km: f64,
    pub locator_timeout_secs: u64,
    pub locator_category: String,
    pub http_user_agent: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field(
                "hf_api_key",
                &self.hf_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("insight_base_url", &self.insight_base_url)
            .field("insight_model", &self.insight_model)
            .field("insight_timeout_secs", &self.insight_timeout_secs)
            .field("overpass_base_url", &self.overpass_base_url)
            .field("locator_radius_km", &self.locator_radius_km)
            .field("locator_timeout_secs", &self.locator_timeout_secs)
            .field("locator_category", &self.locator_category)
            .field("http_user_agent", &self.http_user_agent)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
