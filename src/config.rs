use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub search: SearchConfig,
    pub cache: CacheSettings,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_form_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// JSON knowledge base replacing the embedded one.
    pub topics_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub memory_cache_entries: usize,
    pub memory_ttl_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                workers: num_cpus::get(),
                max_form_payload_size: 16 * 1024,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
            search: SearchConfig { topics_path: None },
            cache: CacheSettings {
                memory_cache_entries: 256,
                memory_ttl_seconds: 600,
            },
            client: ClientConfig {
                endpoint: "http://127.0.0.1:5000/search".to_string(),
                timeout_seconds: 30,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Config::default();

        // Server configuration
        if let Ok(host) = env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            config.server.port = port.parse()?;
        }
        if let Ok(workers) = env::var("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Ok(max_form_payload_size) = env::var("MAX_FORM_PAYLOAD_SIZE") {
            config.server.max_form_payload_size = max_form_payload_size.parse()?;
        }

        if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(topics_path) = env::var("LEGAL_TOPICS_PATH") {
            if !topics_path.trim().is_empty() {
                config.search.topics_path = Some(topics_path);
            }
        }

        // Cache configuration
        if let Ok(entries) = env::var("CACHE_ENTRIES") {
            config.cache.memory_cache_entries = entries.parse()?;
        }
        if let Ok(ttl) = env::var("CACHE_TTL_SECONDS") {
            config.cache.memory_ttl_seconds = ttl.parse()?;
        }

        // Client configuration
        if let Ok(endpoint) = env::var("SEARCH_ENDPOINT") {
            config.client.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECONDS") {
            config.client.timeout_seconds = timeout.parse()?;
        }

        Ok(config)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.security.allowed_origins.iter().any(|origin| origin == "*")
    }
}
