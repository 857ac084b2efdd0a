use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

/// Client constants, loadable from `~/.config/tio_run/.tiorc` (key=value
/// lines) with environment variables taking precedence.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .tiorc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(|l| l.ok()) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        let url = self
            .get("TIO_BASE_URL")
            .unwrap_or_else(|| "https://tio.run".into());
        url.trim_end_matches('/').to_string()
    }

    /// How long `evaluate` waits for a result, in milliseconds.
    pub fn default_timeout_ms(&self) -> u64 {
        self.get_u64("TIO_DEFAULT_TIMEOUT").unwrap_or(10_000)
    }

    /// How long scraped endpoints stay cached, in milliseconds.
    pub fn refresh_interval_ms(&self) -> u64 {
        self.get_u64("TIO_REFRESH_INTERVAL").unwrap_or(850_000)
    }

    /// Outer per-request HTTP timeout, in seconds.
    pub fn request_timeout_secs(&self) -> u64 {
        self.get_u64("TIO_REQUEST_TIMEOUT").unwrap_or(60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load()
    }
}

fn is_config_key(k: &str) -> bool {
    k.starts_with("TIO_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("tio_run").join(".tiorc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("TIO_BASE_URL".into(), "https://tio.run".into());
    m.insert("TIO_DEFAULT_TIMEOUT".into(), "10000".into());
    m.insert("TIO_REFRESH_INTERVAL".into(), "850000".into());
    m.insert("TIO_REQUEST_TIMEOUT".into(), "60".into());
    m
}
