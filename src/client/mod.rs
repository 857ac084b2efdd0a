//! Reqwest-based client for the tio.run execution service.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::catalog::{self, Language};
use crate::config::Config;
use crate::discover::{self, Endpoints};
use crate::error::{Error, Result};
use crate::options::EvaluateOptions;
use crate::response::{self, Status};
use crate::wire::{self, State};

/// Outcome of one evaluation. `debug` and `warnings` accompany a passed run;
/// a timed-out run carries only the human-readable message in `output`.
#[derive(Debug, Clone)]
pub struct EvaluateResult {
    pub status: Status,
    pub language: Language,
    pub output: String,
    pub debug: Option<String>,
    pub warnings: Option<String>,
}

#[derive(Default)]
struct Cached {
    endpoints: Option<Endpoints>,
    next_refresh: Option<Instant>,
    languages: Vec<Language>,
}

pub struct Client {
    http: reqwest::Client,
    base_url: String,
    default_timeout: Duration,
    refresh_interval: Duration,
    cached: Mutex<Cached>,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::load())
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs()))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url(),
            default_timeout: Duration::from_millis(cfg.default_timeout_ms()),
            refresh_interval: Duration::from_millis(cfg.refresh_interval_ms()),
            cached: Mutex::new(Cached::default()),
        })
    }

    /// Scrape the run and catalog paths, reusing the cached pair until the
    /// refresh interval elapses.
    async fn prepare(&self) -> Result<Endpoints> {
        let mut cached = self.cached.lock().await;
        if let Some(endpoints) = &cached.endpoints {
            if matches!(cached.next_refresh, Some(at) if Instant::now() < at) {
                return Ok(endpoints.clone());
            }
        }

        let home = self.fetch_text(&self.base_url).await?;
        let script_path = discover::script_url(&home)?;
        let script = self
            .fetch_text(&format!("{}{}", self.base_url, script_path))
            .await?;

        let endpoints = Endpoints {
            run_url: discover::run_url(&script)?,
            languages_url: discover::languages_url(&script)?,
        };
        cached.endpoints = Some(endpoints.clone());
        cached.next_refresh = Some(Instant::now() + self.refresh_interval);
        Ok(endpoints)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.http.get(url).send().await?.text().await?)
    }

    /// The language catalog, fetched once and cached for the client's
    /// lifetime.
    pub async fn languages(&self) -> Result<Vec<Language>> {
        {
            let cached = self.cached.lock().await;
            if !cached.languages.is_empty() {
                return Ok(cached.languages.clone());
            }
        }

        let endpoints = self.prepare().await?;
        let url = format!("{}/static/{}", self.base_url, endpoints.languages_url);
        let data: serde_json::Value = self.http.get(&url).send().await?.json().await?;
        let languages = catalog::parse(&data)?;

        let mut cached = self.cached.lock().await;
        cached.languages = languages.clone();
        Ok(languages)
    }

    /// Evaluate with the configured default timeout.
    pub async fn evaluate(&self, options: &EvaluateOptions) -> Result<EvaluateResult> {
        self.evaluate_with_timeout(options, self.default_timeout).await
    }

    /// Evaluate a piece of code, waiting up to `timeout` for the result.
    ///
    /// A zero timeout submits the request without waiting for its body; the
    /// result then classifies as timed out. Timeouts are data, not errors:
    /// only validation, catalog, transport and decode failures return `Err`.
    pub async fn evaluate_with_timeout(
        &self,
        options: &EvaluateOptions,
        timeout: Duration,
    ) -> Result<EvaluateResult> {
        options.validate()?;

        let languages = self.languages().await?;
        let language = languages
            .iter()
            .find(|l| l.id == options.language)
            .cloned()
            .ok_or_else(|| Error::UnknownLanguage(options.language.clone()))?;

        let text = self.execute(options, timeout).await?;
        let sections = response::classify(text.as_deref(), timeout);

        Ok(EvaluateResult {
            status: sections.status,
            language,
            output: sections.output,
            debug: sections.debug,
            warnings: sections.warnings,
        })
    }

    /// Encode, compress and POST one request; wait for the body at most
    /// `timeout`. `Ok(None)` means no response text arrived in time.
    async fn execute(
        &self,
        options: &EvaluateOptions,
        timeout: Duration,
    ) -> Result<Option<String>> {
        let endpoints = self.prepare().await?;

        let body = wire::compress(&State::from_options(options).encode());
        let token = wire::generate_random_bits(128);
        let url = format!(
            "{}/cgi-bin/static/{}/{}",
            self.base_url, endpoints.run_url, token
        );

        let response = self.http.post(&url).body(body).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        if timeout.is_zero() {
            // Caller opted out of waiting for a result.
            return Ok(None);
        }

        // Race the body read against the timeout. Dropping the response on
        // the timer path aborts the in-flight transfer.
        let raw = match tokio::time::timeout(timeout, response.bytes()).await {
            Ok(bytes) => bytes?,
            Err(_) => return Ok(None),
        };

        Ok(Some(wire::decompress(&raw)?))
    }
}
