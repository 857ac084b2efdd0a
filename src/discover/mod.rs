//! Endpoint discovery by scraping the tio.run frontend.
//!
//! The submission and catalog paths are not stable: the home page links a
//! fingerprinted frontend script, and that script embeds the current run URL
//! and languages file. We pull all three out with the same patterns the
//! frontend itself is built around and treat the results as opaque paths.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Paths scraped from the frontend, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Path segment under `/cgi-bin/static/` that accepts run requests.
    pub run_url: String,
    /// Path under `/static/` serving the language catalog JSON.
    pub languages_url: String,
}

fn script_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<script src="(/static/[0-9a-f]+-frontend\.js)" defer></script>"#)
            .expect("static pattern compiles")
    })
}

fn run_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^var runURL = "/cgi-bin/static/([^"]+)";$"#)
            .expect("static pattern compiles")
    })
}

fn languages_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^languageFileRequest\.open\("GET", "/static/([^"]+)"\);$"#)
            .expect("static pattern compiles")
    })
}

/// Pull the fingerprinted frontend script path out of the home page.
pub fn script_url(home_page: &str) -> Result<String> {
    capture(script_url_re(), home_page, "script URL")
}

/// Pull the run submission path out of the frontend script.
pub fn run_url(script: &str) -> Result<String> {
    capture(run_url_re(), script, "run URL")
}

/// Pull the language catalog path out of the frontend script.
pub fn languages_url(script: &str) -> Result<String> {
    capture(languages_url_re(), script, "languages URL")
}

fn capture(re: &Regex, haystack: &str, what: &'static str) -> Result<String> {
    re.captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(Error::Scrape(what))
}
