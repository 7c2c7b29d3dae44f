//! Static configuration: target URLs, named credentials and browser options.
//!
//! Loaded once at start-up and then only ever borrowed.

use crate::error::{E2eError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_UI_BASE_URL: &str = "https://www.saucedemo.com";
pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

/// Named credential sets for the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub standard_user: String,
    pub password: String,
    pub invalid_user: String,
    pub invalid_password: String,
    pub locked_out_user: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            standard_user: "standard_user".to_string(),
            password: "secret_sauce".to_string(),
            invalid_user: "invalid_user".to_string(),
            invalid_password: "invalid_password".to_string(),
            locked_out_user: "locked_out_user".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    pub chrome_path: Option<String>,
    pub headless: bool,
    pub no_sandbox: bool,
    /// Attach to a Chrome already listening on this remote-debugging port
    /// instead of launching one.
    pub debug_port: Option<u16>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        let ci = is_ci();
        Self {
            chrome_path: None,
            // CI environments typically need --no-sandbox and no display
            headless: ci,
            no_sandbox: ci,
            debug_port: None,
        }
    }
}

impl BrowserOptions {
    pub fn headless() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            no_sandbox: true,
            debug_port: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui_base_url: String,
    pub api_base_url: String,
    pub credentials: Credentials,
    pub browser: BrowserOptions,
    /// Per-primitive wait for an element before the action fails.
    pub action_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_base_url: DEFAULT_UI_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            credentials: Credentials::default(),
            browser: BrowserOptions::default(),
            action_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Defaults, then the optional JSON file, then `E2E_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            E2eError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| E2eError::Config(format!("Invalid config {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Local targets, used by tests against servers on random ports.
    pub fn for_targets(ui_base_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            ui_base_url: ui_base_url.into(),
            api_base_url: api_base_url.into(),
            browser: BrowserOptions::headless(),
            ..Self::default()
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("E2E_UI_BASE_URL") {
            self.ui_base_url = v;
        }
        if let Some(v) = lookup("E2E_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("E2E_STANDARD_USER") {
            self.credentials.standard_user = v;
        }
        if let Some(v) = lookup("E2E_PASSWORD") {
            self.credentials.password = v;
        }
        if let Some(v) = lookup("E2E_CHROME_PATH") {
            self.browser.chrome_path = Some(v);
        }
        if let Some(v) = lookup("E2E_HEADLESS") {
            self.browser.headless = parse_flag("E2E_HEADLESS", &v)?;
        }
        if let Some(v) = lookup("E2E_DEBUG_PORT") {
            self.browser.debug_port = Some(parse_port("E2E_DEBUG_PORT", &v)?);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let urls = [
            ("ui_base_url", &self.ui_base_url),
            ("api_base_url", &self.api_base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(E2eError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.action_timeout_ms == 0 {
            return Err(E2eError::Config(
                "action_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Join a path onto the UI base URL.
    pub fn ui_url(&self, path: &str) -> String {
        join_url(&self.ui_base_url, path)
    }

    /// Join a path onto the API base URL.
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(E2eError::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(E2eError::Config(format!(
            "{} must be a port number, got '{}'",
            key, value
        ))),
    }
}

fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "JENKINS_HOME", "CIRCLECI"]
        .iter()
        .any(|key| std::env::var(key).is_ok())
}
