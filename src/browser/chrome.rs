// spider_chrome re-exports chromiumoxide API
use super::surface::UiSurface;
use crate::config::BrowserOptions;
use crate::error::{E2eError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One browser with one page, owned by a single scenario.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    temp_dir: Option<PathBuf>,
    action_timeout: Duration,
}

/// Connection mode for Chrome browser
pub enum ConnectionMode {
    /// Launch a private Chrome process with its own profile directory
    Sandboxed {
        chrome_path: Option<String>,
        no_sandbox: bool,
        headless: bool,
    },
    /// Connect to an existing Chrome on a debug port
    DebugPort(u16),
}

impl From<&BrowserOptions> for ConnectionMode {
    fn from(options: &BrowserOptions) -> Self {
        match options.debug_port {
            Some(port) => ConnectionMode::DebugPort(port),
            None => ConnectionMode::Sandboxed {
                chrome_path: options.chrome_path.clone(),
                no_sandbox: options.no_sandbox,
                headless: options.headless,
            },
        }
    }
}

impl BrowserSession {
    /// Launch a fresh browser configured by `options`, or attach to the one
    /// listening on `options.debug_port`.
    pub async fn launch(options: &BrowserOptions, action_timeout: Duration) -> Result<Self> {
        Self::new(ConnectionMode::from(options), action_timeout).await
    }

    pub async fn new(mode: ConnectionMode, action_timeout: Duration) -> Result<Self> {
        let (browser, temp_dir) = match mode {
            ConnectionMode::Sandboxed {
                chrome_path,
                no_sandbox,
                headless,
            } => {
                // Unique profile directory so parallel scenarios never share cookies or storage
                let unique_id = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or_default();
                let temp_dir = std::env::temp_dir().join(format!(
                    "storefront-e2e-{}-{}",
                    std::process::id(),
                    unique_id
                ));
                std::fs::create_dir_all(&temp_dir).map_err(|e| {
                    E2eError::LaunchFailed(format!("Failed to create temp directory: {}", e))
                })?;

                let mut config = if headless {
                    BrowserConfig::builder()
                } else {
                    BrowserConfig::builder().with_head()
                };
                config = config.user_data_dir(&temp_dir);

                // Linux AppArmor workaround
                if no_sandbox {
                    config = config.arg("--no-sandbox");
                }
                if let Some(path) = chrome_path {
                    config = config.chrome_executable(path);
                }

                let config = config.build().map_err(|e| {
                    E2eError::LaunchFailed(format!(
                        "{}. Install Chrome/Chromium or set E2E_CHROME_PATH",
                        e
                    ))
                })?;

                let (browser, mut handler) = Browser::launch(config)
                    .await
                    .map_err(|e| E2eError::LaunchFailed(e.to_string()))?;

                tokio::spawn(async move {
                    while (handler.next().await).is_some() {
                        // Drive the CDP connection
                    }
                });

                (browser, Some(temp_dir))
            }
            ConnectionMode::DebugPort(port) => {
                let url = format!("http://localhost:{}", port);
                let (browser, mut handler) = Browser::connect(&url).await.map_err(|e| {
                    E2eError::ConnectionFailed(format!(
                        "Failed to connect to Chrome on port {}. \
                         Make sure Chrome is running with --remote-debugging-port={}: {}",
                        port, port, e
                    ))
                })?;

                tokio::spawn(async move {
                    while (handler.next().await).is_some() {
                        // Drive the CDP connection
                    }
                });

                (browser, None)
            }
        };

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| E2eError::LaunchFailed(format!("Failed to create page: {}", e)))?;

        log::debug!("Browser session ready");

        Ok(Self {
            browser,
            page,
            temp_dir,
            action_timeout,
        })
    }

    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let data = self.page.screenshot(ScreenshotParams::default()).await?;
        Ok(data)
    }

    pub async fn screenshot_to_file(&self, path: &Path) -> Result<()> {
        let data = self.screenshot().await?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    /// Close the browser, or only this session's page when attached to an
    /// existing Chrome.
    pub async fn close(mut self) -> Result<()> {
        if self.temp_dir.is_some() {
            self.browser.close().await?;
        } else {
            self.page.clone().close().await?;
        }
        Ok(())
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.action_timeout
    }

    /// Evaluate a function body and decode its JSON-serialised return value.
    ///
    /// The body must `return` something JSON can represent; `null` is fine.
    async fn eval_json<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        let expression = format!("JSON.stringify((() => {{ {} }})())", body);
        let result = self
            .page
            .evaluate(expression.as_str())
            .await
            .map_err(|e| E2eError::Script(e.to_string()))?;
        let raw: String = result
            .into_value()
            .map_err(|e| E2eError::Script(format!("Script returned no value: {}", e)))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Re-run `body` until it returns non-null or the action timeout passes.
    ///
    /// Script errors while polling (e.g. the document is being replaced by a
    /// navigation) count as "not yet".
    async fn poll_json<T: DeserializeOwned>(&self, body: &str) -> Result<Option<T>> {
        let deadline = self.deadline();
        loop {
            let last_error = match self.eval_json::<Option<T>>(body).await {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => None,
                Err(e) => Some(e),
            };
            if Instant::now() >= deadline {
                return match last_error {
                    Some(e @ E2eError::Json(_)) => Err(e),
                    _ => Ok(None),
                };
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_for_element(&self, selector: &str) -> Result<Element> {
        let deadline = self.deadline();
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if Instant::now() >= deadline => {
                    log::debug!("Gave up waiting for {}: {}", selector, e);
                    return Err(E2eError::ElementNotFound(selector.to_string()));
                }
                Err(_) => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
    }

    async fn find_by_text(&self, selector: &str, text: &str) -> Result<Option<Element>> {
        for element in self.page.find_elements(selector).await? {
            if let Ok(Some(inner)) = element.inner_text().await {
                if inner.trim() == text {
                    return Ok(Some(element));
                }
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl UiSurface for BrowserSession {
    async fn goto(&self, url: &str) -> Result<()> {
        let normalized_url = if !url.starts_with("http://")
            && !url.starts_with("https://")
            && !url.starts_with("file://")
            && !url.starts_with("about:")
            && !url.starts_with("data:")
        {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        log::debug!("Navigating to {}", normalized_url);

        match tokio::time::timeout(NAVIGATION_TIMEOUT, self.page.goto(normalized_url.clone()))
            .await
        {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => {
                let error_str = e.to_string();
                // "oneshot canceled" means the browser connection is gone
                if error_str.contains("oneshot canceled") {
                    Err(E2eError::NavigationFailed(
                        "Browser connection lost. The browser may have been closed or crashed"
                            .to_string(),
                    ))
                } else {
                    Err(E2eError::NavigationFailed(format!(
                        "Failed to navigate to {}: {}",
                        normalized_url, error_str
                    )))
                }
            }
            Err(_) => Err(E2eError::NavigationFailed(format!(
                "Timed out after {}s loading {}",
                NAVIGATION_TIMEOUT.as_secs(),
                normalized_url
            ))),
        }
    }

    async fn current_url(&self) -> Result<String> {
        let url: Option<String> = self.eval_json("return location.href;").await?;
        url.ok_or(E2eError::NoPage)
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let deadline = self.deadline();
        loop {
            let element = self.wait_for_element(selector).await?;
            match element.click().await {
                Ok(_) => {
                    log::debug!("Clicked {}", selector);
                    return Ok(());
                }
                // Attached but not clickable yet (zero size, mid re-render)
                Err(e) if Instant::now() >= deadline => return Err(e.into()),
                Err(_) => tokio::time::sleep(POLL_INTERVAL).await,
            }
        }
    }

    async fn click_text(&self, selector: &str, text: &str) -> Result<()> {
        let deadline = self.deadline();
        loop {
            if let Some(element) = self.find_by_text(selector, text).await? {
                element.click().await?;
                log::debug!("Clicked {} with text '{}'", selector, text);
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(E2eError::ElementNotFound(format!(
                    "{} with text '{}'",
                    selector, text
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let body = format!(
            r#"
            const el = document.querySelector({selector});
            if (!el) return null;
            el.focus();
            const desc = Object.getOwnPropertyDescriptor(Object.getPrototypeOf(el), 'value');
            if (desc && desc.set) {{ desc.set.call(el, {value}); }} else {{ el.value = {value}; }}
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
            "#,
            selector = js_string(selector)?,
            value = js_string(value)?,
        );
        match self.poll_json::<bool>(&body).await? {
            Some(_) => Ok(()),
            None => Err(E2eError::ElementNotFound(selector.to_string())),
        }
    }

    async fn select_by_label(&self, selector: &str, label: &str) -> Result<()> {
        let body = format!(
            r#"
            const el = document.querySelector({selector});
            if (!el) return null;
            const option = Array.from(el.options || [])
                .find(o => o.label.trim() === {label} || o.text.trim() === {label});
            if (!option) return 'no-option';
            const desc = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value');
            desc.set.call(el, option.value);
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return 'ok';
            "#,
            selector = js_string(selector)?,
            label = js_string(label)?,
        );
        match self.poll_json::<String>(&body).await?.as_deref() {
            Some("ok") => Ok(()),
            Some(_) => Err(E2eError::ElementNotFound(format!(
                "option '{}' in {}",
                label, selector
            ))),
            None => Err(E2eError::ElementNotFound(selector.to_string())),
        }
    }

    async fn wait_for(&self, selector: &str) -> Result<()> {
        let body = format!(
            "return document.querySelector({}) ? true : null;",
            js_string(selector)?
        );
        match self.poll_json::<bool>(&body).await? {
            Some(_) => Ok(()),
            None => Err(E2eError::ElementNotFound(selector.to_string())),
        }
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let body = format!(
            r#"
            const el = document.querySelector({});
            if (!el) return null;
            const style = getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            const shown = style.visibility !== 'hidden' && style.display !== 'none'
                && rect.width > 0 && rect.height > 0;
            return shown;
            "#,
            js_string(selector)?
        );
        let shown: Option<bool> = self.eval_json(&body).await?;
        Ok(shown.unwrap_or(false))
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>> {
        let body = format!(
            "const el = document.querySelector({}); return el ? (el.textContent || '') : null;",
            js_string(selector)?
        );
        self.poll_json(&body).await
    }

    async fn all_text_contents(&self, selector: &str) -> Result<Vec<String>> {
        let body = format!(
            "return Array.from(document.querySelectorAll({}), el => el.textContent || '');",
            js_string(selector)?
        );
        self.eval_json(&body).await
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(temp_dir) = &self.temp_dir {
            if temp_dir.exists() {
                let _ = std::fs::remove_dir_all(temp_dir);
            }
        }
    }
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
