//! Scenario execution and the run summary.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::{report, Caught, Result, ScenarioFailure};
use crate::scenarios::{ApiContext, ScenarioId, Suite, UiContext};

/// Await one scenario and fold every way it can fail into a [`ScenarioFailure`].
///
/// Both `Err` returns and panics are caught and go through [`report`], so each
/// failure is logged exactly once.
pub async fn run_scenario<F>(name: &str, scenario: F) -> std::result::Result<(), ScenarioFailure>
where
    F: Future<Output = Result<()>>,
{
    match AssertUnwindSafe(scenario).catch_unwind().await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(report(name, e)),
        Err(payload) => Err(report(name, Caught::Panic(payload))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub suite: Suite,
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    /// Uniform failure text shown to the caller
    pub error: Option<String>,
    /// Underlying cause, for diagnosis
    pub cause: Option<String>,
    /// Page capture taken when a UI scenario failed
    pub screenshot: Option<PathBuf>,
}

impl ScenarioResult {
    pub fn from_outcome(
        id: ScenarioId,
        duration_ms: u64,
        outcome: std::result::Result<(), ScenarioFailure>,
    ) -> Self {
        let (status, error, cause) = match outcome {
            Ok(()) => (ScenarioStatus::Passed, None, None),
            Err(failure) => (
                ScenarioStatus::Failed,
                Some(failure.to_string()),
                Some(failure.cause),
            ),
        };
        Self {
            scenario: id.name().to_string(),
            suite: id.suite(),
            status,
            duration_ms,
            error,
            cause,
            screenshot: None,
        }
    }
}

/// Summary of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl Default for SuiteReport {
    fn default() -> Self {
        Self::new()
    }
}

impl SuiteReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            total: 0,
            passed: 0,
            failed: 0,
            total_duration_ms: 0,
            results: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: ScenarioResult) {
        self.total += 1;
        self.total_duration_ms += result.duration_ms;
        match result.status {
            ScenarioStatus::Passed => self.passed += 1,
            ScenarioStatus::Failed => self.failed += 1,
        }
        self.results.push(result);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Passed share as a percentage; 0 for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Failed)
    }

    pub async fn to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Runs catalog scenarios against the configured targets.
///
/// Every UI scenario gets its own freshly launched browser, closed afterwards
/// whatever the outcome. Scenarios run one after another and a failure never
/// stops the rest.
pub struct Runner<'a> {
    config: &'a Config,
    api: ApiClient,
    artifacts: Option<PathBuf>,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            config,
            api: ApiClient::new(config.api_base_url.clone(), config.action_timeout())?,
            artifacts: None,
        })
    }

    /// Save a screenshot into `dir` whenever a UI scenario fails.
    pub fn with_artifacts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts = Some(dir.into());
        self
    }

    pub async fn run_all(&self, ids: &[ScenarioId]) -> SuiteReport {
        let mut report = SuiteReport::new();
        for id in ids {
            report.add_result(self.run(*id).await);
        }
        report.finish();
        info!(
            "{} scenarios, {} passed, {} failed",
            report.total, report.passed, report.failed
        );
        report
    }

    pub async fn run(&self, id: ScenarioId) -> ScenarioResult {
        let started = Instant::now();
        let (outcome, screenshot) = if id.suite().needs_browser() {
            self.run_in_browser(id).await
        } else {
            let ctx = ApiContext { client: &self.api };
            (run_scenario(id.name(), id.run_api(&ctx)).await, None)
        };

        let mut result =
            ScenarioResult::from_outcome(id, started.elapsed().as_millis() as u64, outcome);
        result.screenshot = screenshot;
        result
    }

    async fn run_in_browser(
        &self,
        id: ScenarioId,
    ) -> (std::result::Result<(), ScenarioFailure>, Option<PathBuf>) {
        let session =
            match BrowserSession::launch(&self.config.browser, self.config.action_timeout()).await {
                Ok(session) => session,
                Err(e) => return (Err(report(id.name(), e)), None),
            };

        let outcome = {
            let ctx = UiContext {
                surface: &session,
                config: self.config,
            };
            run_scenario(id.name(), id.run_ui(&ctx)).await
        };

        let screenshot = match (&outcome, &self.artifacts) {
            (Err(_), Some(dir)) => self.capture(&session, dir, id).await,
            _ => None,
        };

        if let Err(e) = session.close().await {
            warn!("[{}] failed to close browser: {}", id.name(), e);
        }
        (outcome, screenshot)
    }

    async fn capture(
        &self,
        session: &BrowserSession,
        dir: &Path,
        id: ScenarioId,
    ) -> Option<PathBuf> {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("[{}] cannot create {}: {}", id.name(), dir.display(), e);
            return None;
        }
        let path = dir.join(format!(
            "{}-{}.png",
            id.name(),
            Utc::now().format("%Y%m%d-%H%M%S")
        ));
        match session.screenshot_to_file(&path).await {
            Ok(()) => {
                info!("[{}] screenshot saved to {}", id.name(), path.display());
                Some(path)
            }
            Err(e) => {
                warn!("[{}] screenshot failed: {}", id.name(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::E2eError;

    #[tokio::test]
    async fn test_run_scenario_passes_through_success() {
        assert!(run_scenario("ok", async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_scenario_reports_errors_and_panics_uniformly() {
        let failed = run_scenario("cart", async {
            Err(E2eError::ElementNotFound(".cart_list".into()))
        })
        .await
        .unwrap_err();

        let panicked = run_scenario("cart", async {
            let items: Vec<String> = Vec::new();
            assert_eq!(items.len(), 1, "cart should hold one item");
            Ok(())
        })
        .await
        .unwrap_err();

        assert_eq!(failed.to_string(), panicked.to_string());
        assert!(failed.cause.contains(".cart_list"));
        assert!(panicked.cause.contains("cart should hold one item"));
    }

    #[tokio::test]
    async fn test_opaque_panic_payload() {
        let failure = run_scenario("opaque", async {
            if true {
                std::panic::panic_any(7_u8);
            }
            Ok(())
        })
        .await
        .unwrap_err();
        assert_eq!(failure.cause, "non-error value (opaque panic payload)");
    }

    #[test]
    fn test_report_counters() {
        let mut report = SuiteReport::new();
        report.add_result(ScenarioResult::from_outcome(ScenarioId::GetProducts, 120, Ok(())));
        report.add_result(ScenarioResult::from_outcome(
            ScenarioId::Logout,
            30,
            Err(ScenarioFailure {
                scenario: "logout".into(),
                cause: "Element not found: #logout_sidebar_link".into(),
            }),
        ));
        report.add_result(ScenarioResult::from_outcome(ScenarioId::AddProduct, 50, Ok(())));

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total_duration_ms, 200);
        assert!(!report.is_success());
        assert!((report.pass_rate() - 66.666).abs() < 0.01);

        let failed: Vec<_> = report.failures().map(|r| r.scenario.as_str()).collect();
        assert_eq!(failed, vec!["logout"]);
        assert_eq!(
            report.results[1].error.as_deref(),
            Some("Scenario 'logout' failed due to an unexpected error")
        );
    }

    #[test]
    fn test_empty_report() {
        let report = SuiteReport::new();
        assert!(report.is_success());
        assert_eq!(report.pass_rate(), 0.0);
    }
}
