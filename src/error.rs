use std::any::Any;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Failed to connect to Chrome: {0}")]
    ConnectionFailed(String),

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("No page available")]
    NoPage,

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not parse {what} from {value:?}")]
    Parse { what: &'static str, value: String },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Contract violation: {}", .0.join("; "))]
    Contract(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl E2eError {
    /// Expected-vs-actual mismatches, including schema violations.
    pub fn is_assertion(&self) -> bool {
        matches!(self, E2eError::Assertion(_) | E2eError::Contract(_))
    }
}

pub type Result<T> = std::result::Result<T, E2eError>;

/// Anything a scenario can end with besides success.
pub enum Caught {
    /// A failure carrying a message.
    Error(E2eError),
    /// A panic payload from inside the scenario (e.g. a failed `assert!`).
    Panic(Box<dyn Any + Send>),
}

impl Caught {
    /// Normalized, single-line description for the log.
    pub fn describe(&self) -> String {
        match self {
            Caught::Error(e) => e.to_string(),
            Caught::Panic(payload) => {
                if let Some(s) = payload.downcast_ref::<&'static str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "non-error value (opaque panic payload)".to_string()
                }
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Caught::Error(e) if e.is_assertion() => "assertion",
            Caught::Error(_) => "action",
            Caught::Panic(_) => "panic",
        }
    }
}

impl From<E2eError> for Caught {
    fn from(e: E2eError) -> Self {
        Caught::Error(e)
    }
}

/// The one failure signal every scenario ends with.
///
/// Whatever went wrong, the runner sees this type. The original cause is kept
/// for diagnosis but does not change the display text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Scenario '{scenario}' failed due to an unexpected error")]
pub struct ScenarioFailure {
    pub scenario: String,
    pub cause: String,
}

/// Log a caught failure once and turn it into a [`ScenarioFailure`].
///
/// Call sites return the result straight away, so no failure path can end
/// without being logged and surfaced.
#[must_use]
pub fn report(scenario: &str, caught: impl Into<Caught>) -> ScenarioFailure {
    let caught = caught.into();
    let cause = caught.describe();
    log::error!(
        "[{}] {} failure: {}",
        scenario,
        caught.kind(),
        cause
    );
    ScenarioFailure {
        scenario: scenario.to_string(),
        cause,
    }
}
