pub mod api;
pub mod assertions;
pub mod browser;
pub mod config;
pub mod error;
pub mod pages;
pub mod runner;
pub mod scenarios;

//  Re-export commonly used items
pub use api::{ApiClient, ApiResponse, NewProduct, Schema};
pub use browser::{BrowserSession, ConnectionMode, UiSurface};
pub use config::{BrowserOptions, Config, Credentials};
pub use error::{report, Caught, E2eError, Result, ScenarioFailure};
pub use pages::{CartPage, CheckoutPage, InventoryPage, LoginPage, SortOrder};
pub use runner::{run_scenario, Runner, ScenarioResult, ScenarioStatus, SuiteReport};
pub use scenarios::{ApiContext, ScenarioId, Suite, UiContext};
