//! The scenario catalog.
//!
//! Every scenario is an `async fn` over a context that returns `Result<()>`;
//! the first failed action or expectation ends it. [`ScenarioId`] names each
//! one, knows its suite, and dispatches to it after the suite's
//! `before_each` precondition.

pub mod api;
pub mod auth;
pub mod shop;

use log::info;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::browser::UiSurface;
use crate::config::Config;
use crate::error::{E2eError, Result};

/// Everything a UI scenario touches. The surface belongs to this scenario
/// alone; nothing carries over to the next one.
pub struct UiContext<'a> {
    pub surface: &'a dyn UiSurface,
    pub config: &'a Config,
}

pub struct ApiContext<'a> {
    pub client: &'a ApiClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Auth,
    Shop,
    Api,
}

impl Suite {
    pub fn name(&self) -> &'static str {
        match self {
            Suite::Auth => "auth",
            Suite::Shop => "shop",
            Suite::Api => "api",
        }
    }

    /// UI suites need a browser session.
    pub fn needs_browser(&self) -> bool {
        !matches!(self, Suite::Api)
    }

    pub fn scenarios(self) -> impl Iterator<Item = ScenarioId> {
        ScenarioId::all().iter().copied().filter(move |id| id.suite() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    SuccessfulLogin,
    InvalidUsername,
    InvalidPassword,
    Logout,
    LockedOutUser,
    SortPriceHighToLow,
    SortNameAToZ,
    SortPriceLowToHigh,
    SortNameZToA,
    AddMultipleItems,
    RemoveItemFromListing,
    RemoveItemFromCart,
    CompleteCheckout,
    CheckoutRequiresFirstName,
    GetProducts,
    AddProduct,
    InvalidRoute,
    AddInvalidProduct,
}

const ALL: [ScenarioId; 18] = [
    ScenarioId::SuccessfulLogin,
    ScenarioId::InvalidUsername,
    ScenarioId::InvalidPassword,
    ScenarioId::Logout,
    ScenarioId::LockedOutUser,
    ScenarioId::SortPriceHighToLow,
    ScenarioId::SortNameAToZ,
    ScenarioId::SortPriceLowToHigh,
    ScenarioId::SortNameZToA,
    ScenarioId::AddMultipleItems,
    ScenarioId::RemoveItemFromListing,
    ScenarioId::RemoveItemFromCart,
    ScenarioId::CompleteCheckout,
    ScenarioId::CheckoutRequiresFirstName,
    ScenarioId::GetProducts,
    ScenarioId::AddProduct,
    ScenarioId::InvalidRoute,
    ScenarioId::AddInvalidProduct,
];

impl ScenarioId {
    pub fn all() -> &'static [ScenarioId] {
        &ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::SuccessfulLogin => "successful-login",
            ScenarioId::InvalidUsername => "invalid-username",
            ScenarioId::InvalidPassword => "invalid-password",
            ScenarioId::Logout => "logout",
            ScenarioId::LockedOutUser => "locked-out-user",
            ScenarioId::SortPriceHighToLow => "sort-price-high-to-low",
            ScenarioId::SortNameAToZ => "sort-name-a-to-z",
            ScenarioId::SortPriceLowToHigh => "sort-price-low-to-high",
            ScenarioId::SortNameZToA => "sort-name-z-to-a",
            ScenarioId::AddMultipleItems => "add-multiple-items",
            ScenarioId::RemoveItemFromListing => "remove-item-from-listing",
            ScenarioId::RemoveItemFromCart => "remove-item-from-cart",
            ScenarioId::CompleteCheckout => "complete-checkout",
            ScenarioId::CheckoutRequiresFirstName => "checkout-requires-first-name",
            ScenarioId::GetProducts => "get-products",
            ScenarioId::AddProduct => "add-product",
            ScenarioId::InvalidRoute => "invalid-route",
            ScenarioId::AddInvalidProduct => "add-invalid-product",
        }
    }

    pub fn from_name(name: &str) -> Option<ScenarioId> {
        Self::all().iter().copied().find(|id| id.name() == name)
    }

    pub fn suite(&self) -> Suite {
        use ScenarioId::*;
        match self {
            SuccessfulLogin | InvalidUsername | InvalidPassword | Logout | LockedOutUser => {
                Suite::Auth
            }
            GetProducts | AddProduct | InvalidRoute | AddInvalidProduct => Suite::Api,
            _ => Suite::Shop,
        }
    }

    /// Run a UI scenario, precondition included.
    pub async fn run_ui(self, ctx: &UiContext<'_>) -> Result<()> {
        let name = self.name();
        info!("[{}] starting", name);

        match self.suite() {
            Suite::Auth => auth::before_each(ctx).await?,
            Suite::Shop => shop::before_each(ctx).await?,
            Suite::Api => return Err(self.wrong_context()),
        }

        match self {
            ScenarioId::SuccessfulLogin => auth::successful_login(ctx).await?,
            ScenarioId::InvalidUsername => auth::invalid_username(ctx).await?,
            ScenarioId::InvalidPassword => auth::invalid_password(ctx).await?,
            ScenarioId::Logout => auth::logout(ctx).await?,
            ScenarioId::LockedOutUser => auth::locked_out_user(ctx).await?,
            ScenarioId::SortPriceHighToLow => shop::sort_price_high_to_low(ctx).await?,
            ScenarioId::SortNameAToZ => shop::sort_name_a_to_z(ctx).await?,
            ScenarioId::SortPriceLowToHigh => shop::sort_price_low_to_high(ctx).await?,
            ScenarioId::SortNameZToA => shop::sort_name_z_to_a(ctx).await?,
            ScenarioId::AddMultipleItems => shop::add_multiple_items(ctx).await?,
            ScenarioId::RemoveItemFromListing => shop::remove_item_from_listing(ctx).await?,
            ScenarioId::RemoveItemFromCart => shop::remove_item_from_cart(ctx).await?,
            ScenarioId::CompleteCheckout => shop::complete_checkout(ctx).await?,
            ScenarioId::CheckoutRequiresFirstName => {
                shop::checkout_requires_first_name(ctx).await?
            }
            ScenarioId::GetProducts
            | ScenarioId::AddProduct
            | ScenarioId::InvalidRoute
            | ScenarioId::AddInvalidProduct => return Err(self.wrong_context()),
        }

        info!("[{}] passed", name);
        Ok(())
    }

    /// Run an API scenario.
    pub async fn run_api(self, ctx: &ApiContext<'_>) -> Result<()> {
        let name = self.name();
        info!("[{}] starting", name);

        match self {
            ScenarioId::GetProducts => api::get_products(ctx).await?,
            ScenarioId::AddProduct => api::add_product(ctx).await?,
            ScenarioId::InvalidRoute => api::invalid_route(ctx).await?,
            ScenarioId::AddInvalidProduct => api::add_invalid_product(ctx).await?,
            _ => return Err(self.wrong_context()),
        }

        info!("[{}] passed", name);
        Ok(())
    }

    fn wrong_context(&self) -> E2eError {
        let needs = if self.suite().needs_browser() {
            "a browser session"
        } else {
            "an API client"
        };
        E2eError::Config(format!("'{}' needs {}", self.name(), needs))
    }
}
