//! Product listing and product details.

use super::product_control;
use crate::browser::UiSurface;
use crate::error::{E2eError, Result};

const INVENTORY_LIST: &str = ".inventory_list";
const MENU_BUTTON: &str = "#react-burger-menu-btn";
const LOGOUT_LINK: &str = "#logout_sidebar_link";
const LOGIN_BUTTON: &str = "#login-button";
const SORT_SELECT: &str = ".product_sort_container";
const ITEM_NAME: &str = ".inventory_item_name";
const ITEM_PRICE: &str = ".inventory_item_price";
const CART_BADGE: &str = ".shopping_cart_badge";
const DETAILS_NAME: &str = ".inventory_details_name";
const DETAILS_ADD_TO_CART: &str = r#"[data-test="add-to-cart"]"#;
const BACK_TO_PRODUCTS: &str = r#"[data-test="back-to-products"]"#;

/// Orderings offered by the listing's sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    NameAscending,
    NameDescending,
    PriceAscending,
    PriceDescending,
}

impl SortOrder {
    /// Visible label of the matching `<option>`.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::NameAscending => "Name (A to Z)",
            SortOrder::NameDescending => "Name (Z to A)",
            SortOrder::PriceAscending => "Price (low to high)",
            SortOrder::PriceDescending => "Price (high to low)",
        }
    }
}

pub struct InventoryPage<'a> {
    surface: &'a dyn UiSurface,
}

impl<'a> InventoryPage<'a> {
    pub fn new(surface: &'a dyn UiSurface) -> Self {
        Self { surface }
    }

    pub async fn is_loaded(&self) -> Result<bool> {
        self.surface.is_visible(INVENTORY_LIST).await
    }

    /// Wait for the listing after a login or navigation.
    pub async fn wait_until_loaded(&self) -> Result<()> {
        self.surface.wait_for(INVENTORY_LIST).await
    }

    /// Log out through the side menu and wait for the login form.
    pub async fn logout(&self) -> Result<()> {
        self.surface.click(MENU_BUTTON).await?;
        self.surface.click(LOGOUT_LINK).await?;
        self.surface.wait_for(LOGIN_BUTTON).await
    }

    pub async fn sort_products(&self, order: SortOrder) -> Result<()> {
        self.surface.select_by_label(SORT_SELECT, order.label()).await
    }

    /// Listed prices in display order, `$` stripped.
    pub async fn product_prices(&self) -> Result<Vec<f64>> {
        self.surface
            .all_text_contents(ITEM_PRICE)
            .await?
            .iter()
            .map(|text| parse_price(text))
            .collect()
    }

    pub async fn product_names(&self) -> Result<Vec<String>> {
        Ok(self
            .surface
            .all_text_contents(ITEM_NAME)
            .await?
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect())
    }

    pub async fn add_product_to_cart(&self, name: &str) -> Result<()> {
        self.surface
            .click(&product_control("add-to-cart", name))
            .await
    }

    pub async fn remove_product_from_cart(&self, name: &str) -> Result<()> {
        self.surface.click(&product_control("remove", name)).await
    }

    /// Open the details view of `name` from the listing.
    pub async fn open_product(&self, name: &str) -> Result<()> {
        self.surface.click_text(ITEM_NAME, name).await?;
        self.surface.wait_for(DETAILS_NAME).await
    }

    /// Add the product whose details view is open.
    pub async fn add_open_product_to_cart(&self) -> Result<()> {
        self.surface.click(DETAILS_ADD_TO_CART).await
    }

    pub async fn go_back_to_products(&self) -> Result<()> {
        self.surface.click(BACK_TO_PRODUCTS).await?;
        self.surface.wait_for(INVENTORY_LIST).await
    }

    /// Item count on the cart icon; no badge means an empty cart.
    pub async fn cart_badge_count(&self) -> Result<usize> {
        let texts = self.surface.all_text_contents(CART_BADGE).await?;
        match texts.first().map(|t| t.trim()) {
            None | Some("") => Ok(0),
            Some(text) => text.parse().map_err(|_| E2eError::Parse {
                what: "cart badge count",
                value: text.to_string(),
            }),
        }
    }
}

/// Parse a displayed price such as `"$29.99"`.
pub fn parse_price(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .trim_start_matches('$')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| E2eError::Parse {
            what: "price",
            value: trimmed.to_string(),
        })
}
