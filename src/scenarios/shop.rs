//! Shopping scenarios. Each starts logged in as the standard user.

use super::UiContext;
use crate::assertions::{
    ensure, expect_contains, expect_eq, expect_non_decreasing, expect_non_increasing,
};
use crate::error::Result;
use crate::pages::{CartPage, CheckoutPage, InventoryPage, LoginPage, SortOrder};

pub const BACKPACK: &str = "Sauce Labs Backpack";
pub const BOLT_TSHIRT: &str = "Sauce Labs Bolt T-Shirt";
pub const ORDER_THANKS: &str = "Thank you for your order!";
pub const ORDER_DISPATCHED: &str =
    "Your order has been dispatched, and will arrive just as fast as the pony can get there!";
pub const FIRST_NAME_REQUIRED: &str = "First Name is required";

pub async fn before_each(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    let login = LoginPage::new(ctx.surface, &ctx.config.ui_base_url);
    login.navigate().await?;
    login.login(&creds.standard_user, &creds.password).await?;
    InventoryPage::new(ctx.surface).wait_until_loaded().await
}

/// Any ordering check passes on an empty listing, so an empty one fails here.
fn listed<T>(what: &str, items: Vec<T>) -> Result<Vec<T>> {
    ensure(!items.is_empty(), format!("product listing has no {}", what))?;
    Ok(items)
}

pub async fn sort_price_high_to_low(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.sort_products(SortOrder::PriceDescending).await?;
    let prices = listed("prices", inventory.product_prices().await?)?;
    expect_non_increasing("prices", &prices)
}

pub async fn sort_price_low_to_high(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.sort_products(SortOrder::PriceAscending).await?;
    let prices = listed("prices", inventory.product_prices().await?)?;
    expect_non_decreasing("prices", &prices)
}

pub async fn sort_name_a_to_z(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.sort_products(SortOrder::NameAscending).await?;
    let names = listed("names", inventory.product_names().await?)?;
    expect_non_decreasing("names", &names)
}

pub async fn sort_name_z_to_a(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.sort_products(SortOrder::NameDescending).await?;
    let names = listed("names", inventory.product_names().await?)?;
    expect_non_increasing("names", &names)
}

pub async fn add_multiple_items(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.add_product_to_cart(BACKPACK).await?;
    inventory.add_product_to_cart(BOLT_TSHIRT).await?;
    expect_eq("cart badge", &inventory.cart_badge_count().await?, &2)?;

    let cart = CartPage::new(ctx.surface);
    cart.go_to_cart().await?;
    let expected = vec![BACKPACK.to_string(), BOLT_TSHIRT.to_string()];
    expect_eq("cart items", &cart.cart_items().await?, &expected)
}

pub async fn remove_item_from_listing(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.add_product_to_cart(BACKPACK).await?;
    inventory.remove_product_from_cart(BACKPACK).await?;

    let cart = CartPage::new(ctx.surface);
    cart.go_to_cart().await?;
    let items = cart.cart_items().await?;
    ensure(items.is_empty(), format!("cart should be empty, found {:?}", items))
}

pub async fn remove_item_from_cart(ctx: &UiContext<'_>) -> Result<()> {
    InventoryPage::new(ctx.surface)
        .add_product_to_cart(BACKPACK)
        .await?;

    let cart = CartPage::new(ctx.surface);
    cart.go_to_cart().await?;
    cart.remove_item(BACKPACK).await?;
    let items = cart.cart_items().await?;
    ensure(items.is_empty(), format!("cart should be empty, found {:?}", items))
}

pub async fn complete_checkout(ctx: &UiContext<'_>) -> Result<()> {
    let inventory = InventoryPage::new(ctx.surface);
    inventory.open_product(BACKPACK).await?;
    inventory.add_open_product_to_cart().await?;
    inventory.go_back_to_products().await?;

    let cart = CartPage::new(ctx.surface);
    cart.go_to_cart().await?;
    cart.proceed_to_checkout().await?;

    let checkout = CheckoutPage::new(ctx.surface);
    checkout.enter_checkout_details("John", "Doe", "12345").await?;

    expect_contains("confirmation header", &checkout.confirmation_header().await?, ORDER_THANKS)?;
    expect_contains("dispatch text", &checkout.dispatch_text().await?, ORDER_DISPATCHED)
}

pub async fn checkout_requires_first_name(ctx: &UiContext<'_>) -> Result<()> {
    InventoryPage::new(ctx.surface)
        .add_product_to_cart(BACKPACK)
        .await?;

    let cart = CartPage::new(ctx.surface);
    cart.go_to_cart().await?;
    cart.proceed_to_checkout().await?;

    let checkout = CheckoutPage::new(ctx.surface);
    checkout.fill_details("", "Doe", "12345").await?;
    checkout.continue_checkout().await?;
    expect_contains("checkout error", &checkout.error_message().await?, FIRST_NAME_REQUIRED)
}
