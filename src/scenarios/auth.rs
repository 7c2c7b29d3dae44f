//! Authentication scenarios. Each starts on the login page.

use super::UiContext;
use crate::assertions::{ensure, expect_contains, expect_same_url};
use crate::error::Result;
use crate::pages::{InventoryPage, LoginPage};

pub const INVALID_CREDENTIALS: &str =
    "Username and password do not match any user in this service";
pub const LOCKED_OUT: &str = "Sorry, this user has been locked out.";

pub async fn before_each(ctx: &UiContext<'_>) -> Result<()> {
    LoginPage::new(ctx.surface, &ctx.config.ui_base_url)
        .navigate()
        .await
}

pub async fn successful_login(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    LoginPage::new(ctx.surface, &ctx.config.ui_base_url)
        .login(&creds.standard_user, &creds.password)
        .await?;

    let inventory = InventoryPage::new(ctx.surface);
    inventory.wait_until_loaded().await?;
    ensure(
        inventory.is_loaded().await?,
        "inventory list should be visible after login",
    )?;
    let url = ctx.surface.current_url().await?;
    expect_contains("URL after login", &url, "/inventory.html")
}

pub async fn invalid_username(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    let login = LoginPage::new(ctx.surface, &ctx.config.ui_base_url);
    login.login(&creds.invalid_user, &creds.password).await?;
    expect_contains("login error", &login.error_message().await?, INVALID_CREDENTIALS)
}

pub async fn invalid_password(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    let login = LoginPage::new(ctx.surface, &ctx.config.ui_base_url);
    login.login(&creds.standard_user, &creds.invalid_password).await?;
    expect_contains("login error", &login.error_message().await?, INVALID_CREDENTIALS)
}

pub async fn logout(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    let login = LoginPage::new(ctx.surface, &ctx.config.ui_base_url);
    login.login(&creds.standard_user, &creds.password).await?;

    let inventory = InventoryPage::new(ctx.surface);
    inventory.wait_until_loaded().await?;
    inventory.logout().await?;

    ensure(
        login.is_displayed().await?,
        "login form should be shown after logout",
    )?;
    let url = ctx.surface.current_url().await?;
    expect_same_url(&url, &ctx.config.ui_base_url)
}

pub async fn locked_out_user(ctx: &UiContext<'_>) -> Result<()> {
    let creds = &ctx.config.credentials;
    let login = LoginPage::new(ctx.surface, &ctx.config.ui_base_url);
    login.login(&creds.locked_out_user, &creds.password).await?;
    expect_contains("login error", &login.error_message().await?, LOCKED_OUT)
}
