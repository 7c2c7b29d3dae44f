//! Page objects, one per storefront screen.
//!
//! Each exposes intent-level actions and observations over a borrowed
//! [`UiSurface`](crate::browser::UiSurface). Selectors live here and nowhere
//! else; no page object asserts anything.

pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod login;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use inventory::{InventoryPage, SortOrder};
pub use login::LoginPage;

/// The storefront's per-product `data-test` suffix: lower-cased name with
/// spaces turned into hyphens ("Sauce Labs Backpack" -> "sauce-labs-backpack").
pub fn product_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// `[data-test="<prefix>-<slug>"]` for the product called `name`.
pub(crate) fn product_control(prefix: &str, name: &str) -> String {
    let slug = product_slug(name).replace('\\', "\\\\").replace('"', "\\\"");
    format!(r#"[data-test="{}-{}"]"#, prefix, slug)
}
