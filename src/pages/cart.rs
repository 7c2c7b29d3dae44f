use super::product_control;
use crate::browser::UiSurface;
use crate::error::Result;

const CART_LINK: &str = "#shopping_cart_container";
const CART_LIST: &str = ".cart_list";
const ITEM_NAME: &str = ".inventory_item_name";
const CHECKOUT_BUTTON: &str = r#"[data-test="checkout"]"#;

pub struct CartPage<'a> {
    surface: &'a dyn UiSurface,
}

impl<'a> CartPage<'a> {
    pub fn new(surface: &'a dyn UiSurface) -> Self {
        Self { surface }
    }

    pub async fn go_to_cart(&self) -> Result<()> {
        self.surface.click(CART_LINK).await?;
        self.surface.wait_for(CART_LIST).await
    }

    /// Names of the items in the cart, in display order.
    pub async fn cart_items(&self) -> Result<Vec<String>> {
        Ok(self
            .surface
            .all_text_contents(ITEM_NAME)
            .await?
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect())
    }

    pub async fn remove_item(&self, name: &str) -> Result<()> {
        self.surface.click(&product_control("remove", name)).await
    }

    pub async fn proceed_to_checkout(&self) -> Result<()> {
        self.surface.click(CHECKOUT_BUTTON).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::surface::fake::RecordingSurface;

    #[tokio::test]
    async fn test_go_to_cart_waits_for_list() {
        let surface = RecordingSurface::new();
        CartPage::new(&surface).go_to_cart().await.unwrap();
        assert_eq!(
            surface.calls(),
            vec!["click #shopping_cart_container", "wait_for .cart_list"]
        );
    }

    #[tokio::test]
    async fn test_cart_items_empty_when_nothing_listed() {
        let surface = RecordingSurface::new();
        assert!(CartPage::new(&surface).cart_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_targets_named_item() {
        let surface = RecordingSurface::new()
            .with_list(ITEM_NAME, &["Sauce Labs Backpack", "Sauce Labs Bike Light"]);
        let cart = CartPage::new(&surface);

        assert_eq!(
            cart.cart_items().await.unwrap(),
            vec!["Sauce Labs Backpack", "Sauce Labs Bike Light"]
        );
        cart.remove_item("Sauce Labs Bike Light").await.unwrap();
        cart.proceed_to_checkout().await.unwrap();

        assert_eq!(
            surface.calls(),
            vec![
                r#"click [data-test="remove-sauce-labs-bike-light"]"#,
                r#"click [data-test="checkout"]"#,
            ]
        );
    }
}
