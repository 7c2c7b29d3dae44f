use crate::browser::UiSurface;
use crate::error::Result;

const FIRST_NAME: &str = r#"[data-test="firstName"]"#;
const LAST_NAME: &str = r#"[data-test="lastName"]"#;
const POSTAL_CODE: &str = r#"[data-test="postalCode"]"#;
const CONTINUE_BUTTON: &str = r#"[data-test="continue"]"#;
const FINISH_BUTTON: &str = r#"[data-test="finish"]"#;
const ERROR_MESSAGE: &str = r#"[data-test="error"]"#;
const COMPLETE_HEADER: &str = ".complete-header";
const COMPLETE_TEXT: &str = ".complete-text";

pub const CONFIRMATION_NOT_FOUND: &str = "Order confirmation text not found";

pub struct CheckoutPage<'a> {
    surface: &'a dyn UiSurface,
}

impl<'a> CheckoutPage<'a> {
    pub fn new(surface: &'a dyn UiSurface) -> Self {
        Self { surface }
    }

    /// Fill the information step, continue to the overview and finish the order.
    pub async fn enter_checkout_details(
        &self,
        first_name: &str,
        last_name: &str,
        zip_code: &str,
    ) -> Result<()> {
        self.fill_details(first_name, last_name, zip_code).await?;
        self.continue_checkout().await?;
        self.surface.click(FINISH_BUTTON).await
    }

    pub async fn fill_details(
        &self,
        first_name: &str,
        last_name: &str,
        zip_code: &str,
    ) -> Result<()> {
        self.surface.fill(FIRST_NAME, first_name).await?;
        self.surface.fill(LAST_NAME, last_name).await?;
        self.surface.fill(POSTAL_CODE, zip_code).await
    }

    pub async fn continue_checkout(&self) -> Result<()> {
        self.surface.click(CONTINUE_BUTTON).await
    }

    pub async fn confirmation_header(&self) -> Result<String> {
        self.text_or_fallback(COMPLETE_HEADER).await
    }

    pub async fn dispatch_text(&self) -> Result<String> {
        self.text_or_fallback(COMPLETE_TEXT).await
    }

    /// Validation banner on the information step, empty when none is shown.
    pub async fn error_message(&self) -> Result<String> {
        Ok(self
            .surface
            .text_content(ERROR_MESSAGE)
            .await?
            .unwrap_or_default())
    }

    async fn text_or_fallback(&self, selector: &str) -> Result<String> {
        Ok(self
            .surface
            .text_content(selector)
            .await?
            .unwrap_or_else(|| CONFIRMATION_NOT_FOUND.to_string()))
    }
}
