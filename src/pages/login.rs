use crate::browser::UiSurface;
use crate::error::Result;

const USERNAME_INPUT: &str = "#user-name";
const PASSWORD_INPUT: &str = "#password";
const LOGIN_BUTTON: &str = "#login-button";
const ERROR_MESSAGE: &str = r#"[data-test="error"]"#;

pub struct LoginPage<'a> {
    surface: &'a dyn UiSurface,
    base_url: &'a str,
}

impl<'a> LoginPage<'a> {
    pub fn new(surface: &'a dyn UiSurface, base_url: &'a str) -> Self {
        Self { surface, base_url }
    }

    pub async fn navigate(&self) -> Result<()> {
        self.surface.goto(self.base_url).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.surface.fill(USERNAME_INPUT, username).await?;
        self.surface.fill(PASSWORD_INPUT, password).await?;
        self.surface.click(LOGIN_BUTTON).await
    }

    /// The login error banner, or an empty string when none is shown.
    pub async fn error_message(&self) -> Result<String> {
        Ok(self
            .surface
            .text_content(ERROR_MESSAGE)
            .await?
            .unwrap_or_default())
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        self.surface.is_visible(LOGIN_BUTTON).await
    }
}
