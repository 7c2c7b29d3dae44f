//! The interaction primitives page objects are written against.
//!
//! Page objects only ever see `&dyn UiSurface`; selector strings never leave
//! the `pages` module.

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UiSurface: Send + Sync {
    /// Load `url` and wait for the document to finish loading.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Click the first element matching `selector` whose trimmed text equals `text`.
    async fn click_text(&self, selector: &str, text: &str) -> Result<()>;

    /// Replace the value of an input.
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Choose the `<option>` whose visible label equals `label`.
    async fn select_by_label(&self, selector: &str, label: &str) -> Result<()>;

    /// Wait until an element matching `selector` is attached.
    async fn wait_for(&self, selector: &str) -> Result<()>;

    /// Whether the first match is rendered at this moment. Does not wait, so
    /// `false` can mean "not yet"; `wait_for` first when the page may be loading.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Text of the first match, `None` when nothing matches.
    async fn text_content(&self, selector: &str) -> Result<Option<String>>;

    /// Text of every match in document order. Does not wait.
    async fn all_text_contents(&self, selector: &str) -> Result<Vec<String>>;
}
