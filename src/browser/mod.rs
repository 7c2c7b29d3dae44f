pub mod chrome;
pub mod surface;

pub use chrome::{BrowserSession, ConnectionMode};
pub use surface::UiSurface;
