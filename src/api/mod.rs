//! Products REST API access and response contracts.

pub mod client;
pub mod models;
pub mod schema;

pub use client::{ApiClient, ApiResponse};
pub use models::NewProduct;
pub use schema::{FieldType, Schema, ValidationResult};
