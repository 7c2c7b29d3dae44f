//! Products API contract scenarios.

use log::warn;

use super::ApiContext;
use crate::api::{NewProduct, Schema};
use crate::assertions::{expect_contains, expect_status, expect_status_in};
use crate::error::{E2eError, Result};

pub fn test_product() -> NewProduct {
    NewProduct::new("Test Product", "This is a test product.", 99.99, "electronics")
}

pub fn invalid_product() -> NewProduct {
    NewProduct::new("", "This is an invalid product.", -1.0, "electronics")
}

pub async fn get_products(ctx: &ApiContext<'_>) -> Result<()> {
    let response = ctx.client.get("/products").await?;
    expect_status(response.status, 200)?;
    Schema::product_list().check(&response.json()?)
}

pub async fn add_product(ctx: &ApiContext<'_>) -> Result<()> {
    let product = test_product();
    let response = ctx.client.post_json("/products/add", &product).await?;
    expect_status(response.status, 201)?;
    Schema::created_product(&product).check(&response.json()?)
}

/// An empty 404 body is tolerated and only logged.
pub async fn invalid_route(ctx: &ApiContext<'_>) -> Result<()> {
    let response = ctx.client.get("/products-invalid").await?;
    expect_status(response.status, 404)?;

    if response.is_empty_body() {
        warn!("[invalid-route] 404 response had an empty body");
        return Ok(());
    }
    Schema::route_not_found().check(&response.json()?)
}

pub async fn add_invalid_product(ctx: &ApiContext<'_>) -> Result<()> {
    let response = ctx
        .client
        .post_json("/products/add", &invalid_product())
        .await?;
    expect_status_in(response.status, 400..500)?;

    let body = response.json()?;
    Schema::rejection().check(&body)?;
    let message = body["error"]
        .as_str()
        .ok_or_else(|| E2eError::Contract(vec!["field 'error' should be string".into()]))?;
    expect_contains("rejection error", message, "Invalid")
}
