//! Local products API for contract scenario tests
//!
//! Implements `GET /products`, `POST /products/add` and a JSON 404 for any
//! other route. [`ApiQuirks`] switches on deviations so tests can watch the
//! contract checks fail.

#![allow(dead_code)]

use std::net::SocketAddr;

use serde_json::{json, Value};
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::{Filter, Reply};

/// Deviations from the well-behaved API
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuirks {
    /// Answer unknown routes with an empty 404 body
    pub empty_not_found: bool,
    /// Leave `limit` out of the product list
    pub omit_limit: bool,
    /// Store products without validating them
    pub accept_invalid: bool,
}

pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

fn catalog(quirks: ApiQuirks) -> Value {
    let products = json!([
        {
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara known for its volumizing and lengthening effects.",
            "category": "beauty",
            "price": 9.99
        },
        {
            "id": 2,
            "title": "Eyeshadow Palette with Mirror",
            "description": "A versatile range of eyeshadow shades.",
            "category": "beauty",
            "price": 19.99
        },
        {
            "id": 3,
            "title": "Powder Canister",
            "description": "A finely milled setting powder.",
            "category": "beauty",
            "price": 14.99
        }
    ]);
    let mut body = json!({ "products": products, "total": 3, "skip": 0, "limit": 30 });
    if quirks.omit_limit {
        if let Some(map) = body.as_object_mut() {
            map.remove("limit");
        }
    }
    body
}

fn add_product(body: Value, quirks: ApiQuirks) -> warp::reply::Response {
    let title = body["title"].as_str().unwrap_or_default();
    let price = body["price"].as_f64();

    let problem = if title.trim().is_empty() {
        Some("title is required")
    } else if !matches!(price, Some(p) if p > 0.0) {
        Some("price must be a positive number")
    } else {
        None
    };

    if let (Some(problem), false) = (problem, quirks.accept_invalid) {
        return warp::reply::with_status(
            warp::reply::json(&json!({ "error": format!("Invalid product: {}", problem) })),
            StatusCode::BAD_REQUEST,
        )
        .into_response();
    }

    let mut created = body;
    if let Some(map) = created.as_object_mut() {
        map.insert("id".to_string(), json!(195));
    }
    warp::reply::with_status(warp::reply::json(&created), StatusCode::CREATED).into_response()
}

fn not_found(quirks: ApiQuirks) -> warp::reply::Response {
    if quirks.empty_not_found {
        warp::reply::with_status(String::new(), StatusCode::NOT_FOUND).into_response()
    } else {
        warp::reply::with_status(
            warp::reply::json(&json!({ "message": "Route not found" })),
            StatusCode::NOT_FOUND,
        )
        .into_response()
    }
}

impl ApiServer {
    pub async fn start() -> Self {
        Self::start_with(ApiQuirks::default()).await
    }

    pub async fn start_with(quirks: ApiQuirks) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let list = warp::path("products")
            .and(warp::path::end())
            .and(warp::get())
            .map(move || warp::reply::json(&catalog(quirks)).into_response());

        let add = warp::path!("products" / "add")
            .and(warp::post())
            .and(warp::body::json())
            .map(move |body: Value| add_product(body, quirks));

        let fallback = warp::any().map(move || not_found(quirks));

        let routes = list.or(add).unify().or(fallback).unify();

        let (addr, server) =
            warp::serve(routes).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
                shutdown_rx.await.ok();
            });

        tokio::spawn(server);

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
