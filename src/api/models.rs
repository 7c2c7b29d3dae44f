use serde::{Deserialize, Serialize};

/// Body of `POST /products/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
}

impl NewProduct {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            category: category.into(),
        }
    }
}
