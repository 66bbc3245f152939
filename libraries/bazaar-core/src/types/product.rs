/// Product domain types
use crate::types::ProductId;
use serde::{Deserialize, Serialize};

/// A product listed in its owner's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within the owner's inventory
    #[serde(rename = "_id")]
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Asking price
    pub price: f64,

    /// Free-form description, empty when none was given
    pub description: String,
}

impl Product {
    /// Create a product with a fresh ID
    pub fn new(listing: NewProduct) -> Self {
        Self {
            id: ProductId::generate(),
            name: listing.name,
            price: listing.price,
            description: listing.description.unwrap_or_default(),
        }
    }

    /// Apply the supplied fields of a patch, keeping the rest
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Input for listing a new product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// Partial update for a listed product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl ProductPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

/// Copy of a product taken at purchase time.
///
/// Later edits or removal of the listed product do not reach the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
        }
    }
}
