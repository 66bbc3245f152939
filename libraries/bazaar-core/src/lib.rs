//! Bazaar Core
//!
//! Storage-agnostic domain types, the `MarketStore` trait, and error handling
//! for the Bazaar marketplace.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Product`, `Transaction` and the snapshot types
//!   that are copied out of them
//! - **Region Routing**: the `Region` discriminant every user record carries
//! - **Core Traits**: `MarketStore`, implemented by `bazaar-storage`
//! - **Error Handling**: unified `MarketError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use bazaar_core::types::{NewProduct, Product, ProductSnapshot, Region};
//!
//! let region: Region = "East".parse().unwrap();
//! assert_eq!(region, Region::East);
//!
//! let product = Product::new(NewProduct {
//!     name: "Lamp".to_string(),
//!     price: 12.5,
//!     description: None,
//! });
//! assert_eq!(product.description, "");
//!
//! let snapshot = ProductSnapshot::from(&product);
//! assert_eq!(snapshot.id, product.id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MarketError, Result};
pub use storage::MarketStore;

pub use types::{
    NewProduct, NewUser, Product, ProductId, ProductPatch, ProductSnapshot, Purchase, Region,
    Store, StoreSummary, Transaction, TransactionId, User, UserId, UserSnapshot, UserView,
};
