mod ids;
mod product;
mod region;
mod transaction;
mod user;

pub use ids::{ProductId, TransactionId, UserId};
pub use product::{NewProduct, Product, ProductPatch, ProductSnapshot};
pub use region::Region;
pub use transaction::{Purchase, Transaction};
pub use user::{NewUser, Store, StoreSummary, User, UserSnapshot, UserView};
