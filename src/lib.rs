pub mod cart;
pub mod catalog;
pub mod submission;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CatalogError, CatalogLoader, ProductRecord, RowPolicy};
pub use submission::{compose, Submission};
