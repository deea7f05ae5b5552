pub mod catalog;
pub mod intent;
pub mod models;
pub mod order;
pub mod random;
pub mod responder;

pub use catalog::{Catalog, CatalogError, PizzaOffering, PricedSize};
pub use intent::classify;
pub use models::*;
pub use order::extract_order_candidate;
pub use random::{ChoiceSource, SeededChoice};
pub use responder::{generate, welcome};
