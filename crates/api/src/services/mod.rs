//! Service layer: the per-entity controllers.
//!
//! Each service owns the shared request protocol - reject empty payloads,
//! validate field by field (first failure wins, field-specific message),
//! fast-path uniqueness checks, read-then-delete - and is generic over its
//! store trait so the logic is testable without a database. The store traits
//! mirror the collection API the backend is written against: `find`,
//! `find_one`, `find_by_id`, `create`, `find_by_id_and_update`,
//! `find_by_id_and_delete`.

pub mod auth;
pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use carts::{CartService, CartStore};
pub use orders::{OrderService, OrderStore};
pub use products::{ProductService, ProductStore};
pub use users::{UserService, UserStore};
