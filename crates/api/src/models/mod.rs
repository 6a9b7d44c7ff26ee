//! Domain records and wire payload types.
//!
//! Three tiers per entity, following the flow of a request:
//!
//! 1. **Payloads** (`*Payload`) - every field optional, straight off the
//!    wire. Presence of a field is the mutation signal for updates, so a
//!    `false` or a small number can never be mistaken for "not provided".
//! 2. **Validated inputs** (`New*` / `*Patch`) - built by the services from
//!    a payload; every field is a core type, valid by construction.
//! 3. **Records** (`User`, `Product`, `Cart`, `Order`) - what the store
//!    returns and the API serializes.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartItemPayload};
pub use order::{NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product, ProductFilter, ProductPatch, ProductPayload, ProductQueryParams};
pub use user::{LoginPayload, NewUser, User, UserPatch, UserPayload};
