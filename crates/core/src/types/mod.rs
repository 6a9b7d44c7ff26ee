//! Core types for Bramble.
//!
//! Newtype wrappers and closed enums for the domain: anything that crosses
//! the request boundary is parsed into one of these before it touches a
//! controller or the store.

pub mod category;
pub mod email;
pub mod gender;
pub mod id;
pub mod name;
pub mod phone;
pub mod price;
pub mod quantity;
pub mod rating;
pub mod status;

pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use gender::{Gender, GenderError};
pub use id::*;
pub use name::{PersonName, PersonNameError};
pub use phone::{Phone, PhoneError};
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use rating::{Rating, RatingError};
pub use status::OrderStatus;
