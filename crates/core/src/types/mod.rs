//! Core types for ShopDesk.
//!
//! Domain vocabulary as validated newtypes and closed enums.

pub mod currency;
pub mod email;
pub mod id;
pub mod status;

pub use currency::Currency;
pub use email::{Email, EmailError};
pub use id::*;
pub use status::OrderStatus;
