//! Local models for the console.
//!
//! The remote ShopDesk API owns every business record; the only state the
//! console models itself is what lives in the server-side session.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
