//! # Model
//!
//! Account entities, identity capabilities, and their storage backends.

pub mod account;
pub mod identity;
pub mod store;

pub use account::{UserAccount, UserAccountForCreate};
pub use identity::{IdentityProvider, UserStore};
