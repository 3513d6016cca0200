//! Backing Store Module
//!
//! A simulated slow database the server binary puts the cache in front of.

mod mock;

pub use mock::{DbError, MockDb};
