//! Domain types shared by the PassVault PIN delivery crates.
//!
//! This crate has zero internal dependencies so both the notifier library
//! and the command line front end can use it.

pub mod channels;
pub mod error;
pub mod pin;

pub use error::CoreError;
pub use pin::PinRequest;
