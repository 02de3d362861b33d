//! Core types and trait definitions for visitcard.
//!
//! This crate is deliberately free of HTTP dependencies. The client, the view
//! models and the binary all depend on it; it depends on nothing of theirs.

pub mod backend;
pub mod error;
pub mod fields;
pub mod record;

pub use error::{Error, Result};
