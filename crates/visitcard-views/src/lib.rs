//! View models for the visiting-card surfaces.
//!
//! Each view owns its state and changes it only through its own methods, so a
//! renderer (the `visitcard` TUI, or anything else) reads state and sends
//! events without sharing mutable data between views. Network effects are
//! split into a `begin_*` step that hands out a ticket and a `finish_*` step
//! that applies the result; results holding a superseded ticket are dropped.
//! The `async` helpers on each view run both steps against a
//! [`CardBackend`](visitcard_core::backend::CardBackend).

pub mod admin;
pub mod fallback;
pub mod form;
pub mod notice;
pub mod profile;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{AdminView, ListFallback};
pub use form::{FormDialog, FormMode, FormOutcome};
pub use notice::{Notice, NoticeKind};
pub use profile::{ProfileState, ProfileView};
