//! Domain types shared by every Pomelli crate.
//!
//! - [`templates`] -- the static prompt template registry.
//! - [`job`] -- the generation job record and its submission rules.
//! - [`error`] -- the domain error type mapped to HTTP by the API crate.

pub mod error;
pub mod job;
pub mod templates;
pub mod types;
