//! Authentication primitives.
//!
//! - [`jwt`] -- login-token check plus JWT generation and validation.

pub mod jwt;
