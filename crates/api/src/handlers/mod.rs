//! Request handlers for the `/api/v1` resources.
//!
//! Handlers validate input, delegate to the job store, queue or brand
//! scanner held in [`AppState`](crate::state::AppState), and map failures
//! via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod brand;
pub mod jobs;
pub mod templates;
