//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Record handlers drive a per-request `RecordManager`; the rest delegate to
//! the repositories in `pactum_db`. Errors map through [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod alerts;
pub mod auth;
pub mod contracts;
pub mod dashboard;
pub mod profile;
pub mod search;
pub mod signatures;
pub mod templates;
