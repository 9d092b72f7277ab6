//! Pactum domain core.
//!
//! Record types, the validation schema, list/form controllers and the
//! generic record manager, plus the store, attachment and reporter seams
//! they drive. This crate has no database or HTTP dependencies so the whole
//! record workflow can be exercised against in-memory fakes.

pub mod alert;
pub mod attachment;
pub mod contract;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod listing;
pub mod manager;
pub mod profile;
pub mod record;
pub mod report;
pub mod search;
pub mod template;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
