//! Row structs and their conversions into `pactum_core` records.
//!
//! Each submodule contains a `FromRow` struct matching the table (or join)
//! it is read from. Rows whose columns hold enum names convert into the
//! typed core record with `TryFrom`.

pub mod alert;
pub mod contract;
pub mod profile;
pub mod signature;
pub mod template;
pub mod user;
