//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every owner-scoped query takes
//! the owning `user_id` and never touches another user's rows.

pub mod alert_repo;
pub mod contract_repo;
pub mod profile_repo;
pub mod signature_repo;
pub mod template_repo;
pub mod user_repo;

pub use alert_repo::AlertRepo;
pub use contract_repo::ContractRepo;
pub use profile_repo::ProfileRepo;
pub use signature_repo::SignatureRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
