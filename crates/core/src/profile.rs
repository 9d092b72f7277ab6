//! User profile: one per identity, upserted.

use serde::Serialize;

use crate::types::{DbId, Timestamp};
use crate::validation::ProfileForm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Seed the settings form from a stored profile.
    pub fn form(&self) -> ProfileForm {
        ProfileForm {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            company: self.company.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }

    /// "First Last", or `None` when neither is set.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}
