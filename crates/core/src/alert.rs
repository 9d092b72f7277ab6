//! Contract alerts (expiration, renewal, payment reminders).
//!
//! Alerts are read-only apart from `is_read`, which only ever moves from
//! `false` to `true`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::Filterable;
use crate::types::{Date, DbId, Timestamp};

/// Alert category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Expiration,
    Renewal,
    Payment,
    Custom,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        Self::Expiration,
        Self::Renewal,
        Self::Payment,
        Self::Custom,
    ];

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown alert type '{name}'")))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Expiration => "expiration",
            Self::Renewal => "renewal",
            Self::Payment => "payment",
            Self::Custom => "custom",
        }
    }

    /// Badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Expiration => "Expiration",
            Self::Renewal => "Renewal",
            Self::Payment => "Payment",
            Self::Custom => "Custom",
        }
    }
}

/// An alert joined with its contract's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub user_id: DbId,
    pub contract_id: DbId,
    pub alert_type: AlertType,
    pub alert_date: Date,
    pub message: String,
    pub is_read: bool,
    pub contract_title: String,
    pub contract_client: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Filterable for Alert {
    type Category = AlertType;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.message.as_str(),
            self.contract_title.as_str(),
            self.contract_client.as_str(),
        ]
    }

    fn category(&self) -> AlertType {
        self.alert_type
    }
}

/// Message for a generated expiration alert.
pub fn expiration_message(title: &str, end_date: Date, today: Date) -> String {
    let days = (end_date - today).num_days();
    match days {
        0 => format!("Contract '{title}' expires today."),
        1 => format!("Contract '{title}' expires tomorrow."),
        n => format!("Contract '{title}' expires in {n} days ({end_date})."),
    }
}
