//! Contract record, its enums, and the tag/value coercions shared by the
//! form schema and the persistence layer.

use serde::{Deserialize, Serialize};

use crate::attachment::FileRef;
use crate::error::CoreError;
use crate::listing::Filterable;
use crate::record::Record;
use crate::types::{Date, DbId, Timestamp};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of agreement. Shared by contracts and templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    #[default]
    Service,
    Supply,
    Partnership,
    Confidentiality,
    Employment,
    Other,
}

impl ContractType {
    pub const ALL: [ContractType; 6] = [
        Self::Service,
        Self::Supply,
        Self::Partnership,
        Self::Confidentiality,
        Self::Employment,
        Self::Other,
    ];

    /// Parse from the database `contract_type` / `template_type` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown contract type '{name}'")))
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Supply => "supply",
            Self::Partnership => "partnership",
            Self::Confidentiality => "confidentiality",
            Self::Employment => "employment",
            Self::Other => "other",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Service => "Service Agreement",
            Self::Supply => "Supply",
            Self::Partnership => "Partnership",
            Self::Confidentiality => "Confidentiality",
            Self::Employment => "Employment",
            Self::Other => "Other",
        }
    }
}

/// Contract lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Draft,
    Active,
    Pending,
    Expired,
    Cancelled,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 5] = [
        Self::Draft,
        Self::Active,
        Self::Pending,
        Self::Expired,
        Self::Cancelled,
    ];

    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown contract status '{name}'")))
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    /// Badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A contract owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub contract_type: ContractType,
    pub client_name: String,
    pub client_email: Option<String>,
    pub contract_value: Option<f64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ContractStatus,
    pub tags: Vec<String>,
    pub file: Option<FileRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The editable fields of a contract, normalized by the form schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDraft {
    pub title: String,
    pub description: Option<String>,
    pub contract_type: ContractType,
    pub client_name: String,
    pub client_email: Option<String>,
    pub contract_value: Option<f64>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ContractStatus,
    pub tags: Vec<String>,
    pub file: Option<FileRef>,
}

impl Contract {
    /// The editable fields as they would be written back.
    pub fn draft(&self) -> ContractDraft {
        ContractDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            contract_type: self.contract_type,
            client_name: self.client_name.clone(),
            client_email: self.client_email.clone(),
            contract_value: self.contract_value,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            tags: self.tags.clone(),
            file: self.file.clone(),
        }
    }
}

impl Record for Contract {
    type Draft = ContractDraft;

    const ENTITY: &'static str = "Contract";

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn attachment(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }
}

impl Filterable for Contract {
    type Category = ContractStatus;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.client_name.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn category(&self) -> ContractStatus {
        self.status
    }
}

// ---------------------------------------------------------------------------
// Coercions
// ---------------------------------------------------------------------------

/// Split a comma-separated tag string into trimmed, non-empty labels.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into their comma-separated display form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Coerce a monetary input to a number.
///
/// Blank input and zero are treated as absent; negative, non-finite or
/// unparseable input is rejected with a field message.
pub fn coerce_value(input: &str) -> Result<Option<f64>, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse().map_err(|_| "Value must be a number.")?;
    if !value.is_finite() {
        return Err("Value must be a number.");
    }
    if value < 0.0 {
        return Err("Value must not be negative.");
    }
    if value == 0.0 {
        return Ok(None);
    }
    Ok(Some(value))
}

/// Render an optional value back into its form input.
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
