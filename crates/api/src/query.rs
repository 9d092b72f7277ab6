//! Query parameter types for the list and search endpoints.
//!
//! Category filters arrive as names; a missing, empty or `all` value means
//! no filter.

use pactum_core::alert::AlertType;
use pactum_core::contract::{ContractStatus, ContractType};
use pactum_core::error::CoreError;
use pactum_core::listing::CategoryFilter;
use pactum_core::search::{DateRange, SearchQuery};
use serde::Deserialize;

/// Parse an optional category name into a filter.
fn category<C, F>(value: Option<&str>, parse: F) -> Result<CategoryFilter<C>, CoreError>
where
    C: Copy + PartialEq,
    F: FnOnce(&str) -> Result<C, CoreError>,
{
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(CategoryFilter::All),
        Some(name) => parse(name).map(CategoryFilter::Only),
    }
}

/// `GET /contracts?search=&status=`
#[derive(Debug, Default, Deserialize)]
pub struct ContractListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ContractListParams {
    pub fn status(&self) -> Result<CategoryFilter<ContractStatus>, CoreError> {
        category(self.status.as_deref(), ContractStatus::from_name)
    }
}

/// `GET /templates?search=&template_type=`
#[derive(Debug, Default, Deserialize)]
pub struct TemplateListParams {
    pub search: Option<String>,
    pub template_type: Option<String>,
}

impl TemplateListParams {
    pub fn template_type(&self) -> Result<CategoryFilter<ContractType>, CoreError> {
        category(self.template_type.as_deref(), ContractType::from_name)
    }
}

/// `GET /alerts?search=&alert_type=`
#[derive(Debug, Default, Deserialize)]
pub struct AlertListParams {
    pub search: Option<String>,
    pub alert_type: Option<String>,
}

impl AlertListParams {
    pub fn alert_type(&self) -> Result<CategoryFilter<AlertType>, CoreError> {
        category(self.alert_type.as_deref(), AlertType::from_name)
    }
}

/// `GET /search?q=&status=&contract_type=&date_range=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub status: Option<String>,
    pub contract_type: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl SearchParams {
    pub fn into_query(self) -> Result<SearchQuery, CoreError> {
        let status = match category(self.status.as_deref(), ContractStatus::from_name)? {
            CategoryFilter::All => None,
            CategoryFilter::Only(s) => Some(s),
        };
        let contract_type =
            match category(self.contract_type.as_deref(), ContractType::from_name)? {
                CategoryFilter::All => None,
                CategoryFilter::Only(t) => Some(t),
            };
        Ok(SearchQuery {
            term: self.q,
            status,
            contract_type,
            date_range: self.date_range,
        })
    }
}
