//! Contract templates and `{{placeholder}}` extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::contract::ContractType;
use crate::listing::Filterable;
use crate::record::Record;
use crate::types::{DbId, Timestamp};

/// `{{ name }}` markers; names are word characters, dots and dashes.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("placeholder regex is valid")
});

/// A reusable contract template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub template_type: ContractType,
    pub content: String,
    /// Reserved for future templating; always an empty object.
    pub variables: serde_json::Value,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable template fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDraft {
    pub name: String,
    pub description: Option<String>,
    pub template_type: ContractType,
    pub content: String,
    pub is_public: bool,
}

impl Template {
    pub fn draft(&self) -> TemplateDraft {
        TemplateDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            template_type: self.template_type,
            content: self.content.clone(),
            is_public: self.is_public,
        }
    }

    pub fn placeholders(&self) -> Vec<String> {
        placeholders(&self.content)
    }
}

impl Record for Template {
    type Draft = TemplateDraft;

    const ENTITY: &'static str = "Template";

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Filterable for Template {
    type Category = ContractType;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(d) = &self.description {
            fields.push(d.as_str());
        }
        fields
    }

    fn category(&self) -> ContractType {
        self.template_type
    }
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(content) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}
