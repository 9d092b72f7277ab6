//! Form validation schemas.
//!
//! Forms hold raw client input; format and length rules are `validator`
//! derives, required text is checked after trimming. The schema functions
//! turn a form into a normalized draft, or into a [`FieldErrors`] map when
//! any rule fails. Evaluation is pure and synchronous.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::contract::{coerce_value, parse_tags, ContractDraft, ContractStatus, ContractType};
use crate::template::TemplateDraft;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Field name -> human-readable message. One message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", first.code));
                out.insert(field.to_string(), message);
            }
        }
        out
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Empty means "no email"; anything else must be a valid address.
fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        Ok(())
    } else {
        Err(field_error("email", "Invalid email address."))
    }
}

fn validate_contract_value(value: &str) -> Result<(), ValidationError> {
    coerce_value(value)
        .map(|_| ())
        .map_err(|message| field_error("contract_value", message))
}

/// Record a required-field error when `value` is empty or only whitespace.
fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

/// Blank text becomes `None`; anything else is kept verbatim.
fn optional_text(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Accept a monetary value as either a JSON number or a string.
fn value_input<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
        Raw::Null(()) => String::new(),
    })
}

// ---------------------------------------------------------------------------
// Contract form
// ---------------------------------------------------------------------------

/// Raw contract form input as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContractForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contract_type: ContractType,
    pub client_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_email"))]
    pub client_email: String,
    #[serde(default, deserialize_with = "value_input")]
    #[validate(custom(function = "validate_contract_value"))]
    pub contract_value: String,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub status: ContractStatus,
    /// Comma-separated labels.
    #[serde(default)]
    pub tags: String,
}

impl Default for ContractForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            contract_type: ContractType::Service,
            client_name: String::new(),
            client_email: String::new(),
            contract_value: "0".to_string(),
            start_date: None,
            end_date: None,
            status: ContractStatus::Draft,
            tags: String::new(),
        }
    }
}

/// Validate and normalize a contract form.
///
/// The returned draft carries no file reference; the form controller
/// attaches one after any upload.
pub fn validate_contract(form: &ContractForm) -> Result<ContractDraft, FieldErrors> {
    let mut errors = form.validate().err().map(FieldErrors::from).unwrap_or_default();
    require_text(&mut errors, "title", &form.title, "Title is required.");
    require_text(&mut errors, "client_name", &form.client_name, "Client name is required.");
    if !errors.is_empty() {
        return Err(errors);
    }

    // Already checked by the rule above.
    let contract_value = coerce_value(&form.contract_value).unwrap_or(None);

    Ok(ContractDraft {
        title: form.title.clone(),
        description: optional_text(&form.description),
        contract_type: form.contract_type,
        client_name: form.client_name.clone(),
        client_email: optional_text(&form.client_email).map(|e| e.trim().to_string()),
        contract_value,
        start_date: form.start_date,
        end_date: form.end_date,
        status: form.status,
        tags: parse_tags(&form.tags),
        file: None,
    })
}

// ---------------------------------------------------------------------------
// Template form
// ---------------------------------------------------------------------------

/// Raw template form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template_type: ContractType,
    pub content: String,
    #[serde(default)]
    pub is_public: bool,
}

pub fn validate_template(form: &TemplateForm) -> Result<TemplateDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "name", &form.name, "Name is required.");
    require_text(&mut errors, "content", &form.content, "Content is required.");
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(TemplateDraft {
        name: form.name.clone(),
        description: optional_text(&form.description),
        template_type: form.template_type,
        content: form.content.clone(),
        is_public: form.is_public,
    })
}

// ---------------------------------------------------------------------------
// Profile form
// ---------------------------------------------------------------------------

/// Profile fields; all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name is too long."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Last name is too long."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Company is too long."))]
    pub company: String,
    #[serde(default)]
    #[validate(length(max = 40, message = "Phone is too long."))]
    pub phone: String,
}

/// Normalized profile values: blank fields become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
}

pub fn validate_profile(form: &ProfileForm) -> Result<ProfileDraft, FieldErrors> {
    form.validate().map_err(FieldErrors::from)?;

    Ok(ProfileDraft {
        first_name: optional_text(&form.first_name),
        last_name: optional_text(&form.last_name),
        company: optional_text(&form.company),
        phone: optional_text(&form.phone),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContractForm {
        ContractForm {
            title: "Office lease".into(),
            client_name: "ACME".into(),
            ..ContractForm::default()
        }
    }

    #[test]
    fn tags_are_normalized() {
        let form = ContractForm {
            tags: "a, b ,, c".into(),
            ..valid_form()
        };
        let draft = validate_contract(&form).unwrap();
        assert_eq!(draft.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_title_is_a_field_error() {
        let form = ContractForm {
            title: String::new(),
            ..valid_form()
        };
        let errors = validate_contract(&form).unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn whitespace_only_required_fields_are_field_errors() {
        let form = ContractForm {
            title: "   ".into(),
            client_name: "\t ".into(),
            ..valid_form()
        };
        let errors = validate_contract(&form).unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required."));
        assert_eq!(errors.get("client_name"), Some("Client name is required."));

        let errors = validate_template(&TemplateForm {
            name: "  ".into(),
            content: "\n".into(),
            ..TemplateForm::default()
        })
        .unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required."));
        assert_eq!(errors.get("content"), Some("Content is required."));
    }

    #[test]
    fn missing_client_name_is_a_field_error() {
        let form = ContractForm {
            client_name: String::new(),
            ..valid_form()
        };
        assert!(validate_contract(&form).unwrap_err().contains("client_name"));
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        for bad in ["acme.example.com", "acme", "acme@"] {
            let form = ContractForm {
                client_email: bad.into(),
                ..valid_form()
            };
            let errors = validate_contract(&form).unwrap_err();
            assert_eq!(errors.get("client_email"), Some("Invalid email address."), "{bad}");
        }
    }

    #[test]
    fn empty_email_means_no_email() {
        let draft = validate_contract(&valid_form()).unwrap();
        assert_eq!(draft.client_email, None);

        let form = ContractForm {
            client_email: "legal@acme.com".into(),
            ..valid_form()
        };
        assert_eq!(
            validate_contract(&form).unwrap().client_email.as_deref(),
            Some("legal@acme.com")
        );
    }

    #[test]
    fn contract_value_is_coerced() {
        let form = ContractForm {
            contract_value: " 2500.75 ".into(),
            ..valid_form()
        };
        assert_eq!(validate_contract(&form).unwrap().contract_value, Some(2500.75));

        // Create-mode default "0" means absent.
        assert_eq!(validate_contract(&valid_form()).unwrap().contract_value, None);

        let form = ContractForm {
            contract_value: "lots".into(),
            ..valid_form()
        };
        assert!(validate_contract(&form).unwrap_err().contains("contract_value"));
    }

    #[test]
    fn several_failures_are_reported_together() {
        let form = ContractForm {
            title: String::new(),
            client_name: String::new(),
            client_email: "nope".into(),
            ..ContractForm::default()
        };
        let errors = validate_contract(&form).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.to_string().contains("title: Title is required."));
    }

    #[test]
    fn form_accepts_numeric_or_text_value() {
        let form: ContractForm = serde_json::from_value(serde_json::json!({
            "title": "T",
            "client_name": "C",
            "contract_value": 1200
        }))
        .unwrap();
        assert_eq!(form.contract_value, "1200");

        let form: ContractForm = serde_json::from_value(serde_json::json!({
            "title": "T",
            "client_name": "C",
            "contract_value": "99.5",
            "start_date": "2025-01-31",
            "status": "active"
        }))
        .unwrap();
        assert_eq!(form.contract_value, "99.5");
        assert_eq!(form.status, ContractStatus::Active);
        assert_eq!(form.start_date, Date::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn template_requires_name_and_content() {
        let errors = validate_template(&TemplateForm::default()).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("content"));

        let draft = validate_template(&TemplateForm {
            name: "NDA".into(),
            content: "Between {{party_a}} and {{party_b}}".into(),
            ..TemplateForm::default()
        })
        .unwrap();
        assert_eq!(draft.description, None);
        assert!(!draft.is_public);
    }

    #[test]
    fn profile_blank_fields_become_none() {
        let draft = validate_profile(&ProfileForm {
            first_name: "Ana".into(),
            phone: "   ".into(),
            ..ProfileForm::default()
        })
        .unwrap();
        assert_eq!(draft.first_name.as_deref(), Some("Ana"));
        assert_eq!(draft.phone, None);
    }
}
