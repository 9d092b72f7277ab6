//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Record lists come back
//! as a [`ListView`] so clients can render the empty state without
//! re-deriving it.

use pactum_core::attachment::AttachmentManager;
use pactum_core::contract::Contract;
use pactum_core::listing::{EmptyState, Filterable, ListController};
use pactum_core::template::Template;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Filtered slice of a collection plus its empty-state hint.
#[derive(Debug, Serialize)]
pub struct ListView<T: Serialize> {
    /// Records passing the current search and filter, newest first.
    pub items: Vec<T>,
    /// Size of the unfiltered collection.
    pub total: usize,
    pub empty_state: Option<EmptyState>,
    pub guidance: Option<&'static str>,
}

impl<T: Serialize> ListView<T> {
    /// Render the visible records of `list` through `view`.
    pub fn from_list<R, F>(list: &ListController<R>, view: F) -> Self
    where
        R: Filterable,
        F: FnMut(&R) -> T,
    {
        let empty_state = list.empty_state();
        Self {
            items: list.visible().into_iter().map(view).collect(),
            total: list.items().len(),
            empty_state,
            guidance: empty_state.map(EmptyState::guidance),
        }
    }
}

/// A contract plus the public URL of its attachment.
#[derive(Debug, Serialize)]
pub struct ContractView {
    #[serde(flatten)]
    pub contract: Contract,
    pub file_url: Option<String>,
}

impl ContractView {
    pub fn new(contract: Contract, attachments: &AttachmentManager) -> Self {
        let file_url = contract
            .file
            .as_ref()
            .map(|file| attachments.public_reference(&file.locator));
        Self { contract, file_url }
    }
}

/// A template plus the placeholder names found in its content.
#[derive(Debug, Serialize)]
pub struct TemplateView {
    #[serde(flatten)]
    pub template: Template,
    pub placeholders: Vec<String>,
}

impl From<Template> for TemplateView {
    fn from(template: Template) -> Self {
        let placeholders = template.placeholders();
        Self {
            template,
            placeholders,
        }
    }
}
