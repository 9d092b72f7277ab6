//! Advanced contract search: query parameters, creation-date ranges and
//! LIKE escaping.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::contract::{ContractStatus, ContractType};
use crate::types::Timestamp;

/// Creation-date window applied to `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    LastMonth,
    #[serde(rename = "last_3_months")]
    Last3Months,
    LastYear,
}

impl DateRange {
    /// Lower bound for `created_at`, or `None` for no bound.
    pub fn since(self, now: Timestamp) -> Option<Timestamp> {
        let months = match self {
            Self::All => return None,
            Self::LastMonth => 1,
            Self::Last3Months => 3,
            Self::LastYear => 12,
        };
        now.checked_sub_months(Months::new(months))
    }
}

/// Parameters of one advanced search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub status: Option<ContractStatus>,
    pub contract_type: Option<ContractType>,
    pub date_range: DateRange,
}

impl SearchQuery {
    /// A blank term yields an empty result without querying.
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }

    /// `%term%` with LIKE metacharacters escaped.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(self.term.trim()))
    }
}

/// Escape `%`, `_` and `\` for use in a `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
