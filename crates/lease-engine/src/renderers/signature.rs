//! Party identity blocks (signature table, notice form)

use serde::{Deserialize, Serialize};

use super::text::render_text;
use super::RenderContext;
use crate::error::RenderError;
use crate::locator::FieldPattern;

/// Contract party whose identity block is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Landlord,
    Tenant,
    Agent,
}

/// `(attribute, form label)` for landlords and tenants
const PARTY_ATTRIBUTES: &[(&str, &str)] = &[
    ("name", "성명"),
    ("address", "주소"),
    ("phone", "전화"),
    ("id", "주민등록번호"),
];

/// `(attribute, form label)` for the brokerage agent
const AGENT_ATTRIBUTES: &[(&str, &str)] = &[
    ("name", "성명"),
    ("license", "등록번호"),
    ("office", "사무소명칭"),
    ("address", "사무소소재지"),
    ("phone", "전화"),
];

impl PartyRole {
    /// Prefix of the record keys, e.g. `landlord` in `landlord_name`
    pub fn key_prefix(&self) -> &'static str {
        match self {
            PartyRole::Landlord => "landlord",
            PartyRole::Tenant => "tenant",
            PartyRole::Agent => "agent",
        }
    }

    /// Row header of the role on the form
    pub fn label(&self) -> &'static str {
        match self {
            PartyRole::Landlord => "임대인",
            PartyRole::Tenant => "임차인",
            PartyRole::Agent => "중개업자",
        }
    }

    pub fn attributes(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartyRole::Agent => AGENT_ATTRIBUTES,
            _ => PARTY_ATTRIBUTES,
        }
    }

    /// Label pattern: the role's row header, then the attribute's header
    /// cell further on
    pub fn label_pattern(&self, attribute_label: &str) -> String {
        format!(r">\s*{}\s*<.*?>\s*{}", self.label(), attribute_label)
    }

    /// Fill every attribute present in the record. Absent attributes, and
    /// attributes the page has no label for, are skipped.
    pub fn apply(&self, page: String, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut page = page;
        for (attribute, attribute_label) in self.attributes() {
            let key = format!("{}_{}", self.key_prefix(), attribute);
            let Some(value) = ctx.record.text(&key) else {
                continue;
            };
            let pattern = FieldPattern::nested(&self.label_pattern(attribute_label))?;
            page = render_text(page, &key, &pattern, &value, false, ctx)?;
        }
        Ok(page)
    }
}
