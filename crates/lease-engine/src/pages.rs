//! Declarative page table: which rules run on which template page

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::locator::FieldPattern;
use crate::renderers::{CheckboxGroup, DatePattern, FieldRule, Guard, PartyRole};

/// Page number within the document set (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u8);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.0)
    }
}

/// Which configured span class wraps values written into nested slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    Body,
    Signature,
}

/// Renderer chain of one page
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub id: PageId,
    pub value_class: ValueClass,
    pub rules: Vec<FieldRule>,
}

/// Renderer chains for a document set, keyed by page
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    pages: Vec<PageSpec>,
}

pub const CONTRACT_TYPE: CheckboxGroup = CheckboxGroup::new(
    "contract_type",
    &[
        ("new", "신규 계약"),
        ("renewal", "합의에 의한 재계약"),
        ("extension", "계약갱신요구권 행사에 의한 갱신계약"),
    ],
);

pub const RENTAL_TYPE: CheckboxGroup = CheckboxGroup::new(
    "rental_type",
    &[("jeonse", "전세"), ("monthly", "보증금 있는 월세")],
);

pub const REPAIR_NEEDED: CheckboxGroup =
    CheckboxGroup::new("repair_needed", &[("none", "없음"), ("has", "있음")]);

/// Label of a row header cell followed by the cell holding `then`
fn row(header: &str, then: &str) -> String {
    format!(r">\s*{}\s*<.*?>\s*{}", header, then)
}

/// Anchor for the first blank date after a row header
fn row_date(header: &str) -> String {
    format!(r">\s*{}\s*<[^년]*?", header)
}

impl PageTable {
    pub fn new(pages: Vec<PageSpec>) -> Self {
        Self { pages }
    }

    pub fn get(&self, id: PageId) -> Option<&PageSpec> {
        self.pages.iter().find(|spec| spec.id == id)
    }

    pub fn pages(&self) -> &[PageSpec] {
        &self.pages
    }

    /// The five-page residential lease (주택임대차 표준계약서)
    ///
    /// 1. parties, property, contract type, money terms, period, repairs
    /// 2. clauses and special terms
    /// 3. signatures
    /// 4. legal notices (no fields)
    /// 5. renewal refusal notice (계약갱신 거절통지서)
    pub fn house_lease() -> Result<Self, RenderError> {
        let page1 = vec![
            FieldRule::text("landlord_name", FieldPattern::adjacent(r"임대인\(")?),
            FieldRule::text("tenant_name", FieldPattern::adjacent(r"임차인\(")?),
            FieldRule::text("property_address", FieldPattern::nested(r">\s*소재지")?),
            FieldRule::text("land_purpose", FieldPattern::nested(r">\s*지목")?),
            FieldRule::text("land_area", FieldPattern::nested(&row("토지", "면적"))?),
            FieldRule::text("building_structure", FieldPattern::nested(r">\s*구조‧용도")?),
            FieldRule::text("building_area", FieldPattern::nested(&row("건물", "면적"))?),
            FieldRule::text("rental_part", FieldPattern::nested(r">\s*임차할부분")?),
            FieldRule::text("rental_area", FieldPattern::nested(&row("임차할부분", "면적"))?),
            FieldRule::Checkbox(CONTRACT_TYPE),
            FieldRule::Checkbox(RENTAL_TYPE),
            FieldRule::money("deposit", FieldPattern::inline(&row("보증금", "금"), "원정")?),
            FieldRule::money(
                "contract_money",
                FieldPattern::inline(&row("계약금", "금"), "원정")?,
            ),
            FieldRule::money(
                "interim_money",
                FieldPattern::inline(&row("중도금", "금"), "원정")?,
            ),
            FieldRule::date("interim_date", DatePattern::new(&row_date("중도금"))?)
                .when(Guard::Present("interim_money")),
            FieldRule::money("balance", FieldPattern::inline(&row("잔금", "금"), "원정")?),
            FieldRule::date("balance_date", DatePattern::new(&row_date("잔금"))?)
                .when(Guard::Present("balance")),
            FieldRule::money_plain(
                "monthly_rent_amount",
                FieldPattern::inline(&row(r"차임\(월세\)", "금"), "원정")?,
            ),
            FieldRule::text("rent_payment_day", FieldPattern::inline("매월", "일에")?)
                .when(Guard::Present("monthly_rent_amount")),
            FieldRule::text("bank_account", FieldPattern::inline(r"입금계좌\s*:", ")")?),
            FieldRule::date("handover_date", DatePattern::new("상태로")?),
            FieldRule::date("contract_start", DatePattern::new(&row_date("임대차기간"))?),
            FieldRule::date("contract_end", DatePattern::new("(?:인도일로부터|일부터)")?),
            FieldRule::Checkbox(REPAIR_NEEDED),
            FieldRule::text("repair_content", FieldPattern::inline(r"수리할 내용\s*:", ")")?)
                .when(Guard::Equals("repair_needed", "has")),
        ];

        let page2 = vec![FieldRule::multiline(
            "special_terms",
            FieldPattern::nested(r">\s*특약사항")?,
        )];

        let page3 = vec![
            FieldRule::date("contract_date", DatePattern::new(r"계약일\s*:")?),
            FieldRule::Signature(PartyRole::Landlord),
            FieldRule::Signature(PartyRole::Tenant),
            FieldRule::Signature(PartyRole::Agent),
        ];

        let page5 = vec![
            FieldRule::date("notice_date", DatePattern::new(r"통지일\s*:")?),
            FieldRule::Signature(PartyRole::Landlord),
            FieldRule::Signature(PartyRole::Tenant),
            FieldRule::text("property_address", FieldPattern::nested(r">\s*임차주택 소재지")?),
            FieldRule::date("contract_start", DatePattern::new(&row_date("임대차기간"))?),
            FieldRule::date("contract_end", DatePattern::new("일부터")?),
        ];

        Ok(Self::new(vec![
            PageSpec {
                id: PageId(1),
                value_class: ValueClass::Body,
                rules: page1,
            },
            PageSpec {
                id: PageId(2),
                value_class: ValueClass::Body,
                rules: page2,
            },
            PageSpec {
                id: PageId(3),
                value_class: ValueClass::Signature,
                rules: page3,
            },
            PageSpec {
                id: PageId(4),
                value_class: ValueClass::Body,
                rules: Vec::new(),
            },
            PageSpec {
                id: PageId(5),
                value_class: ValueClass::Signature,
                rules: page5,
            },
        ]))
    }
}
