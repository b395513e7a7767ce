//! Money fields: Arabic amount plus native numeral spelling

use super::text::fill_slot;
use super::RenderContext;
use crate::error::RenderError;
use crate::locator::{locate_and_replace, FieldPattern, SlotKind};
use crate::numerals::{format_amount, number_to_native_numerals, NegativeAmount};

/// Write `amount` into the field's slot.
///
/// Inline slots receive `{amount}{terminator}(₩ {numerals})`, matching the
/// `금 100,000,000원정(₩ 일억)` convention of the lease form. Container slots
/// receive the amount followed by the same parenthesized spelling.
pub(crate) fn render_money(
    page: String,
    field: &str,
    pattern: &FieldPattern,
    amount: i64,
    with_numerals: bool,
    ctx: &RenderContext<'_>,
) -> Result<String, RenderError> {
    let spelled = if with_numerals {
        let numerals =
            number_to_native_numerals(amount).map_err(|NegativeAmount(value)| {
                RenderError::InvalidNumeralInput {
                    field: field.to_string(),
                    value,
                }
            })?;
        format!("(₩ {})", numerals)
    } else if amount < 0 {
        return Err(RenderError::InvalidFieldValue {
            field: field.to_string(),
            value: amount.to_string(),
        });
    } else {
        String::new()
    };
    let formatted = format_amount(amount);

    let updated = locate_and_replace(page, field, pattern, ctx.locator, |slot, existing| {
        match slot.kind {
            SlotKind::Inline { .. } => {
                format!(" {}{}{}", formatted, existing.trim_start(), spelled)
            }
            _ => fill_slot(
                slot,
                existing,
                &format!("{}{}", formatted, spelled),
                ctx.value_class,
            ),
        }
    })?;
    tracing::debug!(field, amount, "Money field rendered");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::RegexLocator;
    use crate::record::ContractRecord;
    use pretty_assertions::assert_eq;

    fn ctx(record: &ContractRecord) -> RenderContext<'_> {
        RenderContext {
            record,
            locator: &RegexLocator,
            value_class: "hrt cs106",
        }
    }

    #[test]
    fn test_inline_money_with_numerals() {
        let record = ContractRecord::new();
        let pattern = FieldPattern::inline(r">\s*보증금\s*<.*?>\s*금", "원정").unwrap();
        let page = "<span>보증금</span><span>금        원정</span>".to_string();

        let updated =
            render_money(page, "deposit", &pattern, 100_000_000, true, &ctx(&record)).unwrap();
        assert_eq!(
            updated,
            "<span>보증금</span><span>금 100,000,000원정(₩ 일억)</span>"
        );
    }

    #[test]
    fn test_rent_without_numerals() {
        let record = ContractRecord::new();
        let pattern = FieldPattern::inline(r">\s*차임\s*<.*?>\s*금", "원정").unwrap();
        let page = "<span>차임</span><span>금   원정은 매월</span>".to_string();

        let updated =
            render_money(page, "monthly_rent_amount", &pattern, 500_000, false, &ctx(&record))
                .unwrap();
        assert_eq!(updated, "<span>차임</span><span>금 500,000원정은 매월</span>");
    }

    #[test]
    fn test_nested_money_slot() {
        let record = ContractRecord::new();
        let pattern = FieldPattern::nested("보증금").unwrap();
        let page = r#"<span>보증금</span><div class="hcI"></div>"#.to_string();

        let updated =
            render_money(page, "deposit", &pattern, 10_000, true, &ctx(&record)).unwrap();
        assert!(updated.contains(r#"<span class="hrt cs106">10,000(₩ 일만)</span>"#));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let record = ContractRecord::new();
        let pattern = FieldPattern::inline("금", "원정").unwrap();

        let err = render_money("금 원정".to_string(), "deposit", &pattern, -5, true, &ctx(&record))
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidNumeralInput {
                field: "deposit".to_string(),
                value: -5,
            }
        );
    }

    #[test]
    fn test_negative_rent_is_invalid_value() {
        let record = ContractRecord::new();
        let pattern = FieldPattern::inline("금", "원정").unwrap();

        let err = render_money(
            "금 원정".to_string(),
            "monthly_rent_amount",
            &pattern,
            -500_000,
            false,
            &ctx(&record),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidFieldValue {
                field: "monthly_rent_amount".to_string(),
                value: "-500000".to_string(),
            }
        );
    }
}
