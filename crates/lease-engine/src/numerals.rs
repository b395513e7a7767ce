//! Amount formatting and native numeral spelling
//!
//! Lease documents show every amount twice: in Arabic digits with thousands
//! separators and spelled out in Sino-Korean numerals. The spelled-out form
//! groups digits by 10^4 (만, 억, 조, 경) rather than by 10^3.

/// Group unit for each successive 10^4 chunk
const GROUP_UNITS: [&str; 5] = ["", "만", "억", "조", "경"];

/// Digit names, index 0 contributes no text
const DIGITS: [&str; 10] = ["", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];

/// Position names within a chunk (ones, tens, hundreds, thousands)
const POSITIONS: [&str; 4] = ["", "십", "백", "천"];

/// Spelling of zero
pub const ZERO_NUMERAL: &str = "영";

/// Error returned for amounts the numeral spelling is not defined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeAmount(pub i64);

/// Spell out a non-negative amount in native numerals
///
/// ```
/// use lease_engine::number_to_native_numerals;
///
/// assert_eq!(number_to_native_numerals(0).unwrap(), "영");
/// assert_eq!(number_to_native_numerals(100_000_000).unwrap(), "일억");
/// assert_eq!(number_to_native_numerals(5_300_000).unwrap(), "오백삼십만");
/// ```
pub fn number_to_native_numerals(amount: i64) -> Result<String, NegativeAmount> {
    if amount < 0 {
        return Err(NegativeAmount(amount));
    }
    if amount == 0 {
        return Ok(ZERO_NUMERAL.to_string());
    }

    let mut remaining = amount as u64;
    let mut result = String::new();
    let mut group = 0;

    while remaining > 0 {
        let chunk = (remaining % 10_000) as usize;
        if chunk > 0 {
            result = format!("{}{}{}", chunk_to_numerals(chunk), GROUP_UNITS[group], result);
        }
        remaining /= 10_000;
        group += 1;
    }

    Ok(result)
}

fn chunk_to_numerals(mut chunk: usize) -> String {
    let mut result = String::new();
    let mut position = 0;

    while chunk > 0 {
        let digit = chunk % 10;
        if digit > 0 {
            result = format!("{}{}{}", DIGITS[digit], POSITIONS[position], result);
        }
        chunk /= 10;
        position += 1;
    }

    result
}

/// Format an amount with comma thousands separators
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_special_cased() {
        assert_eq!(number_to_native_numerals(0).unwrap(), "영");
    }

    #[test]
    fn test_single_chunk() {
        assert_eq!(number_to_native_numerals(1).unwrap(), "일");
        assert_eq!(number_to_native_numerals(10).unwrap(), "일십");
        assert_eq!(number_to_native_numerals(305).unwrap(), "삼백오");
        assert_eq!(number_to_native_numerals(9999).unwrap(), "구천구백구십구");
    }

    #[test]
    fn test_group_units() {
        assert_eq!(number_to_native_numerals(10_000).unwrap(), "일만");
        assert_eq!(number_to_native_numerals(5_000_000).unwrap(), "오백만");
        assert_eq!(number_to_native_numerals(100_000_000).unwrap(), "일억");
        assert_eq!(
            number_to_native_numerals(1_000_000_000_000).unwrap(),
            "일조"
        );
    }

    #[test]
    fn test_zero_chunks_are_skipped() {
        // 1 0000 0001: the middle chunk emits nothing, not "만"
        assert_eq!(number_to_native_numerals(100_000_001).unwrap(), "일억일");
        assert_eq!(
            number_to_native_numerals(2_000_000_030_000).unwrap(),
            "이조삼만"
        );
    }

    #[test]
    fn test_mixed_amount() {
        assert_eq!(
            number_to_native_numerals(123_456_789).unwrap(),
            "일억이천삼백사십오만육천칠백팔십구"
        );
    }

    #[test]
    fn test_largest_amount_uses_gyeong() {
        assert!(number_to_native_numerals(i64::MAX)
            .unwrap()
            .starts_with("구백이십이경"));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(number_to_native_numerals(-1), Err(NegativeAmount(-1)));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(1_000), "1,000");
        assert_eq!(format_amount(100_000_000), "100,000,000");
        assert_eq!(format_amount(-1_234_567), "-1,234,567");
    }
}
