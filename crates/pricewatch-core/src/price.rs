//! Price extraction from noisy formatted text.
//!
//! Catalog markup renders prices like `"12 500 ₽"`, `"1.499,00 руб."` or
//! `"Цена: 990"`. Extraction never fails hard: unparseable input is logged
//! and reported as absent so the candidate can be dropped upstream.

/// Which characters a source's price markup is allowed to carry.
///
/// Two policies exist because the sources disagree: the HTML catalogs render
/// fractional rubles (`Decimal`), while the primary site renders whole-ruble
/// integers with group separators (`Integer`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePolicy {
    /// First `digits[(.|,)digits]` run, comma treated as a decimal point.
    Decimal,
    /// Every digit concatenated, parsed as a whole number.
    Integer,
}

/// Pulls a numeric price out of `raw` under the given policy.
///
/// Returns `None` when no digits are present or the run does not parse;
/// never panics or errors.
#[must_use]
pub fn extract_price(raw: &str, policy: PricePolicy) -> Option<f64> {
    let parsed = match policy {
        PricePolicy::Decimal => extract_decimal(raw),
        PricePolicy::Integer => extract_integer(raw),
    };
    if parsed.is_none() && raw.chars().any(|c| c.is_ascii_digit()) {
        tracing::debug!(raw, ?policy, "price text did not parse");
    }
    parsed
}

fn extract_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let bytes = cleaned.as_bytes();

    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    // One optional separator, only when digits follow it.
    if end + 1 < bytes.len()
        && (bytes[end] == b'.' || bytes[end] == b',')
        && bytes[end + 1].is_ascii_digit()
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    cleaned[start..end].replace(',', ".").parse::<f64>().ok()
}

fn extract_integer(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let parsed = digits.parse::<u64>().ok()?;
    #[allow(clippy::cast_precision_loss)]
    let value = parsed as f64;
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_plain_integer() {
        assert_eq!(extract_price("12500", PricePolicy::Decimal), Some(12500.0));
    }

    #[test]
    fn decimal_with_currency_and_spaces() {
        assert_eq!(
            extract_price("12 500 ₽", PricePolicy::Decimal),
            Some(12500.0)
        );
    }

    #[test]
    fn decimal_comma_is_decimal_point() {
        assert_eq!(
            extract_price("1499,90 руб.", PricePolicy::Decimal),
            Some(1499.90)
        );
    }

    #[test]
    fn decimal_dot_fraction() {
        assert_eq!(extract_price("Цена: 89.5", PricePolicy::Decimal), Some(89.5));
    }

    #[test]
    fn decimal_trailing_separator_without_digits_ignored() {
        assert_eq!(extract_price("120.", PricePolicy::Decimal), Some(120.0));
    }

    #[test]
    fn decimal_no_digits_is_none() {
        assert_eq!(extract_price("по запросу", PricePolicy::Decimal), None);
        assert_eq!(extract_price("", PricePolicy::Decimal), None);
    }

    #[test]
    fn integer_concatenates_grouped_digits() {
        assert_eq!(
            extract_price("12 500 руб.", PricePolicy::Integer),
            Some(12500.0)
        );
    }

    #[test]
    fn integer_ignores_separators_entirely() {
        // Integer policy strips the separator too: "1,5" reads as 15.
        assert_eq!(extract_price("1,5", PricePolicy::Integer), Some(15.0));
    }

    #[test]
    fn integer_no_digits_is_none() {
        assert_eq!(extract_price("нет данных", PricePolicy::Integer), None);
    }
}
