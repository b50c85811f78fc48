//! The pizza order record and the lenient parsing of its numeric fields.
//!
//! The dataset comes from a hand-maintained JSON file where quantities and
//! incomes may be strings, numbers or missing entirely. Rather than rejecting
//! such records, every field is kept as text and validated when it is used.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::Date;

use crate::date::parse_order_date;

/// A single pizza order as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The size label, e.g. "XL". Compared byte-exact.
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: String,
    /// The order date in `month/day/year` form.
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    /// The number of pizzas in the order.
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: String,
    /// The amount paid for the order.
    #[serde(default, deserialize_with = "lenient_text")]
    pub income: String,
}

impl Order {
    /// Create an order from its raw text fields.
    pub fn new(size: &str, date: &str, quantity: &str, income: &str) -> Self {
        Self {
            size: size.to_owned(),
            date: date.to_owned(),
            quantity: quantity.to_owned(),
            income: income.to_owned(),
        }
    }

    /// The order date, or `None` if it is not a real calendar date.
    pub fn parsed_date(&self) -> Option<Date> {
        parse_order_date(&self.date)
    }

    /// The quantity and income of the order if both are valid numbers.
    ///
    /// A record only contributes to totals when this returns `Some`.
    pub fn amounts(&self) -> Option<(i64, f64)> {
        let quantity = parse_quantity(&self.quantity)?;
        let income = parse_income(&self.income)?;

        Some((quantity, income))
    }
}

/// Accept any JSON scalar for a text field.
///
/// Numbers and booleans keep their JSON text, `null`, arrays and objects
/// become the empty string.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    };

    Ok(text)
}

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and a single sign are allowed and anything after the
/// digits is ignored, so "2 pizzas" is 2 and "2.9" is 2. Returns `None` when
/// there are no leading digits or the value does not fit in an `i64`.
pub fn parse_quantity(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digit_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return None;
    }

    text[..sign_len + digit_len].parse().ok()
}

/// Parse the leading decimal number of `text`.
///
/// Accepts an optional sign, digits with an optional fraction and an
/// optional exponent; trailing text is ignored. Non-finite results are
/// rejected, so "Infinity" and "1e999" are `None`.
pub fn parse_income(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(text.starts_with(['+', '-']));
    let integer_digits = count_digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        if fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(exponent_end);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|income| income.is_finite())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Order, parse_income, parse_quantity};

    #[test]
    fn parse_quantity_reads_leading_integer() {
        assert_eq!(parse_quantity("2"), Some(2));
        assert_eq!(parse_quantity("  12"), Some(12));
        assert_eq!(parse_quantity("-3"), Some(-3));
        assert_eq!(parse_quantity("+4"), Some(4));
        assert_eq!(parse_quantity("2.9"), Some(2));
        assert_eq!(parse_quantity("7 pizzas"), Some(7));
    }

    #[test]
    fn parse_quantity_rejects_non_numbers() {
        assert_eq!(parse_quantity("bad"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("-"), None);
        assert_eq!(parse_quantity(".5"), None);
        assert_eq!(parse_quantity("99999999999999999999999"), None);
    }

    #[test]
    fn parse_income_reads_leading_decimal() {
        assert_eq!(parse_income("20.00"), Some(20.0));
        assert_eq!(parse_income(" 15.5"), Some(15.5));
        assert_eq!(parse_income(".5"), Some(0.5));
        assert_eq!(parse_income("3."), Some(3.0));
        assert_eq!(parse_income("-1.25"), Some(-1.25));
        assert_eq!(parse_income("1e3"), Some(1000.0));
        assert_eq!(parse_income("2e"), Some(2.0));
        assert_eq!(parse_income("12.5USD"), Some(12.5));
    }

    #[test]
    fn parse_income_rejects_non_finite_and_garbage() {
        assert_eq!(parse_income("Infinity"), None);
        assert_eq!(parse_income("1e999"), None);
        assert_eq!(parse_income("NaN"), None);
        assert_eq!(parse_income("abc"), None);
        assert_eq!(parse_income("."), None);
        assert_eq!(parse_income(""), None);
    }

    #[test]
    fn amounts_require_both_fields() {
        assert_eq!(
            Order::new("XL", "01/15/2024", "2", "20.00").amounts(),
            Some((2, 20.0))
        );
        assert_eq!(Order::new("XL", "01/15/2024", "bad", "20.00").amounts(), None);
        assert_eq!(Order::new("XL", "01/15/2024", "2", "").amounts(), None);
    }

    #[test]
    fn parsed_date_uses_month_day_year() {
        let order = Order::new("XL", "1/5/2024", "1", "1");
        assert_eq!(order.parsed_date(), Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn deserializes_mixed_field_types() {
        let json = r#"{"size": "XL", "date": "01/15/2024", "quantity": 2, "income": 20.5}"#;

        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order, Order::new("XL", "01/15/2024", "2", "20.5"));
    }

    #[test]
    fn deserializes_missing_and_null_fields_as_empty() {
        let json = r#"{"size": "M", "quantity": null}"#;

        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order, Order::new("M", "", "", ""));
        assert_eq!(order.parsed_date(), None);
        assert_eq!(order.amounts(), None);
    }
}
