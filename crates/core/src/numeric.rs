//! Numeric coercion for scalar cell values.
//!
//! Every depth and range comparison in the engine reads numbers through
//! [`to_number`]. Unparsable input silently reads as `0.0`; [`parse_number`]
//! is the strict counterpart that reports the failure instead.

use serde_json::Value;

/// Strictly parse a scalar into a finite `f64`.
///
/// Returns `None` for absent, null, empty, unparsable, or non-finite values.
pub fn parse_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a scalar into an `f64`, defaulting to `0.0` when it cannot be parsed.
pub fn to_number(value: Option<&Value>) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(to_number(Some(&json!(12.5))), 12.5);
        assert_eq!(to_number(Some(&json!(-3))), -3.0);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(to_number(Some(&json!("  42.25 "))), 42.25);
        assert_eq!(to_number(Some(&json!("1e2"))), 100.0);
    }

    #[test]
    fn unparsable_input_reads_as_zero() {
        assert_eq!(to_number(Some(&json!("abc"))), 0.0);
        assert_eq!(to_number(Some(&json!(""))), 0.0);
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
        assert_eq!(to_number(None), 0.0);
        assert_eq!(to_number(Some(&json!([1, 2]))), 0.0);
    }

    #[test]
    fn non_finite_strings_read_as_zero() {
        assert_eq!(to_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(to_number(Some(&json!("inf"))), 0.0);
    }

    #[test]
    fn strict_parse_reports_failure() {
        assert_eq!(parse_number(Some(&json!("abc"))), None);
        assert_eq!(parse_number(Some(&json!("7"))), Some(7.0));
        assert_eq!(parse_number(Some(&json!(true))), Some(1.0));
    }
}
