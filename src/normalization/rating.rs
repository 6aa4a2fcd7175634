use std::cmp::Ordering;

use serde_json::Value;

/// Interpret a raw rating value as a finite number.
///
/// Accepts JSON numbers, numeric strings ("4.5") and star strings
/// ("4.5 stars"). Anything else, including non-finite values, is unrated.
pub fn parse_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<f64>()
                .ok()
                .or_else(|| parse_star_string(trimmed))?
        }
        _ => return None,
    };
    rating.is_finite().then_some(rating)
}

// "4.5 stars", "4.5stars", "4 star": a clean number, then an optional unit.
fn parse_star_string(input: &str) -> Option<f64> {
    let lowered = input.to_ascii_lowercase();
    let number = lowered
        .strip_suffix("stars")
        .or_else(|| lowered.strip_suffix("star"))?
        .trim_end();
    number.parse::<f64>().ok()
}

/// Ranking comparator: highest rating first, unrated records last.
///
/// Returns `Equal` for equal ratings (and for two unrated records) so a stable
/// sort keeps their incoming order.
pub fn rank_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_rating(&json!(4.2)), Some(4.2));
        assert_eq!(parse_rating(&json!(3)), Some(3.0));
        assert_eq!(parse_rating(&json!(" 4.75 ")), Some(4.75));
        assert_eq!(parse_rating(&json!("4.5 stars")), Some(4.5));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(parse_rating(&json!("great")), None);
        assert_eq!(parse_rating(&json!(null)), None);
        assert_eq!(parse_rating(&json!(true)), None);
        assert_eq!(parse_rating(&json!([4.0])), None);
        assert_eq!(parse_rating(&json!("NaN")), None);
        assert_eq!(parse_rating(&json!("inf")), None);
    }

    #[test]
    fn separators_do_not_merge_into_one_number() {
        assert_eq!(parse_rating(&json!("4/5")), None);
        assert_eq!(parse_rating(&json!("4,5")), None);
        assert_eq!(parse_rating(&json!("4.5/5")), None);
        assert_eq!(parse_rating(&json!("4.5/5 stars")), None);
        assert_eq!(parse_rating(&json!("stars")), None);
        assert_eq!(parse_rating(&json!("4 Stars")), Some(4.0));
        assert_eq!(parse_rating(&json!("3.5star")), Some(3.5));
    }

    #[test]
    fn orders_descending_with_unrated_last() {
        assert_eq!(rank_order(Some(5.0), Some(4.0)), Ordering::Less);
        assert_eq!(rank_order(Some(4.0), Some(5.0)), Ordering::Greater);
        assert_eq!(rank_order(Some(4.0), Some(4.0)), Ordering::Equal);
        assert_eq!(rank_order(Some(0.0), None), Ordering::Less);
        assert_eq!(rank_order(None, Some(-1.0)), Ordering::Greater);
        assert_eq!(rank_order(None, None), Ordering::Equal);
    }
}
