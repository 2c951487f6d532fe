use regex::Captures;
use tracing::debug;

use super::models::{PriceCondition, PriceValue};
use super::patterns::{PricePattern, WAN, WAN_CHAR};


/// Outcome of the first pattern that matched.
///
/// `value` is `None` when the matched digits do not fit an `i64` after
/// scaling; the match still ends the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub pattern: PricePattern,
    pub matched: String,
    pub value: Option<(PriceValue, PriceCondition)>,
}

/// Runs the price grammar over normalized text. `None` if no pattern matched.
pub fn resolve_price(text: &str) -> Option<ResolvedPrice> {
    PricePattern::in_order().find_map(|pattern| {
        let caps = pattern.regex().captures(text)?;
        let matched = caps.get(0).map_or("", |m| m.as_str()).to_string();
        let value = interpret(pattern, &caps, &matched);
        debug!("Price pattern {} matched '{}' -> {:?}", pattern, matched, value);
        Some(ResolvedPrice {
            pattern,
            matched,
            value,
        })
    })
}

fn interpret(
    pattern: PricePattern,
    caps: &Captures<'_>,
    matched: &str,
) -> Option<(PriceValue, PriceCondition)> {
    // The unit applies to the whole match, not to the number next to it.
    let scale = if matched.contains(WAN_CHAR) { WAN } else { 1 };
    let amount = |group: usize| -> Option<i64> {
        caps.get(group)?
            .as_str()
            .parse::<i64>()
            .ok()?
            .checked_mul(scale)
    };

    match pattern {
        PricePattern::Range => Some((
            PriceValue::range(amount(1)?, amount(2)?),
            PriceCondition::Range,
        )),
        PricePattern::AtMost => Some((PriceValue::range(0, amount(1)?), PriceCondition::Range)),
        PricePattern::Above => Some((PriceValue::Amount(amount(1)?), PriceCondition::Gt)),
        PricePattern::Exact => Some((PriceValue::Amount(amount(1)?), PriceCondition::Exact)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> Option<(PriceValue, PriceCondition)> {
        resolve_price(text).and_then(|r| r.value)
    }

    #[test]
    fn test_range_with_wan_scales_both() {
        assert_eq!(
            value("3万-5万"),
            Some((PriceValue::range(30000, 50000), PriceCondition::Range))
        );
        // One 万 anywhere in the match scales both bounds.
        assert_eq!(
            value("3-5万"),
            Some((PriceValue::range(30000, 50000), PriceCondition::Range))
        );
        assert_eq!(
            value("3万到5"),
            Some((PriceValue::range(30000, 50000), PriceCondition::Range))
        );
    }

    #[test]
    fn test_range_without_unit() {
        assert_eq!(
            value("8000~12000"),
            Some((PriceValue::range(8000, 12000), PriceCondition::Range))
        );
        assert_eq!(
            value("6至9"),
            Some((PriceValue::range(6, 9), PriceCondition::Range))
        );
    }

    #[test]
    fn test_at_most_becomes_range() {
        assert_eq!(
            value("不超过8万的经济型"),
            Some((PriceValue::range(0, 80000), PriceCondition::Range))
        );
        assert_eq!(
            value("控制在20000"),
            Some((PriceValue::range(0, 20000), PriceCondition::Range))
        );
    }

    #[test]
    fn test_above() {
        assert_eq!(value("超过10万"), Some((PriceValue::Amount(100000), PriceCondition::Gt)));
        assert_eq!(value("高于 9000"), Some((PriceValue::Amount(9000), PriceCondition::Gt)));
    }

    #[test]
    fn test_exact_units() {
        assert_eq!(
            value("5万元酒店式"),
            Some((PriceValue::Amount(50000), PriceCondition::Exact))
        );
        assert_eq!(value("8800元"), Some((PriceValue::Amount(8800), PriceCondition::Exact)));
    }

    #[test]
    fn test_range_outranks_at_most() {
        let resolved = resolve_price("不超过3-5万").unwrap();
        assert_eq!(resolved.pattern, PricePattern::Range);
        assert_eq!(resolved.matched, "3-5万");
    }

    #[test]
    fn test_at_most_outranks_above() {
        let resolved = resolve_price("超过5万不超过8万").unwrap();
        assert_eq!(resolved.pattern, PricePattern::AtMost);
        assert_eq!(resolved.value, Some((PriceValue::range(0, 80000), PriceCondition::Range)));
    }

    #[test]
    fn test_no_match() {
        assert!(resolve_price("鼓楼区 高档").is_none());
        assert!(resolve_price("").is_none());
        assert!(resolve_price("以下").is_none());
    }

    #[test]
    fn test_overflow_stops_without_value() {
        let resolved = resolve_price("超过99999999999999999万").unwrap();
        assert_eq!(resolved.pattern, PricePattern::Above);
        assert!(resolved.value.is_none());
    }

    #[test]
    fn test_never_less_than() {
        for text in ["最多5万", "低于3000", "之内2万", "以下1万", "3-4万", "超过2万", "2万"] {
            let (_, condition) = value(text).unwrap();
            assert_ne!(condition.to_string(), "lt");
        }
    }
}
