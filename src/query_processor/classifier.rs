use std::sync::Arc;

use tracing::debug;

use super::models::{ExtractionResult, PriceValue};
use crate::lexicon::{AttributeKind, Category, LexiconSet, attribute_kind};
use crate::nlp::Token;


pub struct KeywordClassifier {
    lexicon: Arc<LexiconSet>,
}

impl KeywordClassifier {
    pub fn new(lexicon: Arc<LexiconSet>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &LexiconSet {
        &self.lexicon
    }

    /// Fills the keyword lists and, for a bare numeral, the price.
    ///
    /// Category priority is Area, Brand, ServiceType, Attribute. Only the first
    /// bare number sets the price; `price_condition` is left for the resolver.
    pub fn classify(&self, tokens: &[Token]) -> ExtractionResult {
        let mut result = ExtractionResult::empty();

        for token in tokens {
            let word = token.word.as_str();
            match self.lexicon.categorize(word) {
                Some(Category::Area) => {
                    result.scope.push(word.to_string());
                    result.address.push(word.to_string());
                }
                Some(Category::Brand) => result.brand.push(word.to_string()),
                Some(Category::ServiceType) => result.service_type.push(word.to_string()),
                Some(Category::Attribute) => match attribute_kind(word) {
                    Some(AttributeKind::Tier) => result.tier.push(word.to_string()),
                    Some(AttributeKind::Mode) => result.mode.push(word.to_string()),
                    None => debug!("Attribute '{}' is neither tier nor mode, dropped", word),
                },
                None if result.price.is_none() && token.is_number() && token.is_bare_integer() => {
                    match word.parse::<i64>() {
                        Ok(amount) => result.price = Some(PriceValue::Amount(amount)),
                        Err(e) => debug!("Numeral '{}' not usable as price: {}", word, e),
                    }
                }
                None => {}
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(lexicon: LexiconSet) -> KeywordClassifier {
        KeywordClassifier::new(Arc::new(lexicon))
    }

    fn tokens(items: &[(&str, &str)]) -> Vec<Token> {
        items.iter().map(|(w, t)| Token::new(*w, *t)).collect()
    }

    #[test]
    fn test_categories() {
        let c = classifier(LexiconSet::builtin());
        let result = c.classify(&tokens(&[
            ("鼓楼区", "nz"),
            (" ", "x"),
            ("爱帝宫", "nz"),
            ("酒店式", "nz"),
            ("豪华", "nz"),
            ("24小时护理", "nz"),
        ]));

        assert_eq!(result.scope, vec!["鼓楼区"]);
        assert_eq!(result.address, vec!["鼓楼区"]);
        assert_eq!(result.brand, vec!["爱帝宫"]);
        assert_eq!(result.service_type, vec!["酒店式"]);
        assert_eq!(result.tier, vec!["豪华"]);
        assert_eq!(result.mode, vec!["24小时护理"]);
        assert!(result.branch.is_empty());
        assert!(result.price.is_none());
    }

    #[test]
    fn test_area_beats_brand() {
        let lex = LexiconSet::new(["南京路"], ["酒店式"], ["高档"], ["南京路"]);
        let result = classifier(lex).classify(&tokens(&[("南京路", "ns")]));

        assert_eq!(result.scope, vec!["南京路"]);
        assert!(result.brand.is_empty());
    }

    #[test]
    fn test_service_type_beats_attribute() {
        let lex = LexiconSet::new(["爱帝宫"], ["专业"], ["专业"], ["鼓楼区"]);
        let result = classifier(lex).classify(&tokens(&[("专业", "n")]));

        assert_eq!(result.service_type, vec!["专业"]);
        assert!(result.mode.is_empty());
    }

    #[test]
    fn test_unknown_attribute_dropped() {
        let lex = LexiconSet::new(["爱帝宫"], ["酒店式"], ["安静"], ["鼓楼区"]);
        let result = classifier(lex).classify(&tokens(&[("安静", "a")]));

        assert!(!result.has_keywords());
    }

    #[test]
    fn test_mode_term_requires_attribute_membership() {
        // 一对一 is in the mode vocabulary but not in the default attribute dictionary.
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[("一对一", "l")]));
        assert!(result.mode.is_empty());
    }

    #[test]
    fn test_bare_number_sets_price() {
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[
            ("预算", "n"),
            ("30000", "m"),
        ]));
        assert_eq!(result.price, Some(PriceValue::Amount(30000)));
        assert!(result.price_condition.is_none());
    }

    #[test]
    fn test_first_bare_number_wins() {
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[
            ("2", "m"),
            ("人", "n"),
            ("30000", "m"),
        ]));
        assert_eq!(result.price, Some(PriceValue::Amount(2)));
    }

    #[test]
    fn test_number_needs_numeral_tag_and_digits() {
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[
            ("5万", "m"),
            ("123", "eng"),
        ]));
        assert!(result.price.is_none());
    }

    #[test]
    fn test_overflowing_number_skipped() {
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[
            ("99999999999999999999999", "m"),
            ("6000", "m"),
        ]));
        assert_eq!(result.price, Some(PriceValue::Amount(6000)));
    }

    #[test]
    fn test_repeated_terms_kept() {
        let result = classifier(LexiconSet::builtin()).classify(&tokens(&[
            ("高档", "nz"),
            ("高档", "nz"),
        ]));
        assert_eq!(result.tier, vec!["高档", "高档"]);
    }
}
