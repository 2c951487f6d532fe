use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(i64),
    Range { min: i64, max: i64 },
}

impl PriceValue {
    pub fn range(min: i64, max: i64) -> Self {
        Self::Range { min, max }
    }
}


/// How `PriceValue` should be read. An upper-bound phrase ("不超过") is stored
/// as `Range { min: 0, .. }`, so there is no less-than variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceCondition {
    Range,
    Gt,
    Exact,
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticExpansion {
    #[serde(rename = "品牌扩展")]
    pub brand: Vec<String>,
    #[serde(rename = "档次扩展")]
    pub tier: Vec<String>,
    #[serde(rename = "模式扩展")]
    pub mode: Vec<String>,
}

impl SemanticExpansion {
    pub fn is_empty(&self) -> bool {
        self.brand.is_empty() && self.tier.is_empty() && self.mode.is_empty()
    }
}


/// Whole-query feature vector. The two shapes are not comparable with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentenceVector {
    /// Leading components of the mean-pooled encoder output.
    Encoded(Vec<f32>),
    /// `[chars, count of 的, count of 区, token count]`.
    Features(Vec<usize>),
}

impl SentenceVector {
    pub fn len(&self) -> usize {
        match self {
            Self::Encoded(v) => v.len(),
            Self::Features(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Features(_))
    }

    pub fn to_f32(&self) -> Vec<f32> {
        match self {
            Self::Encoded(v) => v.clone(),
            Self::Features(v) => v.iter().map(|&x| x as f32).collect(),
        }
    }
}

impl Default for SentenceVector {
    fn default() -> Self {
        Self::Features(Vec::new())
    }
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "范围")]
    pub scope: Vec<String>,
    #[serde(rename = "品牌")]
    pub brand: Vec<String>,
    #[serde(rename = "档次")]
    pub tier: Vec<String>,
    /// Reserved; nothing populates it.
    #[serde(rename = "分店")]
    pub branch: Vec<String>,
    #[serde(rename = "类型")]
    pub service_type: Vec<String>,
    #[serde(rename = "地址")]
    pub address: Vec<String>,
    #[serde(rename = "模式")]
    pub mode: Vec<String>,
    #[serde(rename = "价格")]
    pub price: Option<PriceValue>,
    #[serde(rename = "价格条件")]
    pub price_condition: Option<PriceCondition>,
    #[serde(rename = "语义扩展")]
    pub semantic_expansion: SemanticExpansion,
    #[serde(rename = "句向量")]
    pub sentence_vector: SentenceVector,
}

impl ExtractionResult {

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_keywords(&self) -> bool {
        !(self.scope.is_empty()
            && self.brand.is_empty()
            && self.tier.is_empty()
            && self.service_type.is_empty()
            && self.mode.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_result_wire_shape() {
        let value = serde_json::to_value(ExtractionResult::empty()).unwrap();
        assert_eq!(
            value,
            json!({
                "范围": [],
                "品牌": [],
                "档次": [],
                "分店": [],
                "类型": [],
                "地址": [],
                "模式": [],
                "价格": null,
                "价格条件": null,
                "语义扩展": {"品牌扩展": [], "档次扩展": [], "模式扩展": []},
                "句向量": []
            })
        );
    }

    #[test]
    fn test_price_shapes() {
        assert_eq!(serde_json::to_value(PriceValue::Amount(50000)).unwrap(), json!(50000));
        assert_eq!(
            serde_json::to_value(PriceValue::range(0, 80000)).unwrap(),
            json!({"min": 0, "max": 80000})
        );
    }

    #[test]
    fn test_condition_strings() {
        assert_eq!(serde_json::to_value(PriceCondition::Gt).unwrap(), json!("gt"));
        assert_eq!(PriceCondition::Exact.to_string(), "exact");
        assert_eq!("range".parse::<PriceCondition>().unwrap(), PriceCondition::Range);
        assert!("lt".parse::<PriceCondition>().is_err());
    }

    #[test]
    fn test_feature_vector_serializes_as_integers() {
        let vector = SentenceVector::Features(vec![12, 1, 1, 5]);
        assert_eq!(serde_json::to_value(&vector).unwrap(), json!([12, 1, 1, 5]));
        assert_eq!(vector.len(), 4);
        assert!(vector.is_fallback());
    }

    #[test]
    fn test_has_keywords() {
        let mut result = ExtractionResult::empty();
        assert!(!result.has_keywords());
        result.mode.push("一对一".to_string());
        assert!(result.has_keywords());
    }
}
