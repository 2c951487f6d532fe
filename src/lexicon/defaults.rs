use std::collections::HashSet;

use lazy_static::lazy_static;


pub const DEFAULT_BRANDS: &[&str] = &["爱帝宫", "馨月汇", "美华妇儿", "圣贝拉", "喜月", "月子印象"];

pub const DEFAULT_SERVICE_TYPES: &[&str] = &["酒店式", "家庭式", "医院式", "公寓式", "别墅式"];

pub const DEFAULT_ATTRIBUTES: &[&str] = &["高档", "豪华", "经济型", "中档", "专业", "全职专家", "24小时护理"];

pub const DEFAULT_AREAS: &[&str] = &["鼓楼区", "玄武区", "秦淮区", "建邺区", "雨花台区", "栖霞区"];


pub const TIER_TERMS: &[&str] = &["高档", "豪华", "经济型", "中档", "超高档"];

pub const MODE_TERMS: &[&str] = &["专业", "全职专家", "24小时护理", "一对一", "台式护理", "母婴同室"];

lazy_static! {
    static ref TIER_VOCABULARY: HashSet<&'static str> = TIER_TERMS.iter().copied().collect();
    static ref MODE_VOCABULARY: HashSet<&'static str> = MODE_TERMS.iter().copied().collect();
}

/// Attribute terms outside both sub-vocabularies have no place in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Tier,
    Mode,
}

pub fn attribute_kind(term: &str) -> Option<AttributeKind> {
    if TIER_VOCABULARY.contains(term) {
        Some(AttributeKind::Tier)
    } else if MODE_VOCABULARY.contains(term) {
        Some(AttributeKind::Mode)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_and_mode_are_disjoint() {
        for term in TIER_TERMS {
            assert!(!MODE_TERMS.contains(term), "{term} in both vocabularies");
        }
    }

    #[test]
    fn test_attribute_kind() {
        assert_eq!(attribute_kind("超高档"), Some(AttributeKind::Tier));
        assert_eq!(attribute_kind("母婴同室"), Some(AttributeKind::Mode));
        assert_eq!(attribute_kind("安静"), None);
    }
}
