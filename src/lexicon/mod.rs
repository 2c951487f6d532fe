pub mod defaults;
pub mod loader;

pub use defaults::{AttributeKind, MODE_TERMS, TIER_TERMS, attribute_kind};
pub use loader::{LexiconError, TermSource, load_or_default, load_terms};

use std::collections::HashSet;

use serde::Serialize;

use crate::core::config::ParserConfig;
use defaults::{DEFAULT_AREAS, DEFAULT_ATTRIBUTES, DEFAULT_BRANDS, DEFAULT_SERVICE_TYPES};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Area,
    Brand,
    ServiceType,
    Attribute,
}

impl Category {
    /// Membership is tested in this order; the first hit wins.
    pub const PRIORITY: [Category; 4] = [
        Category::Area,
        Category::Brand,
        Category::ServiceType,
        Category::Attribute,
    ];
}


/// The four closed vocabularies. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LexiconSet {
    pub brands: HashSet<String>,
    pub service_types: HashSet<String>,
    pub attributes: HashSet<String>,
    pub areas: HashSet<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LexiconStats {
    pub brands: usize,
    pub service_types: usize,
    pub attributes: usize,
    pub areas: usize,
}

impl LexiconSet {
    pub fn new(
        brands: impl IntoIterator<Item = impl Into<String>>,
        service_types: impl IntoIterator<Item = impl Into<String>>,
        attributes: impl IntoIterator<Item = impl Into<String>>,
        areas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            brands: brands.into_iter().map(Into::into).collect(),
            service_types: service_types.into_iter().map(Into::into).collect(),
            attributes: attributes.into_iter().map(Into::into).collect(),
            areas: areas.into_iter().map(Into::into).collect(),
        }
    }


    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_BRANDS.iter().copied(),
            DEFAULT_SERVICE_TYPES.iter().copied(),
            DEFAULT_ATTRIBUTES.iter().copied(),
            DEFAULT_AREAS.iter().copied(),
        )
    }

    /// Loads each category file named by `config`, substituting built-in terms per category.
    pub fn load(config: &ParserConfig) -> Self {
        let (brands, _) = load_or_default("brand", &config.brands_path(), DEFAULT_BRANDS);
        let (service_types, _) =
            load_or_default("service type", &config.service_types_path(), DEFAULT_SERVICE_TYPES);
        let (attributes, _) =
            load_or_default("attribute", &config.attributes_path(), DEFAULT_ATTRIBUTES);
        let (areas, _) = load_or_default("area", &config.areas_path(), DEFAULT_AREAS);

        Self {
            brands,
            service_types,
            attributes,
            areas,
        }
    }

    pub fn terms(&self, category: Category) -> &HashSet<String> {
        match category {
            Category::Area => &self.areas,
            Category::Brand => &self.brands,
            Category::ServiceType => &self.service_types,
            Category::Attribute => &self.attributes,
        }
    }


    pub fn categorize(&self, word: &str) -> Option<Category> {
        Category::PRIORITY
            .into_iter()
            .find(|&category| self.terms(category).contains(word))
    }

    /// Every term across all categories, for registering with the segmenter.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.areas
            .iter()
            .chain(&self.brands)
            .chain(&self.service_types)
            .chain(&self.attributes)
            .map(String::as_str)
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            brands: self.brands.len(),
            service_types: self.service_types.len(),
            attributes: self.attributes.len(),
            areas: self.areas.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        let stats = LexiconSet::builtin().stats();
        assert_eq!(stats.brands, 6);
        assert_eq!(stats.service_types, 5);
        assert_eq!(stats.attributes, 7);
        assert_eq!(stats.areas, 6);
    }

    #[test]
    fn test_categorize_follows_priority() {
        let lex = LexiconSet::new(["鼓楼区", "喜月"], ["喜月"], ["喜月", "高档"], ["鼓楼区"]);

        assert_eq!(lex.categorize("鼓楼区"), Some(Category::Area));
        assert_eq!(lex.categorize("喜月"), Some(Category::Brand));
        assert_eq!(lex.categorize("高档"), Some(Category::Attribute));
        assert_eq!(lex.categorize("别墅式"), None);
    }

    #[test]
    fn test_load_with_missing_files_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ParserConfig::default();
        config.data_dir = dir.path().to_path_buf();
        std::fs::write(dir.path().join("areas.txt"), "浦东新区\n静安区\n").unwrap();

        let lex = LexiconSet::load(&config);
        assert_eq!(lex.areas.len(), 2);
        assert!(lex.brands.contains("爱帝宫"));
        assert_eq!(lex.categorize("静安区"), Some(Category::Area));
        assert_eq!(lex.categorize("鼓楼区"), None);
    }

    #[test]
    fn test_all_terms_covers_every_category() {
        let lex = LexiconSet::builtin();
        let count = lex.all_terms().count();
        assert_eq!(count, 6 + 5 + 7 + 6);
    }
}
