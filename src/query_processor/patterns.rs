use lazy_static::lazy_static;
use regex::Regex;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Multiplier applied when a matched price carries the 万 unit.
pub const WAN: i64 = 10_000;

pub const WAN_CHAR: char = '万';


/// The closed price grammar, tried in declaration order. First match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PricePattern {
    /// `3万-5万`, `3~5万`, `3至5`, `3到5万`
    Range,
    /// `最多`, `不超过`, `之内`, `低于`, `以下`, `控制在` followed somewhere by a number.
    AtMost,
    /// `高于`, `超过`, `以上` followed somewhere by a number.
    Above,
    /// A number with an explicit `万` or `元` unit.
    Exact,
}

impl PricePattern {
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Range => &RANGE,
            Self::AtMost => &AT_MOST,
            Self::Above => &ABOVE,
            Self::Exact => &EXACT,
        }
    }

    pub fn in_order() -> impl Iterator<Item = PricePattern> {
        Self::iter()
    }
}

lazy_static! {
    static ref RANGE: Regex =
        Regex::new(r"(\d+)万?[\-~至到](\d+)万?").expect("valid range pattern");
    static ref AT_MOST: Regex =
        Regex::new(r"(?:最多|不超过|之内|低于|以下|控制在)(?:.*?)(\d+)万?").expect("valid at-most pattern");
    static ref ABOVE: Regex =
        Regex::new(r"(?:高于|超过|以上)(?:.*?)(\d+)万?").expect("valid above pattern");
    static ref EXACT: Regex = Regex::new(r"(\d+)(?:万|元)").expect("valid exact pattern");
}
