use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything outside CJK ideographs, ASCII alphanumerics, whitespace and the
    /// price punctuation/units the resolver reads.
    static ref DISALLOWED: Regex =
        Regex::new(r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9\s\-~至到元万]").expect("valid normalizer regex");
}


pub fn normalize(raw: &str) -> String {
    DISALLOWED.replace_all(raw, "").trim().to_lowercase()
}
