use sha2::{Digest, Sha256};


#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// First 12 hex chars of the SHA-256 of `query`, for correlating log lines without the text.
pub fn query_fingerprint(query: &str) -> String {
    let digest = Sha256::digest(query.as_bytes());
    digest.iter().take(6).map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(safe_truncate("鼓楼区爱帝宫高档", 3), "鼓楼区");
        assert_eq!(safe_truncate("3万-5万预算", 5), "3万-5万");
        assert_eq!(safe_truncate("jiudian", 3), "jiu");
    }

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(safe_truncate("高档", 10), "高档");
        assert_eq!(safe_truncate_ellipsis("高档", 2), "高档");
    }

    #[test]
    fn test_ellipsis_marks_cut() {
        assert_eq!(safe_truncate_ellipsis("不超过8万的经济型", 5), "不超过8万...");
    }

    #[test]
    fn test_query_fingerprint() {
        let a = query_fingerprint("超过10万");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, query_fingerprint("超过10万"));
        assert_ne!(a, query_fingerprint("超过11万"));
    }
}
