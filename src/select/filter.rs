use serde::{Deserialize, Serialize};

/// Upper bound on rows rendered in the open list.
pub const MAX_VISIBLE_CANDIDATES: usize = 200;

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: String,
    pub label: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Case-insensitive substring match of `query` (trimmed) against labels.
///
/// An empty query matches everything. Order is preserved and the result is
/// capped at [`MAX_VISIBLE_CANDIDATES`].
pub fn filter_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    let needle = query.trim().to_lowercase();
    candidates
        .iter()
        .filter(|c| needle.is_empty() || c.label.to_lowercase().contains(&needle))
        .take(MAX_VISIBLE_CANDIDATES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive_and_trimmed() {
        let items = vec![Candidate::new("a", "Alpha"), Candidate::new("b", "Beta")];
        let hits = filter_candidates(&items, "  AL ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "a");
        assert_eq!(filter_candidates(&items, "").len(), 2);
        assert_eq!(filter_candidates(&items, "   ").len(), 2);
        assert!(filter_candidates(&items, "x").is_empty());
    }

    #[test]
    fn test_filter_matches_label_not_value() {
        let items = vec![Candidate::new("ALPHA_7", "ZK (ALPHA_7)"), Candidate::new("q", "Q")];
        assert_eq!(filter_candidates(&items, "alpha_7").len(), 1);
        assert!(filter_candidates(&[Candidate::new("zzz", "Q")], "zzz").is_empty());
    }

    #[test]
    fn test_filter_caps_result() {
        let items: Vec<_> = (0..500)
            .map(|i| Candidate::new(format!("v{i}"), format!("Token {i}")))
            .collect();
        let hits = filter_candidates(&items, "token");
        assert_eq!(hits.len(), MAX_VISIBLE_CANDIDATES);
        assert_eq!(hits[0].value, "v0");
        assert_eq!(hits[MAX_VISIBLE_CANDIDATES - 1].value, "v199");
    }
}
