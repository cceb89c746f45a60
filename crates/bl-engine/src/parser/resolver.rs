//! Noun resolution with fuzzy matching.

use bl_core::WorldDataset;
use strsim::jaro_winkler;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.84;

/// Resolve a noun phrase to an item id using exact or fuzzy matching.
///
/// Exact matches against the id, display name, and aliases win; after
/// that the best Jaro-Winkler score above the threshold does. Presence
/// checks (is it here, is it carried) are the caller's business.
pub fn resolve_item(data: &WorldDataset, input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }

    for (id, item) in data.items() {
        if id == input
            || item.name == input
            || item.aliases.iter().any(|alias| alias == input)
        {
            return Some(id.to_string());
        }
    }

    let mut best: Option<(String, f64)> = None;
    for (id, item) in data.items() {
        let candidates = std::iter::once(id)
            .chain(std::iter::once(item.name.as_str()))
            .chain(item.aliases.iter().map(String::as_str));
        for candidate in candidates {
            let score = jaro_winkler(input, candidate);
            if score >= FUZZY_THRESHOLD
                && best.as_ref().is_none_or(|(_, b)| score > *b)
            {
                best = Some((id.to_string(), score));
            }
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> WorldDataset {
        WorldDataset::builtin().unwrap()
    }

    #[test]
    fn exact_id_match() {
        assert_eq!(resolve_item(&data(), "lamp"), Some("lamp".to_string()));
    }

    #[test]
    fn display_name_match() {
        assert_eq!(
            resolve_item(&data(), "brass lantern"),
            Some("lamp".to_string())
        );
    }

    #[test]
    fn alias_match() {
        assert_eq!(resolve_item(&data(), "lantern"), Some("lamp".to_string()));
        assert_eq!(
            resolve_item(&data(), "key"),
            Some("skeleton-key".to_string())
        );
    }

    #[test]
    fn fuzzy_match_typo() {
        assert_eq!(resolve_item(&data(), "lanp"), Some("lamp".to_string()));
        assert_eq!(
            resolve_item(&data(), "sceptr"),
            Some("sceptre".to_string())
        );
    }

    #[test]
    fn gibberish_does_not_resolve() {
        assert_eq!(resolve_item(&data(), "quux frobnitz"), None);
        assert_eq!(resolve_item(&data(), ""), None);
    }
}
