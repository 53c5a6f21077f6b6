//! Locale-aware ordering of display labels.
//!
//! Labels are compared on a folded key (canonical decomposition, combining
//! marks dropped, lowercased) so that `"Écosse"` sorts with the `E`s and
//! case does not split the list. The raw strings break ties.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Accent- and case-insensitive comparison key (`"Åland"` → `"aland"`).
#[must_use]
pub fn fold_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Orders two labels the way a human-facing sorted list expects.
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_case() {
        assert_eq!(fold_key("Åland"), "aland");
        assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
        assert_eq!(fold_key("ÉCOSSE"), "ecosse");
    }

    #[test]
    fn sorts_accented_labels_with_plain_letters() {
        let mut labels = vec!["Zambie", "États-Unis", "Allemagne", "Égypte", "France"];
        labels.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(
            labels,
            vec!["Allemagne", "Égypte", "États-Unis", "France", "Zambie"]
        );
    }

    #[test]
    fn ignores_case_before_tie_break() {
        assert_eq!(locale_compare("alpha", "Beta"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_ne!(locale_compare("Same", "same"), Ordering::Equal);
    }
}
