//! "Did you mean...?" suggestions attached to `UnknownUnit` errors, grounded
//! on the teacher's `SuggestionEngine` (`lib.rs::validate`) use of
//! `fuzzy-matcher` over the registry's known names.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const MAX_SUGGESTIONS: usize = 3;

/// Fuzzy-match `name` against `known_names`, returning up to
/// `MAX_SUGGESTIONS` candidates ordered best-first. Empty if nothing scores
/// above the matcher's noise floor.
pub fn suggest<'a>(name: &str, known_names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &str)> = known_names
        .filter_map(|candidate| matcher.fuzzy_match(candidate, name).map(|score| (score, candidate)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_matches() {
        let known = ["meter", "minute", "mole", "kilogram"];
        let suggestions = suggest("meeter", known.into_iter());
        assert!(suggestions.contains(&"meter".to_string()));
    }

    #[test]
    fn no_matches_yields_empty() {
        let known = ["meter", "second"];
        let suggestions = suggest("xyzzy_completely_unrelated", known.into_iter());
        assert!(suggestions.is_empty() || suggestions.len() <= MAX_SUGGESTIONS);
    }
}
