// ============================================================
// Layer 4 — Idiom Matcher
// ============================================================
// Two pure functions over the store:
//
//   find   — first stored phrase that appears in the sentence
//   render — wrap occurrences of a phrase in **bold** markers
//
// Matching is a raw substring test on the lowercased sentence.
// There is no word-boundary check, so a short phrase can match
// inside a longer word, and no ranking: phrases are tried in store
// order and the first hit wins, even if a longer phrase would also
// match.

use crate::data::store::IdiomStore;

const BOLD: &str = "**";

/// Return the first phrase (in store order) contained in `sentence`,
/// compared case-insensitively.
pub fn find<'s>(store: &'s IdiomStore, sentence: &str) -> Option<&'s str> {
    let lowered = sentence.to_lowercase();
    store.phrases().find(|phrase| lowered.contains(*phrase))
}

/// Highlight `phrase` inside `sentence`.
///
/// Two literal, case-sensitive passes: the phrase as given, then the
/// phrase with its first letter capitalised. Any other casing
/// ("KICK THE BUCKET") is left as is.
pub fn render(sentence: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return sentence.to_string();
    }

    let once = wrap_all(sentence, phrase);

    let capitalised = capitalize(phrase);
    if capitalised == phrase {
        // Second pass would re-wrap the first pass's output
        return once;
    }
    wrap_all(&once, &capitalised)
}

fn wrap_all(text: &str, needle: &str) -> String {
    text.replace(needle, &format!("{BOLD}{needle}{BOLD}"))
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::idiom::IdiomRecord;

    fn store(phrases: &[&str]) -> IdiomStore {
        phrases
            .iter()
            .map(|p| IdiomRecord::new(p, "", "", ""))
            .collect()
    }

    #[test]
    fn test_finds_phrase_case_insensitively() {
        let s = store(&["kick the bucket"]);
        assert_eq!(find(&s, "He will kick the bucket tomorrow"), Some("kick the bucket"));
        assert_eq!(find(&s, "HE WILL KICK THE BUCKET"), Some("kick the bucket"));
    }

    #[test]
    fn test_absent_when_nothing_matches() {
        let s = store(&["kick the bucket", "break the ice"]);
        assert_eq!(find(&s, "Nothing idiomatic here."), None);
        assert_eq!(find(&IdiomStore::new(), "kick the bucket"), None);
    }

    #[test]
    fn test_first_in_store_order_wins() {
        let s = store(&["the ice", "break the ice"]);
        assert_eq!(find(&s, "Let's break the ice."), Some("the ice"));

        let s = store(&["break the ice", "the ice"]);
        assert_eq!(find(&s, "Let's break the ice."), Some("break the ice"));
    }

    #[test]
    fn test_substring_not_word_boundary() {
        let s = store(&["cat"]);
        assert_eq!(find(&s, "A concatenated string"), Some("cat"));
    }

    #[test]
    fn test_render_wraps_only_exact_and_capitalised() {
        assert_eq!(
            render("Kick the bucket now", "kick the bucket"),
            "**Kick the bucket** now"
        );
        assert_eq!(
            render("he will kick the bucket", "kick the bucket"),
            "he will **kick the bucket**"
        );
        assert_eq!(
            render("KICK THE BUCKET now", "kick the bucket"),
            "KICK THE BUCKET now"
        );
    }

    #[test]
    fn test_render_wraps_every_occurrence() {
        assert_eq!(
            render("Break the ice, then break the ice again", "break the ice"),
            "**Break the ice**, then **break the ice** again"
        );
    }

    #[test]
    fn test_render_does_not_double_wrap_uncased_phrase() {
        assert_eq!(render("it's 24/7 work", "24/7"), "it's **24/7** work");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("kick the bucket"), "Kick the bucket");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }
}
