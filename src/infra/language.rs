// ============================================================
// Layer 6 — Language Tagger
// ============================================================
// Best-effort language identification backed by the whatlang
// crate. Codes are reported in the two-letter ISO 639-1 form
// ("en", "fr", "hi", Chinese as "zh-cn"), which is what HTTP clients
// of the detector expect. A language without a two-letter code keeps
// whatlang's three-letter one.
//
// whatlang gives no guess for empty or script-less input; that
// surfaces as None here and becomes "unknown" via tag_language.
// Low-confidence guesses are still returned.

use crate::domain::traits::LanguageDetector;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        let code = info.lang().code();
        if !info.is_reliable() {
            tracing::debug!("Low-confidence language guess '{}' ({:.2})", code, info.confidence());
        }
        Some(two_letter_code(code).unwrap_or(code).to_string())
    }
}

/// ISO 639-3 → ISO 639-1 for the languages whatlang knows.
fn two_letter_code(iso639_3: &str) -> Option<&'static str> {
    let code = match iso639_3 {
        "afr" => "af", "aka" => "ak", "amh" => "am", "ara" => "ar",
        "aze" => "az", "bel" => "be", "ben" => "bn", "bul" => "bg",
        "cat" => "ca", "ces" => "cs", "cmn" => "zh-cn", "dan" => "da",
        "deu" => "de", "ell" => "el", "eng" => "en", "epo" => "eo",
        "est" => "et", "fin" => "fi", "fra" => "fr", "guj" => "gu",
        "heb" => "he", "hin" => "hi", "hrv" => "hr", "hun" => "hu",
        "hye" => "hy", "ind" => "id", "ita" => "it", "jav" => "jv",
        "jpn" => "ja", "kan" => "kn", "kat" => "ka", "khm" => "km",
        "kor" => "ko", "lat" => "la", "lav" => "lv", "lit" => "lt",
        "mal" => "ml", "mar" => "mr", "mkd" => "mk", "mya" => "my",
        "nep" => "ne", "nld" => "nl", "nob" => "no", "ori" => "or",
        "pan" => "pa", "pes" => "fa", "pol" => "pl", "por" => "pt",
        "ron" => "ro", "rus" => "ru", "sin" => "si", "slk" => "sk",
        "slv" => "sl", "sna" => "sn", "spa" => "es", "srp" => "sr",
        "swe" => "sv", "tam" => "ta", "tel" => "te", "tgl" => "tl",
        "tha" => "th", "tuk" => "tk", "tur" => "tr", "ukr" => "uk",
        "urd" => "ur", "uzb" => "uz", "vie" => "vi", "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::tag_language;

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(tag_language(&WhatlangDetector::new(), ""), "unknown");
    }

    #[test]
    fn test_no_letters_is_unknown() {
        assert_eq!(tag_language(&WhatlangDetector::new(), "1234 !!! ..."), "unknown");
    }

    #[test]
    fn test_detects_english_as_two_letter_code() {
        let code = tag_language(
            &WhatlangDetector::new(),
            "He finally decided to kick the bucket on his old habits and start over with a clean slate.",
        );
        assert_eq!(code, "en");
    }

    #[test]
    fn test_detects_french_as_two_letter_code() {
        let code = tag_language(
            &WhatlangDetector::new(),
            "Il pleut des cordes depuis ce matin, alors nous resterons à la maison toute la journée.",
        );
        assert_eq!(code, "fr");
    }

    #[test]
    fn test_code_table() {
        assert_eq!(two_letter_code("hin"), Some("hi"));
        assert_eq!(two_letter_code("cmn"), Some("zh-cn"));
        assert_eq!(two_letter_code("xyz"), None);
    }
}
