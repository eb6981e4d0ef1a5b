// ============================================================
// Layer 1 — Console Surface
// ============================================================
// Interactive loop over standard input:
//
//   Enter sentence: He will kick the bucket someday
//   <report>
//   ---------------------------------------
//
// `exit` (any case, surrounding whitespace ignored) or end of input
// stops the loop. Input and output are generic so tests can drive
// the loop with in-memory buffers.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::detect_use_case::DetectUseCase;
use crate::data::matcher;
use crate::domain::idiom::{DetectionResult, NO_IDIOM_MESSAGE};

pub const SEPARATOR: &str = "---------------------------------------";
const PROMPT: &str = "Enter sentence: ";

pub fn run_console<R: BufRead, W: Write>(
    use_case: &DetectUseCase,
    input:    R,
    mut out:  W,
) -> Result<()> {
    writeln!(out, "\nMultilingual Idiom Detector ({} idioms loaded)\n", use_case.store().len())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let result = use_case.analyze(&line);
        writeln!(out, "{}", format_report(&line, &result))?;
        writeln!(out, "{SEPARATOR}")?;
    }

    Ok(())
}

/// Multi-section report for one analysed sentence
pub fn format_report(sentence: &str, result: &DetectionResult) -> String {
    let Some(idiom) = result.idiom.as_deref().filter(|_| result.found) else {
        return format!("\n{NO_IDIOM_MESSAGE}\n");
    };
    let field = |v: &Option<String>| v.clone().unwrap_or_default();

    format!(
        "\nIdiom Detected: `{idiom}`\n\n\
         Your sentence:\n{}\n\n\
         Literal Meaning:\n{}\n\n\
         Figurative Meaning:\n{}\n\n\
         Example Usage:\n{}\n\n\
         Language Detected: {}\n",
        matcher::render(sentence, idiom),
        field(&result.literal),
        field(&result.meaning),
        field(&result.example),
        field(&result.language),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{idiom::IdiomRecord, traits::LanguageDetector};
    use std::sync::Arc;

    struct Fixed;

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Option<String> {
            Some("en".to_string())
        }
    }

    fn use_case() -> DetectUseCase {
        let store = vec![IdiomRecord::new(
            "kick the bucket",
            "strike a bucket with a foot",
            "to die",
            "The old radio finally kicked the bucket.",
        )]
        .into_iter()
        .collect();
        DetectUseCase::new(Arc::new(store), Box::new(Fixed))
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        run_console(&use_case(), input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let uc     = use_case();
        let report = format_report("Kick the bucket now", &uc.analyze("Kick the bucket now"));

        assert!(report.contains("Idiom Detected: `kick the bucket`"));
        assert!(report.contains("Your sentence:\n**Kick the bucket** now"));
        assert!(report.contains("Literal Meaning:\nstrike a bucket with a foot"));
        assert!(report.contains("Figurative Meaning:\nto die"));
        assert!(report.contains("Example Usage:\nThe old radio finally kicked the bucket."));
        assert!(report.contains("Language Detected: en"));
    }

    #[test]
    fn test_not_found_report() {
        let report = format_report("plain words", &DetectionResult::not_found());
        assert_eq!(report, "\nNo idiom found.\n");
    }

    #[test]
    fn test_loop_stops_at_exit() {
        let out = run("I will kick the bucket\nnothing here\n  EXIT \nkick the bucket again\n");

        assert_eq!(out.matches(SEPARATOR).count(), 2);
        assert_eq!(out.matches("Idiom Detected").count(), 1);
        assert_eq!(out.matches(NO_IDIOM_MESSAGE).count(), 1);
    }

    #[test]
    fn test_loop_stops_at_end_of_input() {
        let out = run("kick the bucket");
        assert_eq!(out.matches(SEPARATOR).count(), 1);
    }
}
