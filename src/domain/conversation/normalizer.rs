//! Utterance normalization.
//!
//! Lowercases the utterance, collapses common misspellings of domain nouns,
//! expands contractions, and canonicalizes phrase synonyms to improve
//! pattern-rule recall. Quoted spans are left byte-identical: a quoted
//! campaign name containing the word "campain" must survive untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered rewrite rules applied to text outside quoted spans.
static REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let rules = [
        // Domain-noun misspellings
        (r"\b(campain|campaing|campign)\b", "campaign"),
        (r"\b(templete|templat)\b", "template"),
        (r"\b(audiance|audence)\b", "audience"),
        (r"\b(scedule|schedual)\b", "schedule"),
        (r"\bcreat\b", "create"),
        (r"\b(shwo|shw)\b", "show"),
        (r"\b(lst|lsit)\b", "list"),
        // Contractions
        (r"\bcan't\b", "can not"),
        (r"\bwon't\b", "will not"),
        (r"\bdon't\b", "do not"),
        (r"\bi'm\b", "i am"),
        (r"\byou're\b", "you are"),
        (r"\bwhat's\b", "what is"),
        // Phrase synonyms
        (r"\b(show me|display|get me)\b", "show"),
        (r"\b(make|build|set up)\b", "create"),
        (r"\b(set time|arrange)\b", "schedule"),
    ];
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("invalid rewrite"), *replacement))
        .collect()
});

/// One span of the utterance: either free text or a quoted literal.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Outside(&'a str),
    Quoted(&'a str),
}

/// Normalizes an utterance for intent/slot keyword anchoring.
///
/// Quoted spans (single or double quotes) pass through unchanged, including
/// the quote characters themselves, so slot extraction on the original text
/// stays consistent with the normalized copy.
pub fn normalize(utterance: &str) -> String {
    segment(utterance)
        .into_iter()
        .map(|seg| match seg {
            Segment::Quoted(text) => text.to_string(),
            Segment::Outside(text) => normalize_fragment(text),
        })
        .collect()
}

fn normalize_fragment(fragment: &str) -> String {
    let mut out = fragment.to_lowercase();
    for (pattern, replacement) in REWRITES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// Splits an utterance into quoted and unquoted segments.
///
/// A single quote opens a span only when it follows start-of-string or
/// whitespace, so apostrophes inside words (can't, don't) are not treated
/// as delimiters. An unclosed quote is literal text.
fn segment(utterance: &str) -> Vec<Segment<'_>> {
    let bytes = utterance.as_bytes();
    let mut segments = Vec::new();
    let mut outside_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let opens = match c {
            '"' => true,
            '\'' => i == 0 || (bytes[i - 1] as char).is_whitespace(),
            _ => false,
        };

        if opens {
            if let Some(close) = find_close(bytes, i + 1, c) {
                if outside_start < i {
                    segments.push(Segment::Outside(&utterance[outside_start..i]));
                }
                segments.push(Segment::Quoted(&utterance[i..=close]));
                i = close + 1;
                outside_start = i;
                continue;
            }
        }
        i += 1;
    }

    if outside_start < utterance.len() {
        segments.push(Segment::Outside(&utterance[outside_start..]));
    }
    segments
}

fn find_close(bytes: &[u8], from: usize, quote: char) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] as char == quote {
            // A closing quote sits at end-of-string or before whitespace/punct
            let next_ok = bytes
                .get(i + 1)
                .map(|b| {
                    let n = *b as char;
                    n.is_whitespace() || n.is_ascii_punctuation()
                })
                .unwrap_or(true);
            if quote == '"' || next_ok {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_fixes_typos() {
        assert_eq!(normalize("Creat a Campain"), "create a campaign");
    }

    #[test]
    fn expands_contractions() {
        assert_eq!(normalize("I can't do this"), "i can not do this");
    }

    #[test]
    fn canonicalizes_synonyms() {
        assert_eq!(normalize("show me my campaigns"), "show my campaigns");
        assert_eq!(normalize("build a template"), "create a template");
    }

    #[test]
    fn preserves_double_quoted_spans() {
        let out = normalize("create a campain named \"Campain Blast\"");
        assert_eq!(out, "create a campaign named \"Campain Blast\"");
    }

    #[test]
    fn preserves_single_quoted_spans() {
        let out = normalize("create a campaign named 'Templete Test'");
        assert_eq!(out, "create a campaign named 'Templete Test'");
    }

    #[test]
    fn apostrophes_inside_words_are_not_quotes() {
        let out = normalize("don't touch 'My Promo' please");
        assert_eq!(out, "do not touch 'My Promo' please");
    }

    #[test]
    fn unclosed_quote_is_literal() {
        let out = normalize("named 'unfinished campain");
        assert_eq!(out, "named 'unfinished campaign");
    }

    #[test]
    fn is_deterministic() {
        let input = "Shwo me the 'Fall Promo' campain";
        assert_eq!(normalize(input), normalize(input));
    }
}
