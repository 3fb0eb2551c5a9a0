//! Schedule phrase resolution.
//!
//! Maps the relative-date phrases the slot extractor accepts onto concrete
//! timestamps. Phrases that only name a pattern (weekdays, HH:MM times)
//! resolve to `None` and travel onward as raw text; resolution failures are
//! never errors.

use crate::domain::foundation::Timestamp;

/// Resolves a schedule phrase to a concrete timestamp, when possible.
pub fn resolve_phrase(phrase: &str) -> Option<Timestamp> {
    let lower = phrase.trim().to_lowercase();

    if lower.contains("tomorrow") {
        return Some(Timestamp::now().add_days(1));
    }
    if lower.contains("today") || lower.contains("tonight") {
        return Some(Timestamp::now());
    }
    if lower.contains("next week") {
        return Some(Timestamp::now().add_days(7));
    }
    if lower.contains("next month") {
        return Some(Timestamp::now().add_days(30));
    }

    Timestamp::parse_rfc3339(phrase.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tomorrow_resolves_one_day_ahead() {
        let now = Timestamp::now();
        let resolved = resolve_phrase("tomorrow").unwrap();
        assert!(resolved.is_after(&now));
    }

    #[test]
    fn today_resolves_to_now_ish() {
        assert!(resolve_phrase("today").is_some());
    }

    #[test]
    fn next_week_resolves_seven_days_ahead() {
        let resolved = resolve_phrase("next week").unwrap();
        assert!(resolved.is_after(&Timestamp::now().add_days(6)));
    }

    #[test]
    fn rfc3339_string_resolves() {
        assert!(resolve_phrase("2026-09-01T09:00:00Z").is_some());
    }

    #[test]
    fn weekday_name_stays_unresolved() {
        assert!(resolve_phrase("friday").is_none());
    }

    #[test]
    fn bare_time_stays_unresolved() {
        assert!(resolve_phrase("14:30").is_none());
    }
}
