//! Argument extraction from original-case utterances.
//!
//! # Responsibility
//! - Strip matched trigger phrases, filler words and leading punctuation to
//!   recover the intent argument.
//!
//! # Invariants
//! - Trigger matching is case-insensitive; the returned argument keeps the
//!   original casing (proper nouns in cities and note content survive).
//! - Functions return an empty string, never a missing value, when nothing
//!   remains; callers treat that as "no argument supplied".

use once_cell::sync::Lazy;
use regex::Regex;

static PLAY_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^.*?\bplay\b\s*").expect("valid play trigger regex"));
static MEDIA_FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:a|the|some|me|song|music|video|gaana|gana)\b[\s,]*)+")
        .expect("valid media filler regex")
});
static SEARCH_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:search for|search|google)\s*").expect("valid search regex"));
static CALC_TRIGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*?(?:calculate|what is|what's)\s*").expect("valid calc trigger regex")
});
static NOTE_TRIGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*?(?:take a note|save a note|note down|remember this)[\s:,.-]*")
        .expect("valid note trigger regex")
});
static KNOWLEDGE_TRIGGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:who is|what is|tell me about|define|explain)\s*")
        .expect("valid knowledge trigger regex")
});
static CITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:weather|temperature|mausam|taapmaan)\s+(?:in|of|for|at)\s+([\w\s]+)")
        .expect("valid city regex")
});

/// Media query: everything after the first "play", minus leading fillers.
pub fn media_query(text: &str) -> String {
    let stripped = PLAY_TRIGGER_RE.replace(text, "");
    let stripped = MEDIA_FILLER_RE.replace(&stripped, "");
    stripped.trim().to_string()
}

/// Web-search query with the search/google trigger removed.
pub fn search_query(text: &str) -> String {
    SEARCH_TRIGGER_RE.replace(text, "").trim().to_string()
}

/// Arithmetic expression after the first calculate/what-is trigger.
pub fn calc_expression(text: &str) -> String {
    CALC_TRIGGER_RE.replace(text, "").trim().to_string()
}

/// Note content after the note trigger and any separating punctuation.
pub fn note_content(text: &str) -> String {
    NOTE_TRIGGER_RE.replace(text, "").trim().to_string()
}

/// Knowledge topic with the question prefix and trailing punctuation removed.
pub fn knowledge_topic(text: &str) -> String {
    KNOWLEDGE_TRIGGER_RE
        .replace(text, "")
        .trim()
        .trim_end_matches(['?', '!', '.'])
        .trim()
        .to_string()
}

/// City spoken after a weather keyword, e.g. "weather in New Delhi".
///
/// Returns `None` when the utterance names no city; callers fall back to the
/// configured default.
pub fn weather_city(text: &str) -> Option<String> {
    let captures = CITY_RE.captures(text)?;
    let city = captures
        .get(1)
        .map(|m| m.as_str().trim().trim_end_matches(['?', '!', '.']).trim())
        .unwrap_or("");
    if city.is_empty() {
        None
    } else {
        Some(city.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        calc_expression, knowledge_topic, media_query, note_content, search_query, weather_city,
    };

    #[test]
    fn media_query_strips_trigger_and_fillers_but_keeps_casing() {
        assert_eq!(media_query("play the song Shape of You"), "Shape of You");
        assert_eq!(media_query("Hey can you play some music"), "");
        assert_eq!(media_query("play Tum Hi Ho"), "Tum Hi Ho");
    }

    #[test]
    fn search_query_strips_longest_trigger_first() {
        assert_eq!(search_query("search for rust closures"), "rust closures");
        assert_eq!(search_query("google borrow checker"), "borrow checker");
        assert_eq!(search_query("search"), "");
    }

    #[test]
    fn calc_expression_keeps_everything_after_the_trigger() {
        assert_eq!(calc_expression("calculate 25 * 4"), "25 * 4");
        assert_eq!(calc_expression("what is 2 + 2"), "2 + 2");
        assert_eq!(calc_expression("could you calculate (3+4)*2"), "(3+4)*2");
    }

    #[test]
    fn note_content_preserves_casing_and_drops_separators() {
        assert_eq!(
            note_content("note down: Call Dr. Mehta at 5"),
            "Call Dr. Mehta at 5"
        );
        assert_eq!(
            note_content("please remember this Milk from DMart"),
            "Milk from DMart"
        );
        assert_eq!(note_content("take a note"), "");
    }

    #[test]
    fn knowledge_topic_drops_prefix_and_question_mark() {
        assert_eq!(knowledge_topic("who is Alan Turing?"), "Alan Turing");
        assert_eq!(knowledge_topic("tell me about the Taj Mahal"), "the Taj Mahal");
        assert_eq!(knowledge_topic("define"), "");
    }

    #[test]
    fn weather_city_is_optional_and_case_preserving() {
        assert_eq!(
            weather_city("what's the weather in New Delhi?").as_deref(),
            Some("New Delhi")
        );
        assert_eq!(
            weather_city("temperature at Pune").as_deref(),
            Some("Pune")
        );
        assert_eq!(weather_city("how is the weather"), None);
    }
}
