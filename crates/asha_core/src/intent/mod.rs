//! Intent rule table and classification.
//!
//! # Responsibility
//! - Declare the ordered `(predicate, intent)` table the engine walks.
//! - Classify lower-cased utterances by first-match-wins.
//!
//! # Invariants
//! - Rule order is the tie-break priority and never changes at runtime.
//! - The final rule's predicate is always true, so classification is total.
//! - Predicates are pure functions over the lower-cased utterance.

pub mod calc;
pub mod catalog;
pub mod extract;

use once_cell::sync::Lazy;
use regex::Regex;

// Bilingual keyword sets (English + transliterated Hindi).
const TIME_KEYWORDS: &[&str] = &["time", "samay", "baje"];
const TIME_QUESTION_KEYWORDS: &[&str] = &["what", "tell", "current", "kya", "kitne", "batao"];
const DATE_KEYWORDS: &[&str] = &["date", "today", "din", "tarikh"];
const WEATHER_KEYWORDS: &[&str] = &["weather", "temperature", "mausam", "taapmaan"];
const NOTE_SAVE_KEYWORDS: &[&str] = &["take a note", "save a note", "note down", "remember this"];
const NOTE_LIST_KEYWORDS: &[&str] = &["show notes", "my notes", "open notes", "list notes"];
const NOTE_CLEAR_KEYWORDS: &[&str] = &["delete all notes", "clear notes"];
const HOW_ARE_YOU_KEYWORDS: &[&str] = &["how are you", "kaise ho", "how do you do"];
const CAPABILITY_KEYWORDS: &[&str] = &["what can you do", "help", "features", "capabilities"];
const JOKE_KEYWORDS: &[&str] = &["joke", "funny", "make me laugh", "mazak"];
const CREATOR_KEYWORDS: &[&str] = &[
    "who made you",
    "who created you",
    "who built you",
    "kisne banaya",
];
const NAME_KEYWORDS: &[&str] = &["your name", "tumhara naam"];
const THANKS_KEYWORDS: &[&str] = &["thank", "shukriya", "dhanyawad", "dhanyavaad"];
const SYSTEM_INFO_KEYWORDS: &[&str] = &["system info", "my computer"];

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(hi|hello|hey|namaste|namaskar|hola|good morning|good afternoon|good evening)\b")
        .expect("valid greeting regex")
});
static FAREWELL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(bye|goodbye|see you|tata|alvida|good night)\b").expect("valid farewell regex")
});
static KNOWLEDGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(who is|what is|tell me about|define|explain)\b").expect("valid knowledge regex")
});
static PLAY_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bplay\b").expect("valid play regex"));
static MATH_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9+*/^%-]").expect("valid math char regex"));

/// Category assigned to an utterance by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Time,
    Date,
    Weather,
    OpenWebsite,
    OpenApp,
    WebSearch,
    PlayMedia,
    Calculate,
    WordedMath,
    NoteSave,
    NoteList,
    NoteClear,
    Greeting,
    HowAreYou,
    Capabilities,
    Joke,
    Creator,
    Name,
    Thanks,
    Farewell,
    Knowledge,
    SystemInfo,
    FallbackSearch,
    /// Synthetic: wake phrase with no remainder. Not part of `RULES`.
    WakeAck,
    /// Synthetic: empty input after trimming. Not part of `RULES`.
    EmptyInput,
}

impl IntentKind {
    /// Stable lower-case tag used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Date => "date",
            Self::Weather => "weather",
            Self::OpenWebsite => "open_website",
            Self::OpenApp => "open_app",
            Self::WebSearch => "web_search",
            Self::PlayMedia => "play_media",
            Self::Calculate => "calculate",
            Self::WordedMath => "worded_math",
            Self::NoteSave => "note_save",
            Self::NoteList => "note_list",
            Self::NoteClear => "note_clear",
            Self::Greeting => "greeting",
            Self::HowAreYou => "how_are_you",
            Self::Capabilities => "capabilities",
            Self::Joke => "joke",
            Self::Creator => "creator",
            Self::Name => "name",
            Self::Thanks => "thanks",
            Self::Farewell => "farewell",
            Self::Knowledge => "knowledge",
            Self::SystemInfo => "system_info",
            Self::FallbackSearch => "fallback_search",
            Self::WakeAck => "wake_ack",
            Self::EmptyInput => "empty_input",
        }
    }
}

/// One entry of the ordered dispatch table.
pub struct IntentRule {
    pub kind: IntentKind,
    /// Predicate over the lower-cased utterance.
    pub matches: fn(&str) -> bool,
}

/// The dispatch table. Order is load-bearing: more specific intents sit
/// before broader catch-alls, and the final fallback matches everything.
pub const RULES: &[IntentRule] = &[
    IntentRule {
        kind: IntentKind::Time,
        matches: is_time,
    },
    IntentRule {
        kind: IntentKind::Date,
        matches: is_date,
    },
    IntentRule {
        kind: IntentKind::Weather,
        matches: is_weather,
    },
    IntentRule {
        kind: IntentKind::OpenWebsite,
        matches: is_open_website,
    },
    IntentRule {
        kind: IntentKind::OpenApp,
        matches: is_open_app,
    },
    IntentRule {
        kind: IntentKind::WebSearch,
        matches: is_web_search,
    },
    IntentRule {
        kind: IntentKind::PlayMedia,
        matches: is_play_media,
    },
    IntentRule {
        kind: IntentKind::Calculate,
        matches: is_calculate,
    },
    IntentRule {
        kind: IntentKind::WordedMath,
        matches: is_worded_math,
    },
    IntentRule {
        kind: IntentKind::NoteSave,
        matches: is_note_save,
    },
    IntentRule {
        kind: IntentKind::NoteList,
        matches: is_note_list,
    },
    IntentRule {
        kind: IntentKind::NoteClear,
        matches: is_note_clear,
    },
    IntentRule {
        kind: IntentKind::Greeting,
        matches: is_greeting,
    },
    IntentRule {
        kind: IntentKind::HowAreYou,
        matches: is_how_are_you,
    },
    IntentRule {
        kind: IntentKind::Capabilities,
        matches: is_capabilities,
    },
    IntentRule {
        kind: IntentKind::Joke,
        matches: is_joke,
    },
    IntentRule {
        kind: IntentKind::Creator,
        matches: is_creator,
    },
    IntentRule {
        kind: IntentKind::Name,
        matches: is_name,
    },
    IntentRule {
        kind: IntentKind::Thanks,
        matches: is_thanks,
    },
    IntentRule {
        kind: IntentKind::Farewell,
        matches: is_farewell,
    },
    IntentRule {
        kind: IntentKind::Knowledge,
        matches: is_knowledge,
    },
    IntentRule {
        kind: IntentKind::SystemInfo,
        matches: is_system_info,
    },
    IntentRule {
        kind: IntentKind::FallbackSearch,
        matches: always,
    },
];

/// Walks `RULES` in declared order and returns the first match.
pub fn classify(lower: &str) -> IntentKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(lower))
        .map_or(IntentKind::FallbackSearch, |rule| rule.kind)
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lower.contains(keyword))
}

fn is_time(lower: &str) -> bool {
    contains_any(lower, TIME_KEYWORDS) && contains_any(lower, TIME_QUESTION_KEYWORDS)
}

fn is_date(lower: &str) -> bool {
    contains_any(lower, DATE_KEYWORDS)
}

fn is_weather(lower: &str) -> bool {
    contains_any(lower, WEATHER_KEYWORDS)
}

fn is_open_website(lower: &str) -> bool {
    lower.contains("open") && catalog::match_website(lower).is_some()
}

fn is_open_app(lower: &str) -> bool {
    lower.contains("open") && catalog::match_app(lower).is_some()
}

fn is_web_search(lower: &str) -> bool {
    lower.starts_with("search") || lower.starts_with("google") || lower.contains("search for")
}

fn is_play_media(lower: &str) -> bool {
    PLAY_WORD_RE.is_match(lower)
}

fn is_calculate(lower: &str) -> bool {
    lower.contains("calculate") || (lower.contains("what is") && MATH_CHAR_RE.is_match(lower))
}

fn is_worded_math(lower: &str) -> bool {
    calc::worded_math(lower).is_some()
}

fn is_note_save(lower: &str) -> bool {
    contains_any(lower, NOTE_SAVE_KEYWORDS)
}

fn is_note_list(lower: &str) -> bool {
    contains_any(lower, NOTE_LIST_KEYWORDS)
}

fn is_note_clear(lower: &str) -> bool {
    contains_any(lower, NOTE_CLEAR_KEYWORDS)
}

fn is_greeting(lower: &str) -> bool {
    GREETING_RE.is_match(lower)
}

fn is_how_are_you(lower: &str) -> bool {
    contains_any(lower, HOW_ARE_YOU_KEYWORDS)
}

fn is_capabilities(lower: &str) -> bool {
    contains_any(lower, CAPABILITY_KEYWORDS)
}

fn is_joke(lower: &str) -> bool {
    contains_any(lower, JOKE_KEYWORDS)
}

fn is_creator(lower: &str) -> bool {
    contains_any(lower, CREATOR_KEYWORDS)
}

fn is_name(lower: &str) -> bool {
    contains_any(lower, NAME_KEYWORDS)
}

fn is_thanks(lower: &str) -> bool {
    contains_any(lower, THANKS_KEYWORDS)
}

fn is_farewell(lower: &str) -> bool {
    FAREWELL_RE.is_match(lower)
}

fn is_knowledge(lower: &str) -> bool {
    KNOWLEDGE_RE.is_match(lower)
}

fn is_system_info(lower: &str) -> bool {
    contains_any(lower, SYSTEM_INFO_KEYWORDS)
}

fn always(_lower: &str) -> bool {
    true
}
