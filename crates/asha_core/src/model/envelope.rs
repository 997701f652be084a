//! Response envelope and typed handler payloads.
//!
//! # Responsibility
//! - Define the canonical `{text, action, data}` output of every dispatch.
//! - Keep side-effect tags a closed, serializable enumeration.
//!
//! # Invariants
//! - Every handler produces exactly one envelope per dispatch.
//! - `data` payload shape is determined by `action`.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};

/// Side-effecting action tag attached to a response envelope.
///
/// The frontend/server layer interprets these; the engine only selects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Navigate the user agent to a known website.
    OpenWebsite,
    /// Start playback of a resolved video.
    PlayYoutube,
    /// Degraded media playback: open a provider search URL instead.
    PlayMusic,
    /// A note was created.
    NoteSaved,
    /// Display the note list.
    ShowNotes,
    /// The note store was emptied.
    NotesCleared,
    /// Weather report payload attached.
    Weather,
    /// Arithmetic result payload attached.
    Calculation,
    /// Open a web search for the attached query.
    Search,
}

impl Action {
    /// Stable wire tag, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenWebsite => "open_website",
            Self::PlayYoutube => "play_youtube",
            Self::PlayMusic => "play_music",
            Self::NoteSaved => "note_saved",
            Self::ShowNotes => "show_notes",
            Self::NotesCleared => "notes_cleared",
            Self::Weather => "weather",
            Self::Calculation => "calculation",
            Self::Search => "search",
        }
    }
}

/// Target of an `open_website` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebsiteTarget {
    pub url: String,
    pub name: String,
}

/// Query plus pre-built URL for `search` actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTarget {
    pub query: String,
    pub url: String,
}

/// Current-conditions report returned by the weather collaborator.
///
/// Metric units; temperatures rounded to whole degrees by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    /// City name as resolved by the provider (may differ from the query).
    pub city: String,
    /// Human-readable conditions, e.g. "light rain".
    pub description: String,
    /// Coarse condition group, e.g. "Rain", "Clear".
    pub condition: String,
    pub temp_c: i32,
    pub feels_like_c: i32,
    pub humidity: i32,
}

/// One video hit from the media-search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
}

/// Resolved playback payload for `play_youtube`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackData {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    /// Watch-page URL for the top result.
    pub url: String,
    /// Autoplaying embed URL for the top result.
    pub embed: String,
    /// Top result plus up to four alternates, provider order.
    pub results: Vec<VideoResult>,
    pub query: String,
}

/// Degraded media payload for `play_music`: a provider search URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFallback {
    pub query: String,
    pub url: String,
    /// Always true; marks this payload as the non-API path.
    pub fallback: bool,
}

/// Arithmetic result payload for `calculation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationData {
    pub expression: String,
    pub result: f64,
}

/// Note list payload for `show_notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesData {
    pub notes: Vec<Note>,
    pub count: usize,
}

/// Structured payload attached to an envelope, shaped by its `Action`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    Website(WebsiteTarget),
    Search(SearchTarget),
    Weather(WeatherReport),
    Playback(Box<PlaybackData>),
    MediaFallback(MediaFallback),
    Calculation(CalculationData),
    Note(Note),
    Notes(NotesData),
}

/// Canonical output of one dispatch call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// User-facing reply; never empty after engine processing.
    pub text: String,
    pub action: Option<Action>,
    pub data: Option<EnvelopeData>,
}

impl ResponseEnvelope {
    /// Builds a text-only envelope with no action or payload.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
            data: None,
        }
    }

    /// Attaches an action tag.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Attaches a structured payload.
    pub fn with_data(mut self, data: EnvelopeData) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ResponseEnvelope};

    #[test]
    fn action_tags_serialize_snake_case() {
        let tag = serde_json::to_string(&Action::PlayYoutube).expect("serializable action");
        assert_eq!(tag, "\"play_youtube\"");
        let tag = serde_json::to_string(&Action::NotesCleared).expect("serializable action");
        assert_eq!(tag, "\"notes_cleared\"");
    }

    #[test]
    fn message_builder_leaves_action_and_data_unset() {
        let envelope = ResponseEnvelope::message("hello");
        assert_eq!(envelope.text, "hello");
        assert!(envelope.action.is_none());
        assert!(envelope.data.is_none());
    }
}
