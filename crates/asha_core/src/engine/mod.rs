//! Command interpretation and dispatch engine.
//!
//! # Responsibility
//! - Turn one raw utterance into exactly one response envelope.
//! - Unwrap the wake phrase, walk the intent rule table, invoke handlers.
//!
//! # Invariants
//! - Every dispatch returns a well-formed envelope; no handler may panic or
//!   let a collaborator fault escape.
//! - Wake-phrase recursion is capped; past the cap the text falls through
//!   to normal rule matching.
//! - The returned `text` is never empty.

mod handlers;

use crate::clock::Clock;
use crate::config::ConfigStore;
use crate::intent::{self, IntentKind};
use crate::model::envelope::ResponseEnvelope;
use crate::provider::{AppLauncher, KnowledgeProvider, MediaSearchProvider, WeatherProvider};
use crate::service::note_service::NoteService;
use log::info;
use std::sync::Arc;

/// Upper bound on wake-phrase unwrapping per dispatch.
pub const WAKE_RECURSION_LIMIT: usize = 5;

/// Why a handler served its documented fallback instead of the happy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// The utterance carried no usable argument; the reply is a prompt.
    ClarificationNeeded,
    /// A credential or collaborator is missing.
    DependencyUnavailable,
    /// Timeout or transport-level collaborator failure.
    TransportFailure,
    InvalidExpression,
    EmptyExpression,
    /// Knowledge topic maps to several articles.
    AmbiguousTopic,
    /// The collaborator found nothing for the argument.
    NotFound,
    /// The collaborator answered with an empty result list.
    NoResults,
    /// The note store could not be read or written.
    StorageFailure,
}

impl DegradeReason {
    /// Stable lower-case tag used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClarificationNeeded => "clarification_needed",
            Self::DependencyUnavailable => "dependency_unavailable",
            Self::TransportFailure => "transport_failure",
            Self::InvalidExpression => "invalid_expression",
            Self::EmptyExpression => "empty_expression",
            Self::AmbiguousTopic => "ambiguous_topic",
            Self::NotFound => "not_found",
            Self::NoResults => "no_results",
            Self::StorageFailure => "storage_failure",
        }
    }
}

/// Whether the envelope is the happy path or a documented fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Served,
    Degraded(DegradeReason),
}

/// One handler result: the envelope plus how it came to be.
#[derive(Debug)]
pub struct Dispatch {
    pub envelope: ResponseEnvelope,
    pub disposition: Disposition,
}

impl Dispatch {
    pub(crate) fn served(envelope: ResponseEnvelope) -> Self {
        Self {
            envelope,
            disposition: Disposition::Served,
        }
    }

    pub(crate) fn degraded(reason: DegradeReason, envelope: ResponseEnvelope) -> Self {
        Self {
            envelope,
            disposition: Disposition::Degraded(reason),
        }
    }
}

/// Full dispatch outcome for tests and observability.
#[derive(Debug)]
pub struct InterpretOutcome {
    pub intent: IntentKind,
    pub envelope: ResponseEnvelope,
    pub disposition: Disposition,
}

/// The interpreter: shared state plus injected collaborators.
///
/// Stateless per call apart from the config store and the note store; safe
/// to share across threads.
pub struct Interpreter {
    config: Arc<ConfigStore>,
    notes: Arc<NoteService>,
    clock: Arc<dyn Clock>,
    weather: Option<Box<dyn WeatherProvider>>,
    media: Option<Box<dyn MediaSearchProvider>>,
    knowledge: Option<Box<dyn KnowledgeProvider>>,
    launcher: Option<Box<dyn AppLauncher>>,
}

impl Interpreter {
    /// Creates an interpreter with no external collaborators wired; every
    /// provider-backed intent serves its degraded path until injected.
    pub fn new(config: Arc<ConfigStore>, notes: Arc<NoteService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            notes,
            clock,
            weather: None,
            media: None,
            knowledge: None,
            launcher: None,
        }
    }

    pub fn with_weather(mut self, provider: Box<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    pub fn with_media(mut self, provider: Box<dyn MediaSearchProvider>) -> Self {
        self.media = Some(provider);
        self
    }

    pub fn with_knowledge(mut self, provider: Box<dyn KnowledgeProvider>) -> Self {
        self.knowledge = Some(provider);
        self
    }

    pub fn with_launcher(mut self, launcher: Box<dyn AppLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Interprets one utterance into a response envelope.
    pub fn interpret(&self, raw: &str) -> ResponseEnvelope {
        self.interpret_detailed(raw).envelope
    }

    /// Interprets one utterance, keeping intent and disposition visible.
    pub fn interpret_detailed(&self, raw: &str) -> InterpretOutcome {
        self.dispatch(raw, 0)
    }

    fn dispatch(&self, raw: &str, depth: usize) -> InterpretOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return self.finish(
                IntentKind::EmptyInput,
                Dispatch::degraded(
                    DegradeReason::ClarificationNeeded,
                    ResponseEnvelope::message("I didn't catch that. Could you try again?"),
                ),
            );
        }

        let lower = text.to_lowercase();
        if depth < WAKE_RECURSION_LIMIT {
            let wake = self.config.snapshot().wake_phrase();
            if lower.starts_with(&wake) {
                // Wake phrases are plain ASCII, so the byte offset computed
                // on the lower-cased copy is valid in the original too.
                if let Some(rest) = text.get(wake.len()..) {
                    let rest = rest.trim();
                    if rest.is_empty() {
                        return self.finish(
                            IntentKind::WakeAck,
                            Dispatch::served(ResponseEnvelope::message(
                                "Hey! I'm here. How can I help you?",
                            )),
                        );
                    }
                    return self.dispatch(rest, depth + 1);
                }
            }
        }

        let kind = intent::classify(&lower);
        let dispatch = self.handle(kind, text, &lower);
        self.finish(kind, dispatch)
    }

    fn finish(&self, intent: IntentKind, dispatch: Dispatch) -> InterpretOutcome {
        let mut envelope = dispatch.envelope;
        if envelope.text.trim().is_empty() {
            envelope.text = "I'm here, but I don't have an answer for that one.".to_string();
        }
        match dispatch.disposition {
            Disposition::Served => {
                info!(
                    "event=dispatch module=engine status=ok intent={}",
                    intent.as_str()
                );
            }
            Disposition::Degraded(reason) => {
                info!(
                    "event=dispatch module=engine status=degraded intent={} reason={}",
                    intent.as_str(),
                    reason.as_str()
                );
            }
        }
        InterpretOutcome {
            intent,
            envelope,
            disposition: dispatch.disposition,
        }
    }

    fn handle(&self, kind: IntentKind, text: &str, lower: &str) -> Dispatch {
        match kind {
            IntentKind::Time => self.handle_time(),
            IntentKind::Date => self.handle_date(),
            IntentKind::Weather => self.handle_weather(text),
            IntentKind::OpenWebsite => self.handle_open_website(text, lower),
            IntentKind::OpenApp => self.handle_open_app(text, lower),
            IntentKind::WebSearch => self.handle_web_search(text),
            IntentKind::PlayMedia => self.handle_play_media(text),
            IntentKind::Calculate => self.handle_calculate(text),
            IntentKind::WordedMath => self.handle_worded_math(text, lower),
            IntentKind::NoteSave => self.handle_note_save(text),
            IntentKind::NoteList => self.handle_note_list(),
            IntentKind::NoteClear => self.handle_note_clear(),
            IntentKind::Greeting => self.handle_greeting(),
            IntentKind::HowAreYou => self.handle_how_are_you(),
            IntentKind::Capabilities => self.handle_capabilities(),
            IntentKind::Joke => self.handle_joke(),
            IntentKind::Creator => self.handle_creator(),
            IntentKind::Name => self.handle_name(),
            IntentKind::Thanks => self.handle_thanks(),
            IntentKind::Farewell => self.handle_farewell(),
            IntentKind::Knowledge => self.handle_knowledge(text),
            IntentKind::SystemInfo => self.handle_system_info(),
            IntentKind::FallbackSearch | IntentKind::WakeAck | IntentKind::EmptyInput => {
                self.handle_fallback_search(text)
            }
        }
    }
}
