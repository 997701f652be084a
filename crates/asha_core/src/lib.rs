//! Core command interpretation and dispatch logic for the Asha assistant.
//! This crate is the single source of truth for intent routing invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod intent;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AssistantConfig, ConfigPatch, ConfigStore};
pub use engine::{
    DegradeReason, Dispatch, Disposition, Interpreter, InterpretOutcome, WAKE_RECURSION_LIMIT,
};
pub use intent::calc::{evaluate, worded_math, CalcError};
pub use intent::{classify, IntentKind};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::envelope::{
    Action, EnvelopeData, ResponseEnvelope, VideoResult, WeatherReport,
};
pub use model::note::{Note, NoteId};
pub use provider::{
    AppLauncher, KnowledgeError, KnowledgeProvider, MediaSearchProvider, ProviderError,
    WeatherProvider,
};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteStoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
