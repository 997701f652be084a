use asha_core::db::open_db_in_memory;
use asha_core::{
    Action, AssistantConfig, Clock, ConfigStore, DegradeReason, Disposition, FixedClock,
    IntentKind, Interpreter, KnowledgeError, KnowledgeProvider, MediaSearchProvider, NoteService,
    ProviderError, SqliteNoteRepository, VideoResult, WeatherProvider, WeatherReport,
};
use chrono::{Local, TimeZone};
use std::sync::Arc;

struct TimeoutWeather;

impl WeatherProvider for TimeoutWeather {
    fn current(&self, _city: &str) -> Result<WeatherReport, ProviderError> {
        Err(ProviderError::Timeout)
    }
}

struct UnknownCityWeather;

impl WeatherProvider for UnknownCityWeather {
    fn current(&self, _city: &str) -> Result<WeatherReport, ProviderError> {
        Err(ProviderError::Status {
            code: 404,
            message: "city not found".to_string(),
        })
    }
}

struct SunnyWeather;

impl WeatherProvider for SunnyWeather {
    fn current(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        Ok(WeatherReport {
            city: city.to_string(),
            description: "clear sky".to_string(),
            condition: "Clear".to_string(),
            temp_c: 31,
            feels_like_c: 34,
            humidity: 48,
        })
    }
}

struct EmptyMedia;

impl MediaSearchProvider for EmptyMedia {
    fn search(&self, _query: &str, _max_results: u8) -> Result<Vec<VideoResult>, ProviderError> {
        Ok(Vec::new())
    }
}

struct SingleHitMedia;

impl MediaSearchProvider for SingleHitMedia {
    fn search(&self, _query: &str, _max_results: u8) -> Result<Vec<VideoResult>, ProviderError> {
        Ok(vec![VideoResult {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Morning Raga".to_string(),
            channel: "Classical Hours".to_string(),
            thumbnail: "https://example.invalid/thumb.jpg".to_string(),
        }])
    }
}

struct FailingMedia;

impl MediaSearchProvider for FailingMedia {
    fn search(&self, _query: &str, _max_results: u8) -> Result<Vec<VideoResult>, ProviderError> {
        Err(ProviderError::Transport("connection reset".to_string()))
    }
}

struct AmbiguousKnowledge;

impl KnowledgeProvider for AmbiguousKnowledge {
    fn summarize(&self, _topic: &str, _sentences: u8) -> Result<String, KnowledgeError> {
        Err(KnowledgeError::Disambiguation(vec![
            "Mercury (planet)".to_string(),
            "Mercury (element)".to_string(),
            "Mercury (mythology)".to_string(),
            "Mercury Records".to_string(),
            "Mercury, Nevada".to_string(),
            "Project Mercury".to_string(),
        ]))
    }
}

struct MissingKnowledge;

impl KnowledgeProvider for MissingKnowledge {
    fn summarize(&self, _topic: &str, _sentences: u8) -> Result<String, KnowledgeError> {
        Err(KnowledgeError::NotFound)
    }
}

struct VerboseKnowledge;

impl KnowledgeProvider for VerboseKnowledge {
    fn summarize(&self, _topic: &str, _sentences: u8) -> Result<String, KnowledgeError> {
        Ok("x".repeat(1000))
    }
}

fn engine_with(config: AssistantConfig) -> Interpreter {
    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock(Local.with_ymd_and_hms(2026, 8, 7, 9, 14, 0).unwrap()));
    let conn = open_db_in_memory().expect("in-memory db");
    let notes = Arc::new(NoteService::new(
        Box::new(SqliteNoteRepository::new(conn)),
        clock.clone(),
    ));
    Interpreter::new(Arc::new(ConfigStore::in_memory(config)), notes, clock)
}

fn config_with_keys() -> AssistantConfig {
    AssistantConfig {
        weather_api_key: Some("weather-key".to_string()),
        youtube_api_key: Some("media-key".to_string()),
        ..AssistantConfig::default()
    }
}

#[test]
fn weather_without_key_degrades_to_search_prompt() {
    let engine = engine_with(AssistantConfig::default());
    let outcome = engine.interpret_detailed("what's the weather");
    assert_eq!(outcome.intent, IntentKind::Weather);
    assert!(!outcome.envelope.text.is_empty());
    assert_eq!(outcome.envelope.action, Some(Action::Search));
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::DependencyUnavailable)
    );
    // The prompt names the configured default city.
    assert!(outcome.envelope.text.contains("Delhi"));
}

#[test]
fn weather_timeout_becomes_a_retry_prompt() {
    let engine = engine_with(config_with_keys()).with_weather(Box::new(TimeoutWeather));
    let outcome = engine.interpret_detailed("weather in Pune");
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::TransportFailure)
    );
    assert!(outcome.envelope.text.contains("taking too long"));
}

#[test]
fn weather_unknown_city_prompts_a_spelling_check() {
    let engine = engine_with(config_with_keys()).with_weather(Box::new(UnknownCityWeather));
    let outcome = engine.interpret_detailed("weather in Atlantisville");
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::NotFound)
    );
    assert!(outcome.envelope.text.contains("Atlantisville"));
}

#[test]
fn weather_success_carries_a_typed_report() {
    let engine = engine_with(config_with_keys()).with_weather(Box::new(SunnyWeather));
    let outcome = engine.interpret_detailed("weather in Jaipur");
    assert_eq!(outcome.disposition, Disposition::Served);
    assert_eq!(outcome.envelope.action, Some(Action::Weather));
    assert!(outcome.envelope.text.contains("Jaipur"));
    assert!(outcome.envelope.text.contains("31°C"));
    assert!(outcome.envelope.text.contains("48%"));
}

#[test]
fn media_with_zero_results_falls_back_to_provider_search() {
    let engine = engine_with(config_with_keys()).with_media(Box::new(EmptyMedia));
    let outcome = engine.interpret_detailed("play some lofi beats");
    assert_eq!(outcome.envelope.action, Some(Action::PlayMusic));
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::NoResults)
    );
}

#[test]
fn media_without_key_never_reaches_the_provider() {
    let engine = engine_with(AssistantConfig::default()).with_media(Box::new(FailingMedia));
    let outcome = engine.interpret_detailed("play lofi");
    assert_eq!(outcome.envelope.action, Some(Action::PlayMusic));
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::DependencyUnavailable)
    );
}

#[test]
fn media_transport_failure_still_offers_playback() {
    let engine = engine_with(config_with_keys()).with_media(Box::new(FailingMedia));
    let outcome = engine.interpret_detailed("play morning ragas");
    assert_eq!(outcome.envelope.action, Some(Action::PlayMusic));
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::TransportFailure)
    );
    assert!(outcome.envelope.text.contains("morning ragas"));
}

#[test]
fn media_success_plays_the_top_result() {
    let engine = engine_with(config_with_keys()).with_media(Box::new(SingleHitMedia));
    let outcome = engine.interpret_detailed("play the song Morning Raga");
    assert_eq!(outcome.disposition, Disposition::Served);
    assert_eq!(outcome.envelope.action, Some(Action::PlayYoutube));
    assert!(outcome.envelope.text.contains("Morning Raga"));
    assert!(outcome.envelope.text.contains("Classical Hours"));
}

#[test]
fn empty_media_query_defaults_to_relaxing_music() {
    let engine = engine_with(AssistantConfig::default());
    let outcome = engine.interpret_detailed("play");
    assert_eq!(outcome.envelope.action, Some(Action::PlayMusic));
    assert!(outcome.envelope.text.contains("relaxing music"));
}

#[test]
fn ambiguous_topic_lists_at_most_five_candidates() {
    let engine = engine_with(AssistantConfig::default()).with_knowledge(Box::new(AmbiguousKnowledge));
    let outcome = engine.interpret_detailed("tell me about Mercury");
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::AmbiguousTopic)
    );
    assert!(outcome.envelope.text.contains("Mercury (planet)"));
    assert!(outcome.envelope.text.contains("Mercury, Nevada"));
    // The sixth candidate is cut.
    assert!(!outcome.envelope.text.contains("Project Mercury"));
}

#[test]
fn missing_article_falls_back_to_a_search_envelope() {
    let engine = engine_with(AssistantConfig::default()).with_knowledge(Box::new(MissingKnowledge));
    let outcome = engine.interpret_detailed("who is Zorblat the Unknowable");
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::NotFound)
    );
    assert_eq!(outcome.envelope.action, Some(Action::Search));
}

#[test]
fn long_summaries_are_truncated_with_an_ellipsis() {
    let engine = engine_with(AssistantConfig::default()).with_knowledge(Box::new(VerboseKnowledge));
    let outcome = engine.interpret_detailed("tell me about endurance");
    assert_eq!(outcome.disposition, Disposition::Served);
    assert!(outcome.envelope.text.ends_with("..."));
    assert!(outcome.envelope.text.chars().count() <= 403);
}

#[test]
fn knowledge_without_provider_degrades_to_search() {
    let engine = engine_with(AssistantConfig::default());
    let outcome = engine.interpret_detailed("tell me about the Taj Mahal");
    assert_eq!(outcome.envelope.action, Some(Action::Search));
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::DependencyUnavailable)
    );
}

#[test]
fn open_app_without_a_launcher_degrades_politely() {
    let engine = engine_with(AssistantConfig::default());
    let outcome = engine.interpret_detailed("open calculator");
    assert_eq!(outcome.intent, IntentKind::OpenApp);
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::DependencyUnavailable)
    );
    assert!(outcome.envelope.action.is_none());
}

#[test]
fn open_app_with_a_launcher_reports_success() {
    struct RecordingLauncher(std::sync::Mutex<Vec<String>>);

    impl asha_core::AppLauncher for RecordingLauncher {
        fn launch(&self, command: &str) -> Result<(), ProviderError> {
            self.0
                .lock()
                .expect("launcher mutex")
                .push(command.to_string());
            Ok(())
        }
    }

    let engine = engine_with(AssistantConfig::default())
        .with_launcher(Box::new(RecordingLauncher(std::sync::Mutex::new(Vec::new()))));
    let outcome = engine.interpret_detailed("open notepad");
    assert_eq!(outcome.disposition, Disposition::Served);
    assert!(outcome.envelope.text.contains("Notepad"));
}

#[test]
fn empty_knowledge_topic_asks_for_one() {
    let engine = engine_with(AssistantConfig::default());
    let outcome = engine.interpret_detailed("define");
    assert_eq!(
        outcome.disposition,
        Disposition::Degraded(DegradeReason::ClarificationNeeded)
    );
    assert!(outcome.envelope.action.is_none());
}
