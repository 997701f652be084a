use asha_core::db::open_db_in_memory;
use asha_core::{
    Action, AssistantConfig, Clock, ConfigStore, Disposition, FixedClock, IntentKind, Interpreter,
    NoteService, SqliteNoteRepository,
};
use chrono::{Local, TimeZone};
use std::sync::Arc;

fn interpreter() -> Interpreter {
    let config = Arc::new(ConfigStore::in_memory(AssistantConfig::default()));
    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock(Local.with_ymd_and_hms(2026, 8, 7, 9, 14, 0).unwrap()));
    let conn = open_db_in_memory().expect("in-memory db");
    let notes = Arc::new(NoteService::new(
        Box::new(SqliteNoteRepository::new(conn)),
        clock.clone(),
    ));
    Interpreter::new(config, notes, clock)
}

#[test]
fn wake_prefixed_input_equals_unprefixed_input() {
    let engine = interpreter();
    let direct = engine.interpret("what time is it");
    let woken = engine.interpret("hey asha what time is it");
    assert_eq!(direct, woken);

    let direct = engine.interpret("tell me a joke");
    let woken = engine.interpret("Hey Asha tell me a joke");
    // Jokes rotate; compare category evidence instead of exact text.
    assert!(direct.action.is_none());
    assert!(woken.action.is_none());
    assert!(!woken.text.is_empty());
}

#[test]
fn bare_wake_phrase_returns_acknowledgement() {
    let engine = interpreter();
    let outcome = engine.interpret_detailed("hey asha");
    assert_eq!(outcome.intent, IntentKind::WakeAck);
    assert!(outcome.envelope.text.contains("here"));
    assert!(outcome.envelope.action.is_none());
}

#[test]
fn repeated_wake_phrases_do_not_loop_forever() {
    let engine = interpreter();
    let stacked = "hey asha ".repeat(10) + "what time is it";
    let outcome = engine.interpret_detailed(&stacked);
    // Past the recursion cap the residue falls through to rule matching;
    // the dispatch still terminates with a well-formed envelope.
    assert!(!outcome.envelope.text.is_empty());
}

#[test]
fn empty_input_yields_clarification_not_error() {
    let engine = interpreter();
    let outcome = engine.interpret_detailed("   ");
    assert_eq!(outcome.intent, IntentKind::EmptyInput);
    assert!(!outcome.envelope.text.is_empty());
    assert!(outcome.envelope.action.is_none());
    assert!(matches!(outcome.disposition, Disposition::Degraded(_)));
}

#[test]
fn time_and_date_use_the_injected_clock() {
    let engine = interpreter();
    let time = engine.interpret("what time is it");
    assert_eq!(time.text, "The current time is 09:14 AM.");

    let date = engine.interpret("what is the date today");
    assert_eq!(date.text, "Today is Friday, August 07, 2026.");
}

#[test]
fn first_matching_rule_wins_over_later_overlap() {
    let engine = interpreter();
    // Matches the weather keywords and the knowledge prefix; weather sits
    // earlier in the table.
    let outcome = engine.interpret_detailed("what is the weather in London");
    assert_eq!(outcome.intent, IntentKind::Weather);

    // Matches calculator ("what is" + digits) ahead of knowledge lookup.
    let outcome = engine.interpret_detailed("what is 25 * 4");
    assert_eq!(outcome.intent, IntentKind::Calculate);
    assert!(outcome.envelope.text.contains("100"));
}

#[test]
fn calculator_reports_results_and_correction_prompts() {
    let engine = interpreter();
    let ok = engine.interpret("calculate 25 * 4");
    assert_eq!(ok.action, Some(Action::Calculation));
    assert!(ok.text.ends_with("= 100"));

    let division_by_zero = engine.interpret_detailed("calculate 10 / 0");
    assert!(matches!(
        division_by_zero.disposition,
        Disposition::Degraded(asha_core::DegradeReason::InvalidExpression)
    ));

    let empty = engine.interpret_detailed("calculate");
    assert!(matches!(
        empty.disposition,
        Disposition::Degraded(asha_core::DegradeReason::EmptyExpression)
    ));

    // Letters never reach an evaluator; they are stripped to nothing.
    let injected = engine.interpret_detailed("calculate import os");
    assert!(matches!(
        injected.disposition,
        Disposition::Degraded(asha_core::DegradeReason::EmptyExpression)
    ));
}

#[test]
fn worded_math_handles_one_binary_operation() {
    let engine = interpreter();
    let sum = engine.interpret("5 plus 3");
    assert!(sum.text.contains('8'));

    let divided = engine.interpret("10 divided by 0");
    assert!(divided.text.contains("undefined"));
}

#[test]
fn open_website_attaches_navigation_payload() {
    let engine = interpreter();
    let outcome = engine.interpret("open github");
    assert_eq!(outcome.action, Some(Action::OpenWebsite));
    assert!(outcome.text.contains("GitHub"));
}

#[test]
fn search_preserves_query_casing() {
    let engine = interpreter();
    let outcome = engine.interpret("search for Rust Belt history");
    assert_eq!(outcome.action, Some(Action::Search));
    assert!(outcome.text.contains("Rust Belt history"));
}

#[test]
fn search_without_query_asks_for_one() {
    let engine = interpreter();
    let outcome = engine.interpret_detailed("search");
    assert!(matches!(
        outcome.disposition,
        Disposition::Degraded(asha_core::DegradeReason::ClarificationNeeded)
    ));
    assert!(outcome.envelope.action.is_none());
}

#[test]
fn unmatched_input_falls_back_to_web_search() {
    let engine = interpreter();
    let outcome = engine.interpret_detailed("zorblat frumious bandersnatch");
    assert_eq!(outcome.intent, IntentKind::FallbackSearch);
    assert_eq!(outcome.envelope.action, Some(Action::Search));
    assert_eq!(outcome.disposition, Disposition::Served);
}

#[test]
fn renamed_assistant_changes_the_wake_phrase() {
    let config = Arc::new(ConfigStore::in_memory(AssistantConfig {
        assistant_name: "Mitra".to_string(),
        ..AssistantConfig::default()
    }));
    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock(Local.with_ymd_and_hms(2026, 8, 7, 9, 14, 0).unwrap()));
    let conn = open_db_in_memory().expect("in-memory db");
    let notes = Arc::new(NoteService::new(
        Box::new(SqliteNoteRepository::new(conn)),
        clock.clone(),
    ));
    let engine = Interpreter::new(config, notes, clock);

    let woken = engine.interpret("hey mitra what time is it");
    assert_eq!(woken.text, "The current time is 09:14 AM.");

    // The old name is no longer a wake phrase; the utterance goes through
    // normal rule matching instead.
    let outcome = engine.interpret_detailed("hey asha");
    assert_eq!(outcome.intent, IntentKind::Greeting);
}
