//! Intent handlers.
//!
//! # Responsibility
//! - Map each classified intent to exactly one response envelope.
//! - Convert every collaborator fault into a documented degraded envelope.
//!
//! # Invariants
//! - Handlers are total over their input domain; none may panic.
//! - Missing arguments yield clarification prompts, not errors.

use crate::engine::{DegradeReason, Dispatch, Interpreter};
use crate::intent::{calc, catalog, extract};
use crate::model::envelope::{
    Action, CalculationData, EnvelopeData, MediaFallback, NotesData, PlaybackData, ResponseEnvelope,
    SearchTarget, WebsiteTarget,
};
use crate::provider::{KnowledgeError, ProviderError};
use crate::service::note_service::NoteStoreError;
use chrono::Timelike;
use log::error;
use rand::seq::SliceRandom;

const MEDIA_MAX_RESULTS: u8 = 5;
const DEFAULT_MEDIA_QUERY: &str = "relaxing music";
const KNOWLEDGE_SENTENCES: u8 = 3;
const KNOWLEDGE_MAX_CHARS: usize = 400;

fn google_search_url(query: &str) -> String {
    format!(
        "https://www.google.com/search?q={}",
        urlencoding::encode(query)
    )
}

fn youtube_results_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

fn search_envelope(text: impl Into<String>, query: &str) -> ResponseEnvelope {
    ResponseEnvelope::message(text)
        .with_action(Action::Search)
        .with_data(EnvelopeData::Search(SearchTarget {
            query: query.to_string(),
            url: google_search_url(query),
        }))
}

fn pick<'a>(choices: &[&'a str]) -> &'a str {
    choices
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(choices[0])
}

impl Interpreter {
    pub(super) fn handle_time(&self) -> Dispatch {
        let now = self.clock.now();
        Dispatch::served(ResponseEnvelope::message(format!(
            "The current time is {}.",
            now.format("%I:%M %p")
        )))
    }

    pub(super) fn handle_date(&self) -> Dispatch {
        let now = self.clock.now();
        Dispatch::served(ResponseEnvelope::message(format!(
            "Today is {}.",
            now.format("%A, %B %d, %Y")
        )))
    }

    pub(super) fn handle_weather(&self, text: &str) -> Dispatch {
        let config = self.config.snapshot();
        let city = extract::weather_city(text).unwrap_or_else(|| config.default_city.clone());

        let provider = match self.weather.as_deref() {
            Some(provider) if config.has_weather_key() => provider,
            _ => {
                let query = format!("weather {city}");
                return Dispatch::degraded(
                    DegradeReason::DependencyUnavailable,
                    search_envelope(
                        format!(
                            "No weather API key is configured, so I've prepared a web search \
                             for weather in {city}. Add an OpenWeatherMap API key in Settings \
                             for live data."
                        ),
                        &query,
                    ),
                );
            }
        };

        match provider.current(&city) {
            Ok(report) => {
                let text = format!(
                    "Weather in {}: {}, {}°C (feels like {}°C). Humidity: {}%.",
                    report.city,
                    report.description,
                    report.temp_c,
                    report.feels_like_c,
                    report.humidity
                );
                Dispatch::served(
                    ResponseEnvelope::message(text)
                        .with_action(Action::Weather)
                        .with_data(EnvelopeData::Weather(report)),
                )
            }
            Err(ProviderError::Timeout) => Dispatch::degraded(
                DegradeReason::TransportFailure,
                ResponseEnvelope::message(
                    "The weather service is taking too long. Please try again.",
                ),
            ),
            Err(ProviderError::Status { .. }) => Dispatch::degraded(
                DegradeReason::NotFound,
                ResponseEnvelope::message(format!(
                    "Sorry, I couldn't find weather for \"{city}\". Please check the city name."
                )),
            ),
            Err(err) => {
                error!("event=weather_fetch module=engine status=error error={err}");
                Dispatch::degraded(
                    DegradeReason::TransportFailure,
                    ResponseEnvelope::message("Error fetching weather. Please try again."),
                )
            }
        }
    }

    pub(super) fn handle_open_website(&self, text: &str, lower: &str) -> Dispatch {
        let Some(site) = catalog::match_website(lower) else {
            return self.handle_fallback_search(text);
        };
        Dispatch::served(
            ResponseEnvelope::message(format!("Opening {} for you!", site.name))
                .with_action(Action::OpenWebsite)
                .with_data(EnvelopeData::Website(WebsiteTarget {
                    url: site.url.to_string(),
                    name: site.name.to_string(),
                })),
        )
    }

    pub(super) fn handle_open_app(&self, text: &str, lower: &str) -> Dispatch {
        let Some(app) = catalog::match_app(lower) else {
            return self.handle_fallback_search(text);
        };
        match self.launcher.as_deref() {
            None => Dispatch::degraded(
                DegradeReason::DependencyUnavailable,
                ResponseEnvelope::message(format!(
                    "I can't launch {} from here right now.",
                    app.name
                )),
            ),
            Some(launcher) => match launcher.launch(app.command) {
                Ok(()) => {
                    Dispatch::served(ResponseEnvelope::message(format!("Opening {}!", app.name)))
                }
                Err(err) => {
                    error!("event=app_launch module=engine status=error app={} error={err}", app.command);
                    Dispatch::degraded(
                        DegradeReason::DependencyUnavailable,
                        ResponseEnvelope::message(format!(
                            "Sorry, I couldn't open {}. Make sure it's installed.",
                            app.name
                        )),
                    )
                }
            },
        }
    }

    pub(super) fn handle_web_search(&self, text: &str) -> Dispatch {
        let query = extract::search_query(text);
        if query.is_empty() {
            return Dispatch::degraded(
                DegradeReason::ClarificationNeeded,
                ResponseEnvelope::message("What would you like me to search for?"),
            );
        }
        Dispatch::served(search_envelope(
            format!("Searching the web for \"{query}\"."),
            &query,
        ))
    }

    pub(super) fn handle_play_media(&self, text: &str) -> Dispatch {
        let extracted = extract::media_query(text);
        let query = if extracted.is_empty() {
            DEFAULT_MEDIA_QUERY.to_string()
        } else {
            extracted
        };

        let fallback = |reason: DegradeReason, text: String| {
            Dispatch::degraded(
                reason,
                ResponseEnvelope::message(text)
                    .with_action(Action::PlayMusic)
                    .with_data(EnvelopeData::MediaFallback(MediaFallback {
                        query: query.clone(),
                        url: youtube_results_url(&query),
                        fallback: true,
                    })),
            )
        };

        let config = self.config.snapshot();
        let provider = match self.media.as_deref() {
            Some(provider) if config.has_media_key() => provider,
            _ => {
                return fallback(
                    DegradeReason::DependencyUnavailable,
                    format!("Searching YouTube for \"{query}\"!"),
                );
            }
        };

        match provider.search(&query, MEDIA_MAX_RESULTS) {
            Ok(results) if results.is_empty() => fallback(
                DegradeReason::NoResults,
                format!("No exact match found. Searching YouTube for \"{query}\"."),
            ),
            Ok(mut results) => {
                results.truncate(MEDIA_MAX_RESULTS as usize);
                let top = results[0].clone();
                let text = format!("Now playing: \"{}\" by {}", top.title, top.channel);
                Dispatch::served(
                    ResponseEnvelope::message(text)
                        .with_action(Action::PlayYoutube)
                        .with_data(EnvelopeData::Playback(Box::new(PlaybackData {
                            url: format!("https://www.youtube.com/watch?v={}", top.video_id),
                            embed: format!(
                                "https://www.youtube.com/embed/{}?autoplay=1",
                                top.video_id
                            ),
                            video_id: top.video_id,
                            title: top.title,
                            channel: top.channel,
                            thumbnail: top.thumbnail,
                            results,
                            query: query.clone(),
                        }))),
                )
            }
            Err(err) => {
                error!("event=media_search module=engine status=error error={err}");
                fallback(
                    DegradeReason::TransportFailure,
                    format!("Playing \"{query}\" on YouTube!"),
                )
            }
        }
    }

    pub(super) fn handle_calculate(&self, text: &str) -> Dispatch {
        let expression = extract::calc_expression(text);
        match calc::evaluate(&expression) {
            Ok(result) => Dispatch::served(
                ResponseEnvelope::message(format!(
                    "{expression} = {}",
                    calc::format_number(result)
                ))
                .with_action(Action::Calculation)
                .with_data(EnvelopeData::Calculation(CalculationData {
                    expression,
                    result,
                })),
            ),
            Err(calc::CalcError::EmptyExpression) => Dispatch::degraded(
                DegradeReason::EmptyExpression,
                ResponseEnvelope::message(
                    "Please give me a valid math expression, like 'calculate 25 * 4'.",
                ),
            ),
            Err(calc::CalcError::InvalidExpression) => Dispatch::degraded(
                DegradeReason::InvalidExpression,
                ResponseEnvelope::message(
                    "Sorry, I couldn't calculate that. Try something like 'calculate 25 * 4'.",
                ),
            ),
        }
    }

    pub(super) fn handle_worded_math(&self, text: &str, lower: &str) -> Dispatch {
        let Some(phrase) = calc::worded_math(lower) else {
            return self.handle_fallback_search(text);
        };
        let rendered = match phrase.compute() {
            Some(result) => calc::format_number(result),
            None => "undefined (division by zero)".to_string(),
        };
        Dispatch::served(ResponseEnvelope::message(format!(
            "{} {} {} = {rendered}",
            calc::format_number(phrase.a),
            phrase.op_text,
            calc::format_number(phrase.b)
        )))
    }

    pub(super) fn handle_note_save(&self, text: &str) -> Dispatch {
        let content = extract::note_content(text);
        if content.is_empty() {
            return Dispatch::degraded(
                DegradeReason::ClarificationNeeded,
                ResponseEnvelope::message("What would you like me to note down?"),
            );
        }
        match self.notes.add(&content) {
            Ok(note) => Dispatch::served(
                ResponseEnvelope::message(format!("Got it! I've saved your note: \"{content}\"."))
                    .with_action(Action::NoteSaved)
                    .with_data(EnvelopeData::Note(note)),
            ),
            Err(NoteStoreError::EmptyContent) => Dispatch::degraded(
                DegradeReason::ClarificationNeeded,
                ResponseEnvelope::message("What would you like me to note down?"),
            ),
            Err(err) => {
                error!("event=note_add module=engine status=error error={err}");
                Dispatch::degraded(
                    DegradeReason::StorageFailure,
                    ResponseEnvelope::message(
                        "I couldn't save that note right now. Please try again.",
                    ),
                )
            }
        }
    }

    pub(super) fn handle_note_list(&self) -> Dispatch {
        match self.notes.list() {
            Ok(notes) => {
                let text = if notes.is_empty() {
                    "You don't have any notes yet. Say 'Take a note' to add one!".to_string()
                } else {
                    format!("You have {} note(s).", notes.len())
                };
                let count = notes.len();
                Dispatch::served(
                    ResponseEnvelope::message(text)
                        .with_action(Action::ShowNotes)
                        .with_data(EnvelopeData::Notes(NotesData { notes, count })),
                )
            }
            Err(err) => {
                error!("event=note_list module=engine status=error error={err}");
                Dispatch::degraded(
                    DegradeReason::StorageFailure,
                    ResponseEnvelope::message("I couldn't read your notes right now."),
                )
            }
        }
    }

    pub(super) fn handle_note_clear(&self) -> Dispatch {
        match self.notes.clear() {
            Ok(()) => Dispatch::served(
                ResponseEnvelope::message("All notes have been cleared!")
                    .with_action(Action::NotesCleared),
            ),
            Err(err) => {
                error!("event=note_clear module=engine status=error error={err}");
                Dispatch::degraded(
                    DegradeReason::StorageFailure,
                    ResponseEnvelope::message("I couldn't clear your notes right now."),
                )
            }
        }
    }

    pub(super) fn handle_greeting(&self) -> Dispatch {
        let name = self.config.snapshot().assistant_name;
        let hour = self.clock.now().hour();
        let greeting = if hour < 12 {
            "Good morning"
        } else if hour < 17 {
            "Good afternoon"
        } else {
            "Good evening"
        };
        let choices = [
            format!("{greeting}! I'm {name}. How can I assist you today?"),
            format!("Hey there! {greeting}! What can I do for you?"),
            format!("{greeting}! Ready to help."),
            format!("Namaste! {greeting}! How may I help you?"),
        ];
        let reply = choices
            .choose(&mut rand::thread_rng())
            .unwrap_or(&choices[0])
            .clone();
        Dispatch::served(ResponseEnvelope::message(reply))
    }

    pub(super) fn handle_how_are_you(&self) -> Dispatch {
        let reply = pick(&[
            "I'm doing great, thank you! Always ready to help you.",
            "I'm wonderful! Thanks for asking. What can I do for you?",
            "I'm feeling fantastic! Ready for your commands.",
        ]);
        Dispatch::served(ResponseEnvelope::message(reply))
    }

    pub(super) fn handle_capabilities(&self) -> Dispatch {
        Dispatch::served(ResponseEnvelope::message(
            "I can help you with many things: check the weather, tell the time and date, \
             search the web, play music, open websites like YouTube or GitHub, open system \
             apps, do calculations, take and manage notes, look up information, and tell jokes.",
        ))
    }

    pub(super) fn handle_joke(&self) -> Dispatch {
        let reply = pick(&[
            "Why do programmers prefer dark mode? Because light attracts bugs!",
            "Why was the JavaScript developer sad? Because he didn't Node how to Express himself!",
            "What's a computer's favorite snack? Microchips!",
            "Why did the developer go broke? Because he used up all his cache!",
            "Why do Java developers wear glasses? Because they can't C#!",
            "How do trees access the internet? They log in!",
        ]);
        Dispatch::served(ResponseEnvelope::message(reply))
    }

    pub(super) fn handle_creator(&self) -> Dispatch {
        let name = self.config.snapshot().assistant_name;
        Dispatch::served(ResponseEnvelope::message(format!(
            "I was built as a voice assistant project. I'm {name}, here to help you."
        )))
    }

    pub(super) fn handle_name(&self) -> Dispatch {
        let name = self.config.snapshot().assistant_name;
        Dispatch::served(ResponseEnvelope::message(format!(
            "My name is {name}! I'm your personal assistant."
        )))
    }

    pub(super) fn handle_thanks(&self) -> Dispatch {
        let reply = pick(&[
            "You're welcome! Always happy to help.",
            "Glad I could help! Let me know if you need anything else.",
            "My pleasure! That's what I'm here for.",
        ]);
        Dispatch::served(ResponseEnvelope::message(reply))
    }

    pub(super) fn handle_farewell(&self) -> Dispatch {
        Dispatch::served(ResponseEnvelope::message(
            "Goodbye! Have a wonderful day! See you soon!",
        ))
    }

    pub(super) fn handle_knowledge(&self, text: &str) -> Dispatch {
        let topic = extract::knowledge_topic(text);
        if topic.is_empty() {
            return Dispatch::degraded(
                DegradeReason::ClarificationNeeded,
                ResponseEnvelope::message("What would you like to know about?"),
            );
        }

        let Some(provider) = self.knowledge.as_deref() else {
            return Dispatch::degraded(
                DegradeReason::DependencyUnavailable,
                search_envelope("Let me search that for you online.", &topic),
            );
        };

        match provider.summarize(&topic, KNOWLEDGE_SENTENCES) {
            Ok(summary) => {
                let truncated: String = summary.chars().take(KNOWLEDGE_MAX_CHARS).collect();
                let text = if truncated.len() < summary.len() {
                    format!("{truncated}...")
                } else {
                    truncated
                };
                Dispatch::served(ResponseEnvelope::message(text))
            }
            Err(KnowledgeError::Disambiguation(options)) => {
                let shortlist = options
                    .iter()
                    .take(5)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Dispatch::degraded(
                    DegradeReason::AmbiguousTopic,
                    ResponseEnvelope::message(format!(
                        "\"{topic}\" could refer to multiple topics: {shortlist}. \
                         Please be more specific."
                    )),
                )
            }
            Err(KnowledgeError::NotFound) => Dispatch::degraded(
                DegradeReason::NotFound,
                search_envelope(
                    format!(
                        "I couldn't find an article for \"{topic}\". I've searched the web instead."
                    ),
                    &topic,
                ),
            ),
            Err(KnowledgeError::Provider(err)) => {
                error!("event=knowledge_lookup module=engine status=error error={err}");
                Dispatch::degraded(
                    DegradeReason::TransportFailure,
                    search_envelope("Let me search that for you online.", &topic),
                )
            }
        }
    }

    pub(super) fn handle_system_info(&self) -> Dispatch {
        Dispatch::served(ResponseEnvelope::message(format!(
            "You're running {} on {} ({} family).",
            std::env::consts::OS,
            std::env::consts::ARCH,
            std::env::consts::FAMILY
        )))
    }

    pub(super) fn handle_fallback_search(&self, text: &str) -> Dispatch {
        Dispatch::served(search_envelope(
            "I'm not sure about that, so I've prepared a web search for you!",
            text,
        ))
    }
}
