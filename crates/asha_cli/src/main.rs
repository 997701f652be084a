//! Interactive CLI probe.
//!
//! # Responsibility
//! - Feed stdin lines through the interpreter and print envelopes.
//! - Keep a minimal executable to verify `asha_core` wiring end to end.

use asha_core::db::open_db_in_memory;
use asha_core::{
    AssistantConfig, ConfigStore, Interpreter, NoteService, SqliteNoteRepository, SystemClock,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() {
    let config = Arc::new(ConfigStore::in_memory(AssistantConfig::default()));
    let clock = Arc::new(SystemClock);
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open note store: {err}");
            std::process::exit(1);
        }
    };
    let notes = Arc::new(NoteService::new(
        Box::new(SqliteNoteRepository::new(conn)),
        clock.clone(),
    ));
    let interpreter = Interpreter::new(config.clone(), notes, clock);

    let assistant = config.snapshot().assistant_name;
    println!("{assistant} command interpreter v{}", asha_core::core_version());
    println!("Type a command, or an empty line to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("stdin error: {err}");
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        let outcome = interpreter.interpret_detailed(line);
        println!("{}", outcome.envelope.text);
        if let Some(action) = outcome.envelope.action {
            println!("  [action: {}]", action.as_str());
        }
    }
    println!("Bye.");
}
