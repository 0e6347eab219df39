// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io;
use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::Path;

use crate::config::Config;
use crate::deck::Deck;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::session::Session;
use crate::sm2::Quality;
use crate::store::FingerprintStore;
use crate::store::open_store;

const PROMPT: &str = "fc> ";

const HELP: &str = "Press Enter to show the answer, 0-5 to rate the card (0-2 forgotten, 3-5 remembered), q to quit.";

pub fn drill(config: &Config, file: &Path) -> Fallible<()> {
    let deck = Deck::load(file)?;
    let store = open_store(&config.data_dir, &deck.name, config.backend)?;
    let mut session = Session::new(deck.cards, store)?;
    let stdin = stdin();
    let mut stdout = stdout();
    run(&mut session, stdin.lock(), &mut stdout)
}

/// Drive a session from line-based input until the user quits or the input
/// ends.
pub fn run<S, R, W>(session: &mut Session<S>, input: R, output: &mut W) -> Fallible<()>
where
    S: FingerprintStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{HELP}")?;
    writeln!(output, "{}", session.current().question())?;
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                let e = ErrorReport::invalid_rating("input is not valid UTF-8.");
                writeln!(output, "{e}")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match line.trim() {
            "" => {
                writeln!(output, "{}", session.current().answer())?;
            }
            "q" | "quit" => {
                return Ok(());
            }
            "?" | "help" => {
                writeln!(output, "{HELP}")?;
            }
            command => match Quality::parse(command) {
                Ok(quality) => {
                    let record = session.rate(quality)?;
                    writeln!(
                        output,
                        "Easiness: {:.2}, Interval: {}, Repetitions: {}",
                        record.easiness, record.interval, record.repetitions
                    )?;
                    writeln!(output, "{}", session.current().question())?;
                }
                Err(e) if e.kind() == ErrorKind::InvalidRating => {
                    writeln!(output, "{e}")?;
                }
                Err(e) => {
                    return Err(e);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use super::*;
    use crate::store::Backend;
    use crate::store::memory::MemoryStore;
    use crate::types::card::Card;
    use crate::types::fingerprint::Fingerprint;

    fn run_script(session: &mut Session<MemoryStore>, script: &str) -> Fallible<String> {
        let mut output = Vec::new();
        run(session, Cursor::new(script.to_string()), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_reveal_and_rate() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4"), Card::new("3*3", "9")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        let output = run_script(&mut session, "\n4\nq\n")?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], HELP);
        assert_eq!(lines[1], "2+2");
        assert_eq!(lines[2], "fc> 4");
        assert_eq!(lines[3], "fc> Easiness: 2.50, Interval: 1, Repetitions: 1");
        assert_eq!(lines[4], "3*3");
        assert_eq!(lines[5], "fc> ");
        assert_eq!(session.current().question(), "3*3");
        Ok(())
    }

    #[test]
    fn test_invalid_rating_reprompts() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        let output = run_script(&mut session, "7\nabc\n")?;
        assert!(output.contains("error: rating 7 is out of range, expected 0 to 5."));
        assert!(output.contains("error: \"abc\" is not a rating, expected 0 to 5."));
        let store = session.into_store();
        assert!(store.all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_reprompts() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        let mut output = Vec::new();
        run(&mut session, Cursor::new(b"\xff\xfe\n4\n".to_vec()), &mut output)?;
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("error: input is not valid UTF-8."));
        assert!(output.contains("Easiness: 2.50, Interval: 1, Repetitions: 1"));
        assert_eq!(session.into_store().all()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_end_of_input_ends_session() -> Fallible<()> {
        let cards = vec![Card::new("2+2", "4")];
        let mut session = Session::new(cards, MemoryStore::new())?;
        let output = run_script(&mut session, "3\n3")?;
        assert!(output.contains("Easiness: 2.36, Interval: 1, Repetitions: 1"));
        assert!(output.contains("Easiness: 2.22, Interval: 6, Repetitions: 2"));
        assert!(output.ends_with("fc> \n"));
        Ok(())
    }

    #[test]
    fn test_drill_persists_between_sessions() -> Fallible<()> {
        let data_dir = tempdir()?;
        let config = Config {
            data_dir: data_dir.path().to_path_buf(),
            backend: Backend::Sqlite,
        };
        let file = PathBuf::from("./test/deck.md");
        for _ in 0..2 {
            let deck = Deck::load(&file)?;
            let store = open_store(&config.data_dir, &deck.name, config.backend)?;
            let mut session = Session::new(deck.cards, store)?;
            let mut output = Vec::new();
            run(&mut session, Cursor::new("5\n"), &mut output)?;
        }
        let store = open_store(&config.data_dir, "deck", config.backend)?;
        let records = store.all()?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fingerprint, Fingerprint::of("2+2", "4"));
        assert_eq!(records[1].fingerprint, Fingerprint::of("3*3", "9"));
        Ok(())
    }
}
