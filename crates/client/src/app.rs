//! Line-driven game loop over a [`GameSession`].
use std::io::{self, BufRead, Write};

use anyhow::Result;
use casebook_runtime::{FileStateRepository, GameSession, RuntimeError};

use crate::command::{Command, HELP};
use crate::presentation::{self, Narrator};

pub struct CliApp {
    session: GameSession,
    saves: FileStateRepository,
}

/// Whether the loop keeps reading input.
enum Flow {
    Continue,
    Quit,
}

impl CliApp {
    pub fn new(mut session: GameSession, saves: FileStateRepository) -> Self {
        session.subscribe_all(Narrator);
        Self { session, saves }
    }

    pub fn run(mut self) -> Result<()> {
        println!("Day {}. Type 'help' for commands.", self.session.day());
        if let Some(news) = self.session.news_dialog_for_today() {
            println!("Today's news is on ('news', dialog {news}).");
        }

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };

            match self.execute(command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => report(&err),
            }

            // Follow-ups start here, and observers print what happened
            self.session.tick();
            if self.session.is_in_dialog() {
                presentation::print_options(&self.session);
            }
        }

        tracing::info!("Session finished on day {}", self.session.day());
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<Flow, RuntimeError> {
        match command {
            Command::Start(id) => self.session.start_dialog(&id)?,
            Command::Select(index) => self.session.select_option(index)?,
            Command::End => {
                if !self.session.end_dialog() {
                    println!("Not in a dialog.");
                }
            }
            Command::Look => presentation::print_current(&self.session),
            Command::Clues => presentation::print_clues(&self.session),
            Command::Connect(first, second) => {
                self.session.discover_connection(&first, &second)?;
            }
            Command::Suspects => presentation::print_suspects(&self.session),
            Command::Eliminate => {
                self.session.eliminate_caught_suspect()?;
            }
            Command::Exit => {
                if self.session.exit_house()?.is_none() {
                    println!("Nothing planned outside today.");
                }
            }
            Command::News => {
                if self.session.start_todays_news()?.is_none() {
                    println!("No news today.");
                }
            }
            Command::Save(slot) => {
                self.session.save(&self.saves, &slot)?;
                println!("Saved to '{slot}'.");
            }
            Command::Load(slot) => {
                self.session.load(&self.saves, &slot)?;
                println!("Loaded '{slot}'. Day {}.", self.session.day());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

fn report(err: &RuntimeError) {
    if err.is_internal() {
        tracing::warn!("Command failed on case content: {err:?}");
    } else {
        tracing::debug!("Command failed: {err:?}");
    }
    match err.kind() {
        Some(kind) => println!("! {err} ({kind})"),
        None => println!("! {err}"),
    }
}
