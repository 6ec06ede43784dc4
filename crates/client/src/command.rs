//! Line commands typed at the prompt.
//!
//! Parsing is kept apart from execution so the mapping can be tested
//! without a session.

use casebook_core::{ClueId, DialogId};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  start <dialog>     start a dialog by id
  <n>                pick option n of the current node
  end                leave the current dialog
  look               show the current node again
  clues              list collected clues and discovered connections
  connect <a> <b>    link two collected clues
  suspects           list revealed suspects
  eliminate          get rid of the suspect in the basement
  exit               leave the house for the planned cutscene
  news               watch today's news
  save <slot>        save the case board
  load <slot>        load a saved case board
  help               show this help
  quit               leave the game";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start(DialogId),
    /// Zero-based option index.
    Select(usize),
    End,
    Look,
    Clues,
    Connect(ClueId, ClueId),
    Suspects,
    Eliminate,
    Exit,
    News,
    Save(String),
    Load(String),
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or 'help'")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("options are numbered from 1")]
    OptionZero,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        if let Ok(number) = head.parse::<usize>() {
            return match number.checked_sub(1) {
                Some(index) if args.is_empty() => Ok(Self::Select(index)),
                Some(_) => Err(ParseError::Arguments {
                    command: "<n>",
                    expected: "no arguments",
                }),
                None => Err(ParseError::OptionZero),
            };
        }

        let command = match head.to_ascii_lowercase().as_str() {
            "start" => match args.as_slice() {
                [id] => Self::Start(DialogId::from(*id)),
                _ => {
                    return Err(ParseError::Arguments {
                        command: "start",
                        expected: "one dialog id",
                    });
                }
            },
            "connect" => match args.as_slice() {
                [first, second] => Self::Connect(ClueId::from(*first), ClueId::from(*second)),
                _ => {
                    return Err(ParseError::Arguments {
                        command: "connect",
                        expected: "two clue ids",
                    });
                }
            },
            "save" | "load" => match args.as_slice() {
                [slot] if head.eq_ignore_ascii_case("save") => Self::Save((*slot).to_owned()),
                [slot] => Self::Load((*slot).to_owned()),
                _ => {
                    return Err(ParseError::Arguments {
                        command: if head.eq_ignore_ascii_case("save") {
                            "save"
                        } else {
                            "load"
                        },
                        expected: "one slot name",
                    });
                }
            },
            "end" => Self::End,
            "look" => Self::Look,
            "clues" => Self::Clues,
            "suspects" => Self::Suspects,
            "eliminate" => Self::Eliminate,
            "exit" => Self::Exit,
            "news" => Self::News,
            "help" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => return Err(ParseError::Unknown(head.to_owned())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_select_one_based_options() {
        assert_eq!(Command::parse("1"), Ok(Command::Select(0)));
        assert_eq!(Command::parse("  3 "), Ok(Command::Select(2)));
        assert_eq!(Command::parse("0"), Err(ParseError::OptionZero));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            Command::parse("start news_1"),
            Ok(Command::Start(DialogId::from("news_1")))
        );
        assert_eq!(
            Command::parse("connect 3 4"),
            Ok(Command::Connect(ClueId::from("3"), ClueId::from("4")))
        );
        assert_eq!(
            Command::parse("SAVE morning"),
            Ok(Command::Save("morning".to_owned()))
        );
        assert_eq!(
            Command::parse("load morning"),
            Ok(Command::Load("morning".to_owned()))
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert!(matches!(
            Command::parse("connect 3"),
            Err(ParseError::Arguments {
                command: "connect",
                ..
            })
        ));
        assert!(matches!(
            Command::parse("load"),
            Err(ParseError::Arguments { command: "load", .. })
        ));
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::Unknown("dance".to_owned()))
        );
    }

    #[test]
    fn single_word_commands() {
        assert_eq!(Command::parse("end"), Ok(Command::End));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("exit"), Ok(Command::Exit));
        assert_eq!(Command::parse("news"), Ok(Command::News));
    }
}
