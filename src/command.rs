//! Text commands understood by the drivers.
//!
//! One command per line: a verb and an optional repeat count, e.g. `f 3`
//! feeds three times, `a 10` advances ten ticks, `m anxious` forces the
//! mood. A missing count means once.

use crate::error::ParseError;
use crate::mood::{Action, Mood};
use crate::pet::Pet;
use crate::random::RandomSource;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Act(Action),
    Advance,
    Simulate,
    SetMood(Mood),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub times: u32,
}

impl Command {
    pub fn once(kind: CommandKind) -> Self {
        Self { kind, times: 1 }
    }

    /// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        line.parse().map(Some)
    }

    pub fn run<R: RandomSource>(&self, pet: &mut Pet<R>) {
        match self.kind {
            CommandKind::Act(action) => {
                for _ in 0..self.times {
                    pet.apply_action(action);
                }
            }
            CommandKind::Advance => {
                for _ in 0..self.times {
                    pet.tick();
                }
            }
            CommandKind::Simulate => simulate(pet, self.times),
            CommandKind::SetMood(mood) => pet.set_mood(mood),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| ParseError::UnknownCommand(String::new()))?;

        let kind = match verb.to_ascii_lowercase().as_str() {
            "a" | "advance" | "tick" => CommandKind::Advance,
            "x" | "simulate" => CommandKind::Simulate,
            "m" | "mood" => {
                let arg = tokens
                    .next()
                    .ok_or_else(|| ParseError::MissingArgument(verb.to_string()))?;
                reject_trailing(tokens)?;
                return Ok(Command::once(CommandKind::SetMood(arg.parse()?)));
            }
            _ => match verb.parse::<Action>() {
                Ok(action) => CommandKind::Act(action),
                Err(_) => return Err(ParseError::UnknownCommand(verb.to_string())),
            },
        };

        let times = match tokens.next() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidCount(raw.to_string()))?,
            None => 1,
        };
        reject_trailing(tokens)?;
        Ok(Command { kind, times })
    }
}

fn reject_trailing<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<(), ParseError> {
    match tokens.next() {
        Some(extra) => Err(ParseError::TrailingInput(extra.to_string())),
        None => Ok(()),
    }
}

/// Runs a fixed care routine for `steps` ticks: every step advances time,
/// and feed, play, clean and sleep fire every 5, 10, 15 and 20 steps.
pub fn simulate<R: RandomSource>(pet: &mut Pet<R>, steps: u32) {
    for i in 0..steps {
        pet.tick();
        if i % 5 == 0 {
            pet.apply_action(Action::Feed);
        }
        if i % 10 == 0 {
            pet.apply_action(Action::Play);
        }
        if i % 15 == 0 {
            pet.apply_action(Action::Clean);
        }
        if i % 20 == 0 {
            pet.apply_action(Action::Sleep);
        }
    }
}
