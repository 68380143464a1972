use crate::render::status_line;
use anyhow::Result;
use moodpet::{Command, Pet, RandomSource};
use std::io::{BufRead, Write};
use tracing::warn;

/// Line-oriented driver: one command per input line, one status report per
/// applied command. Bad lines are reported and skipped.
pub(crate) fn run<R, I, O>(pet: &mut Pet<R>, input: I, mut out: O, json: bool) -> Result<()>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let command = match Command::parse_line(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = lineno + 1, %err, "skipping command");
                if json {
                    writeln!(out, "{}", serde_json::json!({ "error": err.to_string() }))?;
                } else {
                    writeln!(out, "error: {err}")?;
                }
                continue;
            }
        };

        command.run(pet);
        let health = pet.health();
        if json {
            writeln!(out, "{}", serde_json::to_string(&health)?)?;
        } else {
            writeln!(out, "{}", status_line(&health))?;
        }
    }
    out.flush()?;
    Ok(())
}
