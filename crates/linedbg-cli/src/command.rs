//! Interactive commands typed at the terminal.

use linedbg::Location;
use thiserror::Error;

/// One line of operator input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    /// Restart the target with a fresh argument string.
    Run { args: String },
    Break(Location),
    TemporaryBreak(Location),
    ClearAt(Location),
    ClearAll,
    Step,
    Continue,
    Where,
    Args,
    Evaluate { expression: String },
    Execute { statement: String },
    Interrupt,
    /// Terminate the debugger but keep the terminal session.
    Quit,
    /// Terminate the debugger and leave.
    Exit,
}

/// Errors raised while parsing operator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CommandParseError {
    /// The command word is not recognised.
    #[error("unknown command: {input}")]
    Unknown { input: String },
    /// The command needs an argument that was not given.
    #[error("{command} needs an argument")]
    MissingArgument { command: String },
    /// The command takes no arguments but some were given.
    #[error("{command} takes no arguments")]
    UnexpectedArgument { command: String },
    /// A breakpoint location was not of the form `<file>:<line>`.
    #[error("expected <file>:<line>, got {input}")]
    InvalidLocation { input: String },
}

/// Parses one input line; blank lines yield `None`.
pub(crate) fn parse(input: &str) -> Result<Option<ReplCommand>, CommandParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(statement) = trimmed.strip_prefix('!') {
        let statement_text = required("!", statement.trim_start())?;
        return Ok(Some(ReplCommand::Execute {
            statement: statement_text.to_owned(),
        }));
    }

    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "run" | "r" => ReplCommand::Run {
            args: rest.to_owned(),
        },
        "b" | "break" => ReplCommand::Break(location(word, rest)?),
        "tb" | "tbreak" => ReplCommand::TemporaryBreak(location(word, rest)?),
        "cl" => ReplCommand::ClearAt(location(word, rest)?),
        "clear" if rest.is_empty() => ReplCommand::ClearAll,
        "clear" => ReplCommand::ClearAt(location(word, rest)?),
        "p" | "print" => ReplCommand::Evaluate {
            expression: required(word, rest)?.to_owned(),
        },
        _ => {
            let bare_command = bare(word)?;
            if !rest.is_empty() {
                return Err(CommandParseError::UnexpectedArgument {
                    command: word.to_owned(),
                });
            }
            bare_command
        }
    };

    Ok(Some(command))
}

fn bare(word: &str) -> Result<ReplCommand, CommandParseError> {
    Ok(match word {
        "s" | "step" => ReplCommand::Step,
        "c" | "continue" => ReplCommand::Continue,
        "w" | "where" => ReplCommand::Where,
        "a" | "args" => ReplCommand::Args,
        "int" | "interrupt" => ReplCommand::Interrupt,
        "q" | "quit" => ReplCommand::Quit,
        "exit" => ReplCommand::Exit,
        other => {
            return Err(CommandParseError::Unknown {
                input: other.to_owned(),
            });
        }
    })
}

fn required<'a>(command: &str, text: &'a str) -> Result<&'a str, CommandParseError> {
    if text.is_empty() {
        return Err(CommandParseError::MissingArgument {
            command: command.to_owned(),
        });
    }
    Ok(text)
}

fn location(command: &str, text: &str) -> Result<Location, CommandParseError> {
    let invalid = || CommandParseError::InvalidLocation {
        input: text.to_owned(),
    };
    let (file, line) = required(command, text)?
        .rsplit_once(':')
        .ok_or_else(invalid)?;
    let line_number = line
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(invalid)?;
    let file_name = file.trim();
    if file_name.is_empty() {
        return Err(invalid());
    }
    Ok(Location::new(file_name, line_number))
}
