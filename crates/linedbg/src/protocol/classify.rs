//! Recognises the output shapes printed by `pdb`-style debuggers.

use super::ProtocolEvent;

/// Prompt the debugger prints before reading a command.
///
/// The prompt has no trailing newline, so it usually prefixes the next line
/// of output.
pub const PROMPT: &str = "(Pdb) ";

/// Confirmation question printed by `clear` with no arguments. The answer is
/// read on the same line, so the first deletion report follows it directly.
pub const CLEAR_ALL_PROMPT: &str = "Clear all breaks? ";

/// Classifies one decoded line.
///
/// Prompt prefixes, including the clear-all confirmation, and a trailing
/// carriage return are ignored while matching. A line that matches nothing
/// becomes [`ProtocolEvent::RawOutput`] carrying `line` unchanged.
#[must_use]
pub fn classify(line: &str) -> ProtocolEvent {
    let body = strip_prompts(line.strip_suffix('\r').unwrap_or(line));

    parse_stop(body)
        .or_else(|| parse_breakpoint_added(body))
        .or_else(|| parse_breakpoint_deleted(body))
        .unwrap_or_else(|| ProtocolEvent::RawOutput {
            text: line.to_owned(),
        })
}

fn strip_prompts(mut line: &str) -> &str {
    while let Some(rest) = line
        .strip_prefix(PROMPT)
        .or_else(|| line.strip_prefix(CLEAR_ALL_PROMPT))
    {
        line = rest;
    }
    line
}

/// `> /path/to/file.py(12)function()`, optionally followed by `->value`
/// when the frame is returning.
///
/// The first `(<line>)<scope>()` group whose tail is empty or a return value
/// marks the end of the file name, so parentheses in the path or in the
/// returned value's repr do not confuse the split.
fn parse_stop(line: &str) -> Option<ProtocolEvent> {
    let frame = line.strip_prefix("> ")?;
    frame.match_indices('(').find_map(|(open, _)| {
        let file = frame.get(..open)?;
        let (number, after) = frame.get(open + 1..)?.split_once(')')?;
        let parsed = parse_line_number(number)?;
        let (scope, tail) = after.split_once("()")?;
        let is_frame = !file.is_empty()
            && !scope.is_empty()
            && scope.chars().all(is_scope_char)
            && (tail.is_empty() || tail.starts_with("->"));
        is_frame.then(|| ProtocolEvent::LineEvent {
            file: file.to_owned(),
            line: parsed,
        })
    })
}

fn is_scope_char(character: char) -> bool {
    character.is_alphanumeric() || matches!(character, '_' | '<' | '>')
}

/// `Breakpoint 3 at /path/to/file.py:5`
fn parse_breakpoint_added(line: &str) -> Option<ProtocolEvent> {
    let rest = line.strip_prefix("Breakpoint ")?;
    let (index, target) = rest.split_once(" at ")?;
    let (file, number) = target.rsplit_once(':')?;
    if file.is_empty() {
        return None;
    }
    Some(ProtocolEvent::BreakpointAdded {
        index: index.parse().ok()?,
        file: file.to_owned(),
        line: parse_line_number(number)?,
    })
}

/// `Deleted breakpoint 3 at /path/to/file.py:5`
fn parse_breakpoint_deleted(line: &str) -> Option<ProtocolEvent> {
    let rest = line.strip_prefix("Deleted breakpoint ")?;
    let index = rest
        .split_once(' ')
        .map_or(rest, |(index, _)| index)
        .trim_end();
    Some(ProtocolEvent::BreakpointDeleted {
        index: index.parse().ok()?,
    })
}

fn parse_line_number(text: &str) -> Option<u32> {
    text.parse().ok().filter(|line| *line > 0)
}
