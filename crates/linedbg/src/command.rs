//! Debugger command vocabulary and its wire text.
//!
//! Every command is written as one or more lines, each terminated by
//! [`LINE_TERMINATOR`]. Nothing is correlated with the debugger's replies;
//! the reader recognises them by shape alone.

use std::fmt;

/// Terminator appended to every line written to the debugger.
pub const LINE_TERMINATOR: &str = "\r\n";

/// A user intent understood by the debugger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a breakpoint at `file:line`.
    Break {
        /// File to break in.
        file: String,
        /// 1-based line.
        line: u32,
    },
    /// Set a temporary breakpoint, removed once hit.
    TemporaryBreak {
        /// File to break in.
        file: String,
        /// 1-based line.
        line: u32,
    },
    /// Execute the current line, stopping at the first possible occasion.
    Step,
    /// Continue until a breakpoint is hit.
    Continue,
    /// Print the call stack.
    Where,
    /// Print the arguments of the current function.
    Args,
    /// Clear the breakpoint with the given index.
    Clear {
        /// Debugger-assigned breakpoint index.
        index: u32,
    },
    /// Clear every breakpoint, answering the confirmation prompt.
    ClearAll,
    /// Evaluate an expression in the current frame and print it.
    Evaluate {
        /// Expression text.
        expression: String,
    },
    /// Execute a statement in the current frame.
    Execute {
        /// Statement text.
        statement: String,
    },
}

impl Command {
    /// Lines written for this command, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Break { file, line } => vec![format!("break {file}:{line}")],
            Self::TemporaryBreak { file, line } => vec![format!("tbreak {file}:{line}")],
            Self::Step => vec![String::from("step")],
            Self::Continue => vec![String::from("continue")],
            Self::Where => vec![String::from("where")],
            Self::Args => vec![String::from("args")],
            Self::Clear { index } => vec![format!("clear {index}")],
            Self::ClearAll => vec![String::from("clear"), String::from("yes")],
            Self::Evaluate { expression } => vec![format!("print({})", rejoin(expression))],
            Self::Execute { statement } => vec![format!("!{}", rejoin(statement))],
        }
    }

    /// Full wire text, each line followed by [`LINE_TERMINATOR`].
    #[must_use]
    pub fn wire_text(&self) -> String {
        self.lines()
            .into_iter()
            .fold(String::new(), |mut text, line| {
                text.push_str(&line);
                text.push_str(LINE_TERMINATOR);
                text
            })
    }

    /// Short name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Break { .. } => "break",
            Self::TemporaryBreak { .. } => "tbreak",
            Self::Step => "step",
            Self::Continue => "continue",
            Self::Where => "where",
            Self::Args => "args",
            Self::Clear { .. } => "clear",
            Self::ClearAll => "clear_all",
            Self::Evaluate { .. } => "print",
            Self::Execute { .. } => "execute",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.lines().join(" / "))
    }
}

/// Normalises multi-line selections so every line break is `\r\n`.
fn rejoin(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(LINE_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Command::Break { file: String::from("/work/a.py"), line: 10 }, "break /work/a.py:10\r\n")]
    #[case(Command::TemporaryBreak { file: String::from("a.py"), line: 3 }, "tbreak a.py:3\r\n")]
    #[case(Command::Step, "step\r\n")]
    #[case(Command::Continue, "continue\r\n")]
    #[case(Command::Where, "where\r\n")]
    #[case(Command::Args, "args\r\n")]
    #[case(Command::Clear { index: 7 }, "clear 7\r\n")]
    #[case(Command::ClearAll, "clear\r\nyes\r\n")]
    #[case(Command::Evaluate { expression: String::from("x + 1") }, "print(x + 1)\r\n")]
    #[case(Command::Execute { statement: String::from("x = 2") }, "!x = 2\r\n")]
    fn commands_render_their_wire_text(#[case] command: Command, #[case] expected: &str) {
        assert_eq!(command.wire_text(), expected);
    }

    #[rstest]
    fn multi_line_selection_is_rejoined_with_crlf() {
        let command = Command::Execute {
            statement: String::from("for i in range(2):\n    print(i)\n"),
        };

        assert_eq!(
            command.wire_text(),
            "!for i in range(2):\r\n    print(i)\r\n"
        );
    }
}
