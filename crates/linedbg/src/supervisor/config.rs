//! Launch description for the debugger process.

use std::path::PathBuf;

/// Command line and working directory of a debugger process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// The executable path or command name.
    pub program: PathBuf,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory for the spawned process.
    pub working_dir: Option<PathBuf>,
}

impl LaunchSpec {
    /// Runs `program` with `args` in the current directory.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    /// `<interpreter> -u -m <module> <target> [user_args]`.
    ///
    /// `-u` keeps the interpreter's output unbuffered so stop lines arrive as
    /// soon as they are printed.
    #[must_use]
    pub fn debugger(interpreter: &str, module: &str, target: &str, user_args: &[String]) -> Self {
        let mut args = vec![
            String::from("-u"),
            String::from("-m"),
            module.to_owned(),
            target.to_owned(),
        ];
        args.extend(user_args.iter().cloned());
        Self::new(interpreter, args)
    }

    /// Sets a custom working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}
