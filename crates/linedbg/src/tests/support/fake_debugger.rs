//! A scripted stand-in for `pdb` driven through `sh`.
//!
//! Sessions launch `<interpreter> -u -m <module> <target>`. With `env` as the
//! interpreter, `-u -m` merely unsets a variable named `-m`, `sh` takes the
//! module's place, and the target is the script itself. The script is read
//! by `sh` rather than executed, which avoids exec races with concurrently
//! forking tests.

use std::fs;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use crate::protocol::ProtocolEvent;
use crate::session::{DebugSession, SessionConfig};
use crate::sink::DocumentSink;

const SCRIPT_NAME: &str = "fake_pdb.sh";

const SCRIPT: &str = r#"target="$0"
n=0
echo "> $target(1)<module>()"
printf '(Pdb) '
while IFS= read -r line; do
  case "$line" in
    "break "*|"tbreak "*)
      n=$((n + 1))
      echo "Breakpoint $n at ${line#* }"
      ;;
    "clear "*)
      echo "Deleted breakpoint ${line#clear }"
      ;;
    step*)
      echo "> $target(2)<module>()"
      ;;
    quit*)
      exit 0
      ;;
    *)
      echo "$line"
      ;;
  esac
  printf '(Pdb) '
done
"#;

/// Temporary directory holding the fake debugger script.
pub struct FakeDebugger {
    dir: TempDir,
}

impl FakeDebugger {
    /// Writes the script into a fresh temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join(SCRIPT_NAME), SCRIPT).expect("write fake debugger");
        Self { dir }
    }

    /// Session settings that launch the fake instead of `pdb`.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            interpreter: String::from("env"),
            debugger_module: String::from("sh"),
            ..SessionConfig::default()
        }
        .with_working_dir(self.dir.path())
    }

    /// Target to debug; the fake reports its stops in this file.
    pub fn target(&self) -> String {
        self.dir.path().join(SCRIPT_NAME).display().to_string()
    }
}

/// Pumps `session` until `done` holds for the events seen so far.
pub fn pump_until<S, F>(session: &mut DebugSession<S>, mut done: F) -> Vec<ProtocolEvent>
where
    S: DocumentSink,
    F: FnMut(&[ProtocolEvent]) -> bool,
{
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut events = Vec::new();
    loop {
        events.extend(session.pump());
        if done(&events) {
            return events;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for debugger output, saw {events:?}"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}
