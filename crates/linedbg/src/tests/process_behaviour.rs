//! Behavioural tests against a scripted debugger process.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::protocol::ProtocolEvent;
use crate::session::{DebugSession, SessionError};
use crate::supervisor::SupervisorError;
use crate::tests::support::{FakeDebugger, RecordingSink, SinkCall, pump_until};

/// Shared state exercised by the step implementations.
struct TestWorld {
    fake: Option<FakeDebugger>,
    session: Option<DebugSession<RecordingSink>>,
    previous_pid: Option<u32>,
}

impl TestWorld {
    fn session(&mut self) -> &mut DebugSession<RecordingSink> {
        self.session
            .as_mut()
            .expect("a session must be created by a Given step")
    }

    fn target(&self) -> String {
        self.fake
            .as_ref()
            .expect("a fake debugger must be created by a Given step")
            .target()
    }

    fn start(&mut self) {
        let target = self.target();
        self.previous_pid = self.session().pid();
        self.session()
            .start(&target, &[])
            .expect("fake debugger should start");
    }

    fn wait_for(&mut self, mut done: impl FnMut(&ProtocolEvent) -> bool) {
        let session = self.session();
        pump_until(session, |events| events.iter().any(&mut done));
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld {
        fake: None,
        session: None,
        previous_pid: None,
    })
}

// --- Given steps ---

#[given("a fake debugger with the target open")]
fn given_fake_debugger(world: &RefCell<TestWorld>) {
    let fake = FakeDebugger::new();
    let target = fake.target();
    let session = DebugSession::new(
        RecordingSink::with_documents([target.as_str()]),
        fake.session_config(),
    );
    let mut borrow = world.borrow_mut();
    borrow.fake = Some(fake);
    borrow.session = Some(session);
}

// --- When steps ---

#[when("the session starts")]
fn when_session_starts(world: &RefCell<TestWorld>) {
    world.borrow_mut().start();
}

#[when("the session starts again")]
fn when_session_restarts(world: &RefCell<TestWorld>) {
    world.borrow_mut().start();
}

#[when("a breakpoint is set on line {line}")]
fn when_breakpoint_set(world: &RefCell<TestWorld>, line: u32) {
    let mut borrow = world.borrow_mut();
    let target = borrow.target();
    borrow
        .session()
        .set_breakpoint(&target, line)
        .expect("break command should be written");
}

#[when("the breakpoint on line {line} is cleared")]
fn when_breakpoint_cleared(world: &RefCell<TestWorld>, line: u32) {
    let mut borrow = world.borrow_mut();
    let target = borrow.target();
    borrow
        .session()
        .clear_breakpoint_at(&target, line)
        .expect("a tracked breakpoint should be cleared");
}

#[when("the user steps")]
fn when_user_steps(world: &RefCell<TestWorld>) {
    world
        .borrow_mut()
        .session()
        .step()
        .expect("step command should be written");
}

#[when("the debugger is shut down")]
fn when_shut_down(world: &RefCell<TestWorld>) {
    world.borrow_mut().session().terminate();
}

// --- Then steps ---

#[then("the debugger stops at line {line}")]
fn then_stops_at(world: &RefCell<TestWorld>, line: u32) {
    let mut borrow = world.borrow_mut();
    let target = borrow.target();
    borrow.wait_for(|event| {
        matches!(
            event,
            ProtocolEvent::LineEvent { file, line: stopped } if *file == target && *stopped == line
        )
    });
    let sink = borrow.session().sink();
    assert_eq!(
        sink.calls.last(),
        Some(&SinkCall::SetLine(sink.document(&target), line))
    );
}

#[then("the debugger confirms breakpoint {index} on line {line}")]
fn then_confirms_breakpoint(world: &RefCell<TestWorld>, index: u32, line: u32) {
    let mut borrow = world.borrow_mut();
    let target = borrow.target();
    borrow.wait_for(|event| {
        matches!(
            event,
            ProtocolEvent::BreakpointAdded { index: added, line: at, .. }
                if *added == index && *at == line
        )
    });
    assert_eq!(borrow.session().registry().remove_at(&target, line), Ok(index));
}

#[then("the debugger confirms deleting breakpoint {index}")]
fn then_confirms_delete(world: &RefCell<TestWorld>, index: u32) {
    world.borrow_mut().wait_for(|event| {
        matches!(event, ProtocolEvent::BreakpointDeleted { index: deleted } if *deleted == index)
    });
}

#[then("the fake target is tagged {tag}")]
fn then_target_tagged(world: &RefCell<TestWorld>, tag: String) {
    let mut borrow = world.borrow_mut();
    let target = borrow.target();
    assert!(borrow.session().sink().has_tag(&target, &tag));
}

#[then("no breakpoints are tracked")]
fn then_no_breakpoints(world: &RefCell<TestWorld>) {
    let mut borrow = world.borrow_mut();
    let session = borrow.session();
    assert!(session.registry().is_empty());
    assert!(session.sink().tags.is_empty());
}

#[then("a different process is running")]
fn then_different_process(world: &RefCell<TestWorld>) {
    let mut borrow = world.borrow_mut();
    let previous = borrow.previous_pid.expect("a first process was started");
    let current = borrow.session().pid().expect("a process should be running");
    assert_ne!(previous, current);
}

#[then("no process is running")]
fn then_no_process(world: &RefCell<TestWorld>) {
    let mut borrow = world.borrow_mut();
    assert!(!borrow.session().is_running());
    assert_eq!(borrow.session().pid(), None);
}

#[then("the status reads {message}")]
fn then_status_reads(world: &RefCell<TestWorld>, message: String) {
    let mut borrow = world.borrow_mut();
    let expected = message.trim_matches('"');
    assert_eq!(borrow.session().sink().last_status(), Some(expected));
}

#[then("stepping fails because nothing is running")]
fn then_step_fails(world: &RefCell<TestWorld>) {
    let result = world.borrow_mut().session().step();
    assert!(
        matches!(
            result,
            Err(SessionError::Supervisor(SupervisorError::NotRunning))
        ),
        "expected NotRunning, got {result:?}"
    );
}

#[scenario(
    path = "tests/features/debugger_process.feature",
    name = "Starting stops on the first line of the target"
)]
fn start_stops_on_first_line(#[from(world)] _: RefCell<TestWorld>) {}

#[scenario(
    path = "tests/features/debugger_process.feature",
    name = "Breakpoints round-trip through the debugger"
)]
fn breakpoint_round_trip(#[from(world)] _: RefCell<TestWorld>) {}

#[scenario(
    path = "tests/features/debugger_process.feature",
    name = "Stepping moves the execution position"
)]
fn stepping_moves(#[from(world)] _: RefCell<TestWorld>) {}

#[scenario(
    path = "tests/features/debugger_process.feature",
    name = "Restarting replaces the running debugger"
)]
fn restart_replaces(#[from(world)] _: RefCell<TestWorld>) {}

#[scenario(
    path = "tests/features/debugger_process.feature",
    name = "Terminating stops the debugger"
)]
fn terminate_stops(#[from(world)] _: RefCell<TestWorld>) {}
