// tests/supervisor.rs

mod common;
use crate::common::{fast_options, init_tracing, FakeActivator, ScriptedChild};

use neovide_start::activation::ActivationResult;
use neovide_start::supervise::{Outcome, Supervisor, SupervisorOptions};
use neovide_start::types::WaitStatus;

const PID: u32 = 4242;

#[tokio::test]
async fn early_failure_without_activation_is_reported() {
    init_tracing();

    let mut child = ScriptedChild::new(PID).exits_on_poll(1, WaitStatus::Exited(3));
    let mut activator = FakeActivator::new([ActivationResult::Declined]);

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::Failed(WaitStatus::Exited(3)));
    assert_eq!(child.log().polls, 2);
    assert_eq!(child.log().blocking_waits, 0);
    // Asked on both attempts before the child exited.
    assert_eq!(activator.log().activated, vec![PID, PID]);
}

#[tokio::test]
async fn activated_supervised_child_is_waited_for() {
    init_tracing();

    let mut child = ScriptedChild::new(PID).wait_returns(WaitStatus::Exited(0));
    let mut activator = FakeActivator::new([ActivationResult::Activated]);

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(child.log().polls, 0);
    assert_eq!(child.log().blocking_waits, 1);
}

#[tokio::test]
async fn blocking_wait_surfaces_signal() {
    init_tracing();

    let mut child = ScriptedChild::new(PID).wait_returns(WaitStatus::Signaled(11));
    let mut activator = FakeActivator::new([ActivationResult::Activated]);

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::Failed(WaitStatus::Signaled(11)));
}

#[tokio::test]
async fn detached_child_is_only_polled() {
    init_tracing();

    let mut child = ScriptedChild::new(PID);
    let mut activator = FakeActivator::new([ActivationResult::Activated]);

    let outcome = Supervisor::new(fast_options(), true)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::StillRunning);
    assert_eq!(child.log().polls, 5);
    assert_eq!(child.log().blocking_waits, 0);
    // Activated on the first attempt; never asked again.
    assert_eq!(activator.log().activated, vec![PID]);
}

#[tokio::test]
async fn activation_is_retried_until_process_is_found() {
    init_tracing();

    let mut child = ScriptedChild::new(PID);
    let mut activator = FakeActivator::new([
        ActivationResult::ProcessNotFound,
        ActivationResult::ProcessNotFound,
        ActivationResult::Activated,
    ]);

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(activator.log().activated.len(), 3);
    assert_eq!(child.log().polls, 2);
    assert_eq!(child.log().blocking_waits, 1);
}

#[tokio::test]
async fn declined_activation_is_asked_again() {
    init_tracing();

    let mut child = ScriptedChild::new(PID).wait_returns(WaitStatus::Exited(0));
    let mut activator = FakeActivator::new([
        ActivationResult::Declined,
        ActivationResult::Activated,
    ]);

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    // Declined on attempt 1, activated on attempt 2, then waited for.
    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(activator.log().activated, vec![PID, PID]);
    assert_eq!(child.log().polls, 1);
    assert_eq!(child.log().blocking_waits, 1);
}

#[tokio::test]
async fn activation_asked_every_attempt_until_it_succeeds() {
    init_tracing();

    let mut child = ScriptedChild::new(PID);
    let mut activator = FakeActivator::default();

    let outcome = Supervisor::new(fast_options(), false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::StillRunning);
    assert_eq!(activator.log().activated.len(), 5);
    assert_eq!(child.log().polls, 5);
    assert_eq!(child.log().blocking_waits, 0);
}

#[tokio::test]
async fn clean_exit_during_polling_ends_supervision() {
    init_tracing();

    let mut child = ScriptedChild::new(PID).exits_on_poll(0, WaitStatus::Exited(0));
    let mut activator = FakeActivator::default();

    let outcome = Supervisor::new(fast_options(), true)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::Clean);
    assert_eq!(child.log().polls, 1);
}

#[tokio::test]
async fn zero_attempts_leaves_child_alone() {
    let mut child = ScriptedChild::new(PID);
    let mut activator = FakeActivator::default();
    let options = SupervisorOptions {
        attempts: 0,
        ..fast_options()
    };

    let outcome = Supervisor::new(options, false)
        .supervise(&mut child, &mut activator)
        .await;

    assert_eq!(outcome, Outcome::StillRunning);
    assert_eq!(child.log().polls, 0);
    assert!(activator.log().activated.is_empty());
}
