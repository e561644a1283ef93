//! Shared test utilities for access flow integration tests
#![allow(dead_code)]

use std::sync::Arc;

use common::access::{AccessController, ChallengeResponse};
use common::permissions::{PermissionSet, Role};
use common::session::Session;
use common::testkit::{self, FakeBackend, ScriptedChallenge};

pub struct TestEnv {
    pub backend: Arc<FakeBackend>,
    pub challenge: Arc<ScriptedChallenge>,
    pub session: Arc<Session>,
    pub controller: AccessController,
}

/// Set up a controller for `role` whose prompt answers with `answers`.
pub fn setup_test_env(role: Role, answers: &[&str]) -> TestEnv {
    setup_with_challenge(
        role,
        ScriptedChallenge::new(answers.iter().map(|a| a.to_string())),
    )
}

pub fn setup_with_responses(role: Role, responses: Vec<ChallengeResponse>) -> TestEnv {
    setup_with_challenge(role, ScriptedChallenge::with_responses(responses))
}

/// Route controller logs to the test harness; filter with RUST_LOG.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup_with_challenge(role: Role, challenge: Arc<ScriptedChallenge>) -> TestEnv {
    init_tracing();
    let backend = FakeBackend::new();
    let session = testkit::session(role);
    challenge.watch(session.clone());
    let controller = testkit::controller_for(session.clone(), &backend, &challenge);

    TestEnv {
        backend,
        challenge,
        session,
        controller,
    }
}

/// Permissions that allow every operation for a regular user.
pub fn open_permissions() -> PermissionSet {
    PermissionSet::explicit(true, true, true, true)
}
