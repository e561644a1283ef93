/// In-memory collaborators for exercising the access flow
///
/// This module provides a fake file backend and a scripted passcode prompt so
/// the [`AccessController`](crate::access::AccessController) can be driven
/// end to end in-process, without a server or a terminal.
///
/// # Example
///
/// ```rust,ignore
/// use common::testkit::{FakeBackend, ScriptedChallenge};
///
/// #[tokio::test]
/// async fn test_unlock_once() {
///     let backend = FakeBackend::new();
///     backend.add_locked_file("secret.txt", "top secret", "9999");
///
///     let challenge = ScriptedChallenge::new(["9999"]);
///     let controller = testkit::controller(Role::User, &backend, &challenge);
///
///     controller.perform(GuardedRequest::View, "secret.txt").await.unwrap();
///     assert_eq!(challenge.prompt_count(), 1);
/// }
/// ```
mod backend;
mod challenge;

use std::sync::Arc;

pub use backend::{FakeBackend, FakeFile};
pub use challenge::ScriptedChallenge;

use crate::access::AccessController;
use crate::permissions::Role;
use crate::session::{Session, User};

/// A fresh session for a user with `role`.
pub fn session(role: Role) -> Arc<Session> {
    let user = User {
        id: 1,
        username: format!("test-{}", role),
        email: None,
        role,
    };
    Arc::new(Session::begin(user, "test-token"))
}

/// Wire a controller to the fakes, with a new session for `role`.
pub fn controller(
    role: Role,
    backend: &Arc<FakeBackend>,
    challenge: &Arc<ScriptedChallenge>,
) -> AccessController {
    controller_for(session(role), backend, challenge)
}

pub fn controller_for(
    session: Arc<Session>,
    backend: &Arc<FakeBackend>,
    challenge: &Arc<ScriptedChallenge>,
) -> AccessController {
    AccessController::new(
        session,
        backend.clone(),
        backend.clone(),
        challenge.clone(),
    )
}
