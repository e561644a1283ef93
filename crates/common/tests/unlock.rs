//! Integration tests for the passcode challenge and the session passcode cache

mod common;

use std::sync::Arc;

use ::common::access::{
    AccessController, AccessError, ChallengeNotice, ChallengeResponse, GuardedRequest,
    OperationOutput, PermissionQuery, PermissionQueryError,
};
use ::common::permissions::{OperationKind, PermissionSet, Role};
use ::common::session::Passcode;

#[tokio::test]
async fn test_unlocked_file_is_never_challenged() {
    let env = common::setup_test_env(Role::User, &["1234"]);
    env.backend
        .add_file("plain.txt", "hello", common::open_permissions());
    // a cache entry must not matter for an unlocked file
    env.session
        .passcodes()
        .remember("plain.txt", Passcode::new("1234"));

    let output = env
        .controller
        .perform(GuardedRequest::View, "plain.txt")
        .await
        .unwrap();

    assert!(matches!(output, OperationOutput::Viewed(_)));
    assert_eq!(env.challenge.prompt_count(), 0);
    assert_eq!(env.backend.passcodes_seen(), vec![None]);
}

#[tokio::test]
async fn test_wrong_then_right_passcode() {
    let env = common::setup_test_env(Role::User, &["0000", "9999"]);
    env.backend.add_locked_file("secret.txt", "classified", "9999");

    let output = env
        .controller
        .perform(GuardedRequest::View, "secret.txt")
        .await
        .unwrap();

    assert!(matches!(output, OperationOutput::Viewed(ref c) if c.content == "classified"));

    let prompts = env.challenge.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0].notice, None);
    assert_eq!(prompts[0].kind, OperationKind::View);
    assert_eq!(prompts[1].notice, Some(ChallengeNotice::IncorrectPasscode));

    // one backend attempt per submission
    assert_eq!(
        env.backend.passcodes_seen(),
        vec![Some("0000".to_string()), Some("9999".to_string())]
    );
    assert_eq!(
        env.session.passcodes().get("secret.txt"),
        Some(Passcode::new("9999"))
    );
}

/// Reports every file as unlocked, whatever the backend holds.
struct StaleUnlocked;

#[async_trait::async_trait]
impl PermissionQuery for StaleUnlocked {
    async fn permissions(&self, _file_name: &str) -> Result<PermissionSet, PermissionQueryError> {
        Ok(common::open_permissions())
    }
}

#[tokio::test]
async fn test_lock_added_after_permission_query_is_challenged() {
    let env = common::setup_test_env(Role::User, &["4242"]);
    env.backend.add_locked_file_with(
        "plan.txt",
        "phase two",
        "4242",
        common::open_permissions(),
    );
    let controller = AccessController::new(
        env.session.clone(),
        Arc::new(StaleUnlocked),
        env.backend.clone(),
        env.challenge.clone(),
    );

    let output = controller
        .perform(GuardedRequest::View, "plan.txt")
        .await
        .unwrap();

    assert!(matches!(output, OperationOutput::Viewed(ref c) if c.content == "phase two"));
    assert_eq!(env.challenge.prompt_count(), 1);
    assert_eq!(env.challenge.prompts()[0].notice, None);
    assert_eq!(
        env.backend.passcodes_seen(),
        vec![None, Some("4242".to_string())]
    );
    assert_eq!(
        env.session.passcodes().get("plan.txt"),
        Some(Passcode::new("4242"))
    );
}

#[tokio::test]
async fn test_wrong_passcode_is_not_cached() {
    let env = common::setup_test_env(Role::User, &["0000"]);
    env.backend.add_locked_file("secret.txt", "classified", "9999");

    let result = env
        .controller
        .perform(GuardedRequest::View, "secret.txt")
        .await;

    // script ran out after the wrong answer, so the user dismissed the prompt
    assert_eq!(result, Err(AccessError::Cancelled));
    assert!(env.session.passcodes().get("secret.txt").is_none());
}

#[tokio::test]
async fn test_cached_passcode_is_reused() {
    let env = common::setup_test_env(Role::User, &["1234"]);
    env.backend.add_locked_file("report.enc", "q3 numbers", "1234");

    env.controller
        .perform(GuardedRequest::View, "report.enc")
        .await
        .unwrap();
    assert_eq!(env.challenge.prompt_count(), 1);

    let output = env
        .controller
        .perform(GuardedRequest::Download, "report.enc")
        .await
        .unwrap();

    assert!(matches!(output, OperationOutput::Downloaded(ref b) if &b[..] == b"q3 numbers"));
    assert_eq!(env.challenge.prompt_count(), 1);
    assert_eq!(
        env.backend.passcodes_seen(),
        vec![Some("1234".to_string()), Some("1234".to_string())]
    );
}

#[tokio::test]
async fn test_stale_cached_passcode_is_evicted_before_one_rechallenge() {
    let env = common::setup_test_env(Role::User, &["1234", "5678"]);
    env.backend.add_locked_file("report.enc", "q3 numbers", "1234");

    env.controller
        .perform(GuardedRequest::View, "report.enc")
        .await
        .unwrap();

    env.backend.rotate_passcode("report.enc", "5678");

    env.controller
        .perform(GuardedRequest::View, "report.enc")
        .await
        .unwrap();

    assert_eq!(env.challenge.prompt_count(), 2);
    // the second prompt saw an empty cache entry for the file
    assert_eq!(
        env.challenge.cache_at_prompt(),
        vec![None, None]
    );
    assert_eq!(env.challenge.prompts()[1].notice, None);
    assert_eq!(
        env.session.passcodes().get("report.enc"),
        Some(Passcode::new("5678"))
    );
    assert_eq!(
        env.backend.passcodes_seen(),
        vec![
            Some("1234".to_string()),
            Some("1234".to_string()),
            Some("5678".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_cancel_has_no_side_effects() {
    let env = common::setup_test_env(Role::User, &[]);
    env.backend.add_locked_file_with(
        "secret.txt",
        "classified",
        "9999",
        common::open_permissions(),
    );

    let result = env
        .controller
        .perform(GuardedRequest::Delete, "secret.txt")
        .await;

    assert_eq!(result, Err(AccessError::Cancelled));
    assert_eq!(env.challenge.prompt_count(), 1);
    assert_eq!(env.backend.operation_calls(), 0);
    assert!(env.session.passcodes().is_empty());
    assert!(env.backend.file("secret.txt").is_some());
}

#[tokio::test]
async fn test_empty_submission_reprompts_without_backend_call() {
    let env = common::setup_with_responses(
        Role::User,
        vec![
            ChallengeResponse::Submitted(String::new()),
            ChallengeResponse::Submitted("9999".to_string()),
        ],
    );
    env.backend.add_locked_file("secret.txt", "classified", "9999");

    env.controller
        .perform(GuardedRequest::View, "secret.txt")
        .await
        .unwrap();

    let prompts = env.challenge.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[1].notice, Some(ChallengeNotice::PasscodeRequired));
    assert_eq!(env.backend.operation_calls(), 1);
}

#[tokio::test]
async fn test_other_backend_errors_fail_without_rechallenge() {
    let env = common::setup_test_env(Role::User, &["9999", "9999"]);
    env.backend.add_locked_file("secret.txt", "classified", "9999");
    env.backend.fail_operations("disk full");

    let result = env
        .controller
        .perform(GuardedRequest::View, "secret.txt")
        .await;

    assert_eq!(result, Err(AccessError::Failed("disk full".to_string())));
    assert!(result.unwrap_err().is_backend_failure());
    assert_eq!(env.challenge.prompt_count(), 1);
    assert!(env.session.passcodes().is_empty());
}

#[tokio::test]
async fn test_edit_with_passcode_updates_content() {
    let env = common::setup_test_env(Role::Admin, &["9999"]);
    env.backend.add_locked_file("secret.txt", "old", "9999");

    let output = env
        .controller
        .perform(
            GuardedRequest::Edit {
                content: "new".to_string(),
            },
            "secret.txt",
        )
        .await
        .unwrap();

    assert_eq!(output, OperationOutput::Edited);
    assert_eq!(env.backend.file("secret.txt").unwrap().content, "new");
}

#[tokio::test]
async fn test_session_end_forgets_passcodes() {
    let env = common::setup_test_env(Role::User, &["1234", "1234"]);
    env.backend.add_locked_file("report.enc", "q3 numbers", "1234");

    env.controller
        .perform(GuardedRequest::View, "report.enc")
        .await
        .unwrap();
    env.session.end();

    env.controller
        .perform(GuardedRequest::View, "report.enc")
        .await
        .unwrap();
    assert_eq!(env.challenge.prompt_count(), 2);
}
