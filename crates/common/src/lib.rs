/**
 * The locked-file access flow.
 *  - Permission check, lock check, passcode challenge
 *  - Collaborator traits for the backend and the prompt
 */
pub mod access;
/**
 * File capability bits, lock state and user roles.
 */
pub mod permissions;
/**
 * Authenticated session context and the
 *  per-session passcode cache.
 */
pub mod session;
/**
 * In-memory collaborators for exercising the
 *  access flow without a backend or a terminal.
 */
pub mod testkit;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::access::{
        AccessController, AccessError, BackendError, Challenge, ChallengeNotice,
        ChallengeRequest, ChallengeResponse, FileContent, FileOperations, GuardedRequest,
        OperationOutput, PermissionFallback, PermissionQuery, PermissionQueryError,
    };
    pub use crate::build_info;
    pub use crate::permissions::{FileDescriptor, OperationKind, PermissionSet, Role};
    pub use crate::session::{Passcode, PasscodeCache, Session, User};
}
