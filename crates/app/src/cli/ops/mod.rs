pub mod bin;
pub mod files;
pub mod init;
pub mod login;
pub mod logout;
pub mod logs;
pub mod register;
pub mod shell;
pub mod sys;
pub mod version;
pub mod whoami;

pub use bin::Bin;
pub use files::Files;
pub use init::Init;
pub use login::Login;
pub use logout::Logout;
pub use logs::Logs;
pub use register::Register;
pub use shell::Shell;
pub use sys::Sys;
pub use version::Version;
pub use whoami::Whoami;
