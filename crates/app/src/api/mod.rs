pub mod auth;
pub mod client;
pub mod files;
pub mod logs;
pub mod recycle_bin;
pub mod system;
