pub mod create;
pub mod delete;
pub mod download;
pub mod list;
pub mod permissions;
pub mod read;
pub mod update;
pub mod upload;
