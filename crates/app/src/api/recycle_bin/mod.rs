pub mod empty;
pub mod list;
pub mod purge;
pub mod restore;
