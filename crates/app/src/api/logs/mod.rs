pub mod list;
pub mod stats;
pub mod types;
