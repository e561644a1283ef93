pub mod allowed;
pub mod execute;
pub mod history;
pub mod stats;
