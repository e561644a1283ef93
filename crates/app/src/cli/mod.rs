pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Bin, Files, Init, Login, Logout, Logs, Register, Shell, Sys, Version, Whoami};
