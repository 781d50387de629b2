//! CLI command handlers.

pub mod airports;
pub mod init;
pub mod run;
pub mod traffic;
