// Process module - argument building and child process execution
// Everything the bridge runs goes through `ProcessExecutor`, so tests can
// swap in canned results instead of spawning adb.

pub mod args;
pub mod executor;
pub mod logger;
pub mod runner;
pub mod types;

pub use args::ArgumentBuilder;
pub use executor::{ProcessExecutor, SystemExecutor};
pub use logger::{ProcessLogger, SharedLogger};
pub use runner::{LiveProcess, ProcessRunner};
pub use types::ProcessResult;

#[cfg(test)]
pub(crate) mod fake;
