pub mod adb;
pub mod error;
pub mod models;
pub mod process;
pub mod sdk;
pub mod tool;

pub use adb::DeviceBridge;
pub use error::{BridgeError, BridgeResult};
pub use models::{DeviceData, Project};
pub use process::{ArgumentBuilder, LiveProcess, ProcessLogger, ProcessResult, ProcessRunner};
pub use sdk::AndroidSdk;
pub use tool::ToolClient;
