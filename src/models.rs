// JSON models shared with the IDE extension
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ANDROID_PLATFORM: &str = "android";

/// A device or emulator as reported by `--all-devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    pub name: String,
    #[serde(default)]
    pub serial: Option<String>, // None for AVDs that are not running
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub is_emulator: bool,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub is_mobile: bool,
}

impl DeviceData {
    pub fn android_device(serial: &str, name: String) -> Self {
        Self {
            name,
            serial: Some(serial.to_string()),
            detail: Some("Device".to_string()),
            platform: Some(ANDROID_PLATFORM.to_string()),
            is_emulator: false,
            is_running: true,
            is_mobile: true,
        }
    }

    pub fn android_emulator(serial: Option<&str>, name: String) -> Self {
        Self {
            name,
            serial: serial.map(str::to_string),
            detail: Some("Emulator".to_string()),
            platform: Some(ANDROID_PLATFORM.to_string()),
            is_emulator: true,
            is_running: serial.is_some(),
            is_mobile: true,
        }
    }
}

/// A project found by `--analyze-workspace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub frameworks: Vec<String>,
}
