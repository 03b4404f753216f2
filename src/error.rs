use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// The error type for everything that spawns `adb` or the analysis tool.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    /// Non-zero exit of an operation that raises. The message is the joined
    /// stderr of the child, unmodified.
    #[error("{message}")]
    CommandFailed { message: String },

    #[error("Failed to decode tool output: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error(
        "Android SDK not found. Set ANDROID_HOME or ANDROID_SDK_ROOT, or install the SDK in its default location."
    )]
    SdkNotFound,

    #[error("I/O error while talking to a child process: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BridgeError {
    pub fn command_failed(stderr: &[String]) -> Self {
        BridgeError::CommandFailed {
            message: stderr.join("\n"),
        }
    }

    /// True when the tool binary itself could not be found.
    pub fn is_tool_missing(&self) -> bool {
        matches!(
            self,
            BridgeError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
