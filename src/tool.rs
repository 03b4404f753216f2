//! Client for the workspace analysis command line tool.
//!
//! The tool answers one flag per invocation with a JSON document on stdout.
//! A non-zero exit raises with the tool's stderr, and output that does not
//! decode into the expected model raises at the deserialization boundary.

use crate::error::{BridgeError, BridgeResult};
use crate::models::{DeviceData, Project};
use crate::process::{ArgumentBuilder, ProcessExecutor, SystemExecutor};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub struct ToolClient<E = SystemExecutor> {
    program: PathBuf,
    leading: ArgumentBuilder,
    executor: E,
}

impl ToolClient<SystemExecutor> {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::with_executor(program, ArgumentBuilder::new(), SystemExecutor)
    }

    /// A tool shipped as a managed assembly, run as `dotnet "<assembly>"`.
    pub fn dotnet(assembly: &Path) -> Self {
        Self::with_executor(
            "dotnet",
            ArgumentBuilder::new().append_quoted(assembly.to_string_lossy()),
            SystemExecutor,
        )
    }
}

impl<E: ProcessExecutor> ToolClient<E> {
    pub fn with_executor(program: impl Into<PathBuf>, leading: ArgumentBuilder, executor: E) -> Self {
        Self {
            program: program.into(),
            leading,
            executor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn args(&self) -> ArgumentBuilder {
        self.leading.clone()
    }

    async fn run<T: DeserializeOwned>(&self, args: ArgumentBuilder) -> BridgeResult<T> {
        let result = self.executor.wait_for_exit(&self.program, args, None).await?;
        if !result.success {
            return Err(BridgeError::command_failed(&result.stderr));
        }
        let payload = result.stdout_text();
        log::trace!("tool output: {payload}");
        Ok(serde_json::from_str(&payload)?)
    }

    pub async fn android_sdk_path(&self) -> BridgeResult<String> {
        self.run(self.args().append("--android-sdk-path")).await
    }

    pub async fn all_devices(&self) -> BridgeResult<Vec<DeviceData>> {
        self.run(self.args().append("--all-devices")).await
    }

    pub async fn analyze_workspace(&self, folders: &[PathBuf]) -> BridgeResult<Vec<Project>> {
        let args = self
            .args()
            .append("--analyze-workspace")
            .append_range_quoted(folders.iter().map(|f| f.to_string_lossy().into_owned()));
        self.run(args).await
    }

    pub async fn xaml_schema(&self, path: &Path) -> BridgeResult<bool> {
        let args = self
            .args()
            .append("--xaml")
            .append_quoted(path.to_string_lossy());
        self.run(args).await
    }

    pub async fn xaml_reload(&self, port: u16, path: &Path) -> BridgeResult<bool> {
        let args = self
            .args()
            .append("--xaml-reload")
            .append(port.to_string())
            .append_quoted(path.to_string_lossy());
        self.run(args).await
    }
}
