use super::devices::{is_emulator_serial, parse_avd_list, parse_devices};
use crate::error::{BridgeError, BridgeResult};
use crate::models::DeviceData;
use crate::process::{
    ArgumentBuilder, LiveProcess, ProcessExecutor, ProcessLogger, ProcessResult, SharedLogger,
    SystemExecutor,
};
use crate::sdk::AndroidSdk;
use std::path::{Path, PathBuf};

/// Used when no SDK can be located; resolved through `PATH`.
pub const ADB_ON_PATH: &str = "adb";

/// The adb capability surface for the IDE extension.
///
/// Every call spawns an independent adb process. Failure handling differs per
/// operation and is part of each method's contract:
///
/// * raising: `forward`, `install`, `devices`
/// * pass-through (stderr returned as text): `shell`, `device_name`, `launch`
/// * ignored: `uninstall`, `flush`, `emulator_name` (returns "")
pub struct DeviceBridge<E = SystemExecutor> {
    adb: PathBuf,
    emulator: Option<PathBuf>,
    executor: E,
}

impl DeviceBridge<SystemExecutor> {
    pub fn new(adb: impl Into<PathBuf>) -> Self {
        Self::with_executor(adb, SystemExecutor)
    }

    pub fn from_sdk(sdk: &AndroidSdk) -> Self {
        Self::new(sdk.adb_tool()).with_emulator_tool(sdk.emulator_tool())
    }

    /// SDK tools when an SDK can be located, otherwise `adb` from `PATH`.
    pub fn from_env() -> Self {
        match AndroidSdk::locate() {
            Ok(sdk) => Self::from_sdk(&sdk),
            Err(e) => {
                log::warn!("{e} Falling back to '{ADB_ON_PATH}' on PATH.");
                Self::new(ADB_ON_PATH)
            }
        }
    }
}

impl<E: ProcessExecutor> DeviceBridge<E> {
    pub fn with_executor(adb: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            adb: adb.into(),
            emulator: None,
            executor,
        }
    }

    pub fn with_emulator_tool(mut self, emulator: impl Into<PathBuf>) -> Self {
        self.emulator = Some(emulator.into());
        self
    }

    pub fn adb_tool(&self) -> &Path {
        &self.adb
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn device_args(serial: &str) -> ArgumentBuilder {
        ArgumentBuilder::new().append_pair("-s", serial)
    }

    async fn adb(
        &self,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<ProcessResult> {
        self.executor.wait_for_exit(&self.adb, args, logger).await
    }

    /// Run a shell command on the device.
    ///
    /// On failure the joined stderr is returned as if it were output, so
    /// callers cannot tell the two apart from the value alone.
    pub async fn shell(&self, serial: &str, args: &[&str]) -> BridgeResult<String> {
        let args = Self::device_args(serial)
            .append("shell")
            .append_all(args.iter().copied());
        let result = self.adb(args, None).await?;
        if !result.success {
            log::debug!("adb shell on {serial} failed: {}", result.stderr_text());
            return Ok(result.stderr_text());
        }
        Ok(result.stdout_text())
    }

    /// Forward host `tcp:port` to device `tcp:port`.
    pub async fn forward(&self, serial: &str, port: u16) -> BridgeResult<String> {
        let args = Self::device_args(serial)
            .append("forward")
            .append(format!("tcp:{port}"))
            .append(format!("tcp:{port}"));
        let result = self.adb(args, None).await?;
        if !result.success {
            return Err(BridgeError::command_failed(&result.stderr));
        }
        Ok(result.stdout_text())
    }

    pub async fn install(
        &self,
        serial: &str,
        apk: &Path,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<()> {
        let args = Self::device_args(serial)
            .append("install")
            .append_quoted(apk.to_string_lossy());
        let result = self.adb(args, logger).await?;
        if !result.success {
            return Err(BridgeError::command_failed(&result.stderr));
        }
        Ok(())
    }

    /// Remove a package. A failed uninstall (e.g. not installed) is ignored.
    pub async fn uninstall(
        &self,
        serial: &str,
        package: &str,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<()> {
        let args = Self::device_args(serial).append("uninstall").append(package);
        let result = self.adb(args, logger).await?;
        if !result.success {
            log::debug!("uninstall of {package} on {serial} ignored: {}", result.stderr_text());
        }
        Ok(())
    }

    /// Start the app's launcher activity by injecting a single monkey event.
    pub async fn launch(
        &self,
        serial: &str,
        package: &str,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<()> {
        let output = self.shell(serial, &["monkey", "-p", package, "1"]).await?;
        if let Some(logger) = logger {
            logger.on_line(&output);
        }
        Ok(())
    }

    /// Serials of all attached devices and running emulators.
    pub async fn devices(&self) -> BridgeResult<Vec<String>> {
        let args = ArgumentBuilder::new().append("devices").append("-l");
        let result = self.adb(args, None).await?;
        if !result.success {
            return Err(BridgeError::command_failed(&result.stderr));
        }
        Ok(parse_devices(&result.stdout))
    }

    /// AVD name of an emulator. Physical devices make the command fail, which
    /// yields an empty string.
    pub async fn emulator_name(&self, serial: &str) -> BridgeResult<String> {
        let args = Self::device_args(serial).append_all(["emu", "avd", "name"]);
        let result = self.adb(args, None).await?;
        if !result.success {
            return Ok(String::new());
        }
        Ok(result.stdout.into_iter().next().unwrap_or_default())
    }

    pub async fn device_name(&self, serial: &str) -> BridgeResult<String> {
        self.shell(serial, &["getprop", "ro.product.model"]).await
    }

    /// Clear the device log buffer. Errors from adb are ignored.
    pub async fn flush(&self, serial: &str) -> BridgeResult<()> {
        let args = Self::device_args(serial).append("logcat").append("-c");
        let result = self.adb(args, None).await?;
        if !result.success {
            log::debug!("logcat -c on {serial} ignored: {}", result.stderr_text());
        }
        Ok(())
    }

    /// Start a tag-formatted logcat stream limited to `filter` on `buffer`.
    /// The caller owns the returned process and decides when to kill it.
    pub fn logcat(
        &self,
        serial: &str,
        buffer: &str,
        filter: &str,
        logger: SharedLogger,
    ) -> BridgeResult<LiveProcess> {
        let args = Self::device_args(serial)
            .append("logcat")
            .append_pair("-s", filter)
            .append_pair("-b", buffer)
            .append_pair("-v", "tag");
        self.executor.start(&self.adb, args, Some(logger))
    }

    /// Installed AVDs, running or not. Empty when the emulator tool is
    /// unknown, missing or fails.
    pub async fn avds(&self) -> BridgeResult<Vec<String>> {
        let Some(emulator) = &self.emulator else {
            return Ok(Vec::new());
        };
        let args = ArgumentBuilder::new().append("-list-avds");
        let result = match self.executor.wait_for_exit(emulator, args, None).await {
            Ok(result) => result,
            Err(e) if e.is_tool_missing() => {
                log::debug!("emulator tool not available: {e}");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        if !result.success {
            return Ok(Vec::new());
        }
        Ok(parse_avd_list(&result.stdout))
    }

    /// Running devices with display names, followed by AVDs that are not
    /// running.
    pub async fn all_devices(&self) -> BridgeResult<Vec<DeviceData>> {
        let mut devices = Vec::new();
        let mut running_avds = Vec::new();

        for serial in self.devices().await? {
            if is_emulator_serial(&serial) {
                let name = or_serial(self.emulator_name(&serial).await?, &serial);
                running_avds.push(name.clone());
                devices.push(DeviceData::android_emulator(Some(&serial), name));
            } else {
                let name = or_serial(self.device_name(&serial).await?, &serial);
                devices.push(DeviceData::android_device(&serial, name));
            }
        }

        for avd in self.avds().await? {
            if !running_avds.contains(&avd) {
                devices.push(DeviceData::android_emulator(None, avd));
            }
        }
        Ok(devices)
    }
}

fn or_serial(name: String, serial: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        serial.to_string()
    } else {
        trimmed.to_string()
    }
}
