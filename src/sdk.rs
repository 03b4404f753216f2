use crate::error::{BridgeError, BridgeResult};
use std::env::consts::EXE_SUFFIX;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variables checked, in order, before the default install
/// location.
pub const SDK_ENV_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// An Android SDK installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidSdk {
    root: PathBuf,
}

impl AndroidSdk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the SDK from the process environment and the home directory.
    pub fn locate() -> BridgeResult<Self> {
        let home = homedir::my_home().ok().flatten();
        Self::locate_with(|key| std::env::var_os(key), home.as_deref())
    }

    /// First existing directory among the candidates built from `env` and
    /// `home`.
    pub fn locate_with<F>(env: F, home: Option<&Path>) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let found = candidates(&env, home).into_iter().find(|path| path.is_dir());
        match found {
            Some(root) => {
                log::debug!("Android SDK at {}", root.display());
                Ok(Self::new(root))
            }
            None => Err(BridgeError::SdkNotFound),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn adb_tool(&self) -> PathBuf {
        self.root
            .join("platform-tools")
            .join(format!("adb{EXE_SUFFIX}"))
    }

    pub fn emulator_tool(&self) -> PathBuf {
        self.root
            .join("emulator")
            .join(format!("emulator{EXE_SUFFIX}"))
    }
}

fn candidates<F>(env: &F, home: Option<&Path>) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut paths: Vec<PathBuf> = SDK_ENV_VARS
        .iter()
        .filter_map(|key| env(key))
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .collect();

    if cfg!(windows) {
        if let Some(local) = env("LOCALAPPDATA").filter(|v| !v.is_empty()) {
            paths.push(PathBuf::from(local).join("Android").join("Sdk"));
        } else if let Some(home) = home {
            paths.push(home.join("AppData").join("Local").join("Android").join("Sdk"));
        }
    } else if let Some(home) = home {
        if cfg!(target_os = "macos") {
            paths.push(home.join("Library").join("Android").join("sdk"));
        } else {
            paths.push(home.join("Android").join("Sdk"));
        }
    }
    paths
}
