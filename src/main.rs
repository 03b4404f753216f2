mod args;

use android_device_bridge::{AndroidSdk, BridgeResult, DeviceBridge};
use args::{Args, Mode, Parsed};
use std::process::ExitCode;

fn init_logging(debug_mode: bool) {
    let default_level = if debug_mode { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn run(mode: Mode) -> BridgeResult<String> {
    match mode {
        Mode::AndroidSdkPath => {
            let sdk = AndroidSdk::locate()?;
            Ok(serde_json::to_string(&sdk.root())?)
        }
        Mode::AllDevices => {
            let bridge = DeviceBridge::from_env();
            let devices = bridge.all_devices().await?;
            Ok(serde_json::to_string(&devices)?)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::parse() {
        Parsed::Run(args) => args,
        Parsed::Exit(0) => return ExitCode::SUCCESS,
        Parsed::Exit(code) => return ExitCode::from(code as u8),
    };
    init_logging(args.debug_mode);

    match run(args.mode).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
