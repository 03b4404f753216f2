// ADB module - device bridge over the adb command line tool
// Each operation builds an argument list, runs adb through a
// `ProcessExecutor` and maps the captured output into its own return contract.

pub mod bridge;
pub mod devices;


pub use bridge::{ADB_ON_PATH, DeviceBridge};
pub use devices::{is_emulator_serial, parse_avd_list, parse_devices};
