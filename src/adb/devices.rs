// Parsing of `adb devices -l` and `emulator -list-avds` output
use regex::Regex;
use std::sync::LazyLock;

// adb pads the serial column with at least two whitespace characters, which is
// what keeps the "List of devices attached" header from matching.
static DEVICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<serial>\S+?)(\s+?)\s+(?P<state>\S+)").expect("device line pattern")
});

pub const EMULATOR_SERIAL_PREFIX: &str = "emulator-";

/// Serials of every line shaped like `<serial>  <state> ...`, in order.
/// Headers, blank lines and anything else are skipped.
pub fn parse_devices<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            DEVICE_LINE
                .captures(line.as_ref())
                .map(|caps| caps["serial"].to_string())
        })
        .collect()
}

pub fn is_emulator_serial(serial: &str) -> bool {
    serial.starts_with(EMULATOR_SERIAL_PREFIX)
}

/// AVD names from `emulator -list-avds`, skipping the emulator's own
/// `INFO | ...` chatter.
pub fn parse_avd_list<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty() && !line.starts_with("INFO"))
        .map(str::to_string)
        .collect()
}
