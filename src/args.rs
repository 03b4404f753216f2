use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    AndroidSdkPath,
    AllDevices,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub debug_mode: bool,
}

/// What the binary should do after parsing.
#[derive(Debug)]
pub enum Parsed {
    Run(Args),
    Exit(i32),
}

impl Args {
    pub fn parse() -> Parsed {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I, S>(args: I) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode: Option<Mode> = None;
        let mut debug_mode = false;

        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => {
                    print_help();
                    return Parsed::Exit(0);
                }
                "--version" | "-v" => {
                    println!(
                        "android-device-bridge v{} ({})",
                        env!("APP_VERSION_DISPLAY"),
                        env!("APP_BUILD_YEAR")
                    );
                    return Parsed::Exit(0);
                }
                "--debug" => debug_mode = true,
                "--android-sdk-path" => mode = Some(Mode::AndroidSdkPath),
                "--all-devices" => mode = Some(Mode::AllDevices),
                other => {
                    eprintln!("❌ Unknown argument: {other}");
                    print_help();
                    return Parsed::Exit(2);
                }
            }
        }

        match mode {
            Some(mode) => Parsed::Run(Args { mode, debug_mode }),
            None => {
                print_help();
                Parsed::Exit(2)
            }
        }
    }
}

fn print_help() {
    println!("🤖 Android Device Bridge");
    println!();
    println!("USAGE:");
    println!("    android-device-bridge [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --android-sdk-path  Print the Android SDK location as JSON");
    println!("    --all-devices       Print attached devices, emulators and AVDs as JSON");
    println!("    --debug             Log adb invocations to stderr");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("ENVIRONMENT:");
    println!("    ANDROID_HOME, ANDROID_SDK_ROOT  SDK location (checked before the default path)");
    println!("    RUST_LOG                        Log filter, e.g. 'android_device_bridge=debug'");
    println!();
    println!("EXAMPLES:");
    println!("    android-device-bridge --all-devices");
    println!("    android-device-bridge --android-sdk-path --debug");
}
