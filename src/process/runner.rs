use super::args::ArgumentBuilder;
use super::logger::{ProcessLogger, SharedLogger};
use super::types::ProcessResult;
use crate::error::{BridgeError, BridgeResult};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// One invocation of an external tool.
pub struct ProcessRunner {
    program: PathBuf,
    args: ArgumentBuilder,
    logger: Option<SharedLogger>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, args: ArgumentBuilder) -> Self {
        Self {
            program: program.into(),
            args,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<SharedLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &ArgumentBuilder {
        &self.args
    }

    fn spawn(&self) -> BridgeResult<Child> {
        log::debug!("spawn: {} {}", self.program.display(), self.args);
        Command::new(&self.program)
            .args(self.args.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BridgeError::Spawn {
                program: self.program.clone(),
                source,
            })
    }

    /// Spawn and return immediately. Output lines go to the logger as they
    /// arrive, or to the debug log when there is none.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> BridgeResult<LiveProcess> {
        let mut child = self.spawn()?;
        let label = tool_label(&self.program);
        let mut pumps = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            pumps.push(tokio::spawn(pump_lines(stdout, self.logger.clone(), label.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(tokio::spawn(pump_lines(stderr, self.logger.clone(), label)));
        }
        Ok(LiveProcess { child, pumps })
    }

    /// Spawn, wait for the child to terminate and capture all of its output.
    ///
    /// A non-zero exit is not an error here: it comes back as
    /// `success == false` with stderr populated. Only a failure to start the
    /// program (or to read its pipes) is raised.
    pub async fn wait_for_exit(&self) -> BridgeResult<ProcessResult> {
        let mut child = self.spawn()?;
        let logger = self.logger.as_deref();
        let (stdout, stderr) = tokio::join!(
            collect_lines(child.stdout.take(), logger),
            collect_lines(child.stderr.take(), logger)
        );
        let status = child.wait().await?;
        let result = ProcessResult {
            success: status.success(),
            exit_code: status.code(),
            stdout: stdout?,
            stderr: stderr?,
        };
        log::debug!(
            "{} exited with {:?} ({} stdout / {} stderr lines)",
            tool_label(&self.program),
            result.exit_code,
            result.stdout.len(),
            result.stderr.len()
        );
        Ok(result)
    }
}

/// Handle to a child started with [`ProcessRunner::start`]. Dropping it kills
/// the child.
pub struct LiveProcess {
    child: Child,
    pumps: Vec<JoinHandle<()>>,
}

impl LiveProcess {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the child to exit and for all of its output to be delivered.
    pub async fn wait(&mut self) -> BridgeResult<ExitStatus> {
        let status = self.child.wait().await?;
        for pump in self.pumps.drain(..) {
            let _ = pump.await;
        }
        Ok(status)
    }

    pub async fn kill(&mut self) -> BridgeResult<()> {
        self.child.kill().await?;
        for pump in self.pumps.drain(..) {
            pump.abort();
        }
        Ok(())
    }
}

fn tool_label(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

// Splits on '\n' and decodes lossily; adb on Windows emits CRLF and the
// occasional non UTF-8 byte from device properties.
fn decode_line(segment: &[u8]) -> String {
    let line = String::from_utf8_lossy(segment);
    line.strip_suffix('\r').unwrap_or(&line).to_string()
}

async fn collect_lines<R>(
    reader: Option<R>,
    logger: Option<&dyn ProcessLogger>,
) -> std::io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut collected = Vec::new();
    let Some(reader) = reader else {
        return Ok(collected);
    };
    let mut segments = BufReader::new(reader).split(b'\n');
    while let Some(segment) = segments.next_segment().await? {
        let line = decode_line(&segment);
        if let Some(logger) = logger {
            logger.on_line(&line);
        }
        collected.push(line);
    }
    Ok(collected)
}

async fn pump_lines<R>(reader: R, logger: Option<SharedLogger>, label: String)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut segments = BufReader::new(reader).split(b'\n');
    loop {
        match segments.next_segment().await {
            Ok(Some(segment)) => {
                let line = decode_line(&segment);
                match &logger {
                    Some(logger) => logger.on_line(&line),
                    None => log::debug!("[{label}] {line}"),
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::debug!("[{label}] output stream closed: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_line_strips_carriage_return() {
        assert_eq!(decode_line(b"device\r"), "device");
        assert_eq!(decode_line(b"plain"), "plain");
        assert_eq!(decode_line(b""), "");
    }

    #[test]
    fn tool_label_uses_file_name() {
        assert_eq!(tool_label(Path::new("/opt/sdk/platform-tools/adb")), "adb");
        assert_eq!(tool_label(Path::new("adb")), "adb");
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let runner = ProcessRunner::new(
            "definitely-not-a-real-tool-4f1c",
            ArgumentBuilder::new().append("devices"),
        );
        let err = runner.wait_for_exit().await.unwrap_err();
        assert!(err.is_tool_missing(), "unexpected error: {err}");
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::sync::{Arc, Mutex};

        fn sh(script: &str) -> ProcessRunner {
            ProcessRunner::new("sh", ArgumentBuilder::new().append("-c").append(script))
        }

        #[tokio::test]
        async fn captures_stdout_lines_in_order() {
            let result = sh("printf 'one\\ntwo\\n'").wait_for_exit().await.unwrap();
            assert!(result.success);
            assert_eq!(result.exit_code, Some(0));
            assert_eq!(result.stdout, vec!["one", "two"]);
            assert!(result.stderr.is_empty());
        }

        #[tokio::test]
        async fn non_zero_exit_is_not_an_error() {
            let result = sh("echo boom >&2; exit 3").wait_for_exit().await.unwrap();
            assert!(!result.success);
            assert_eq!(result.exit_code, Some(3));
            assert_eq!(result.stderr, vec!["boom"]);
        }

        #[tokio::test]
        async fn quoted_argument_reaches_child_as_one_value() {
            let runner = ProcessRunner::new(
                "sh",
                ArgumentBuilder::new()
                    .append("-c")
                    .append("printf '%s\\n' \"$1\"")
                    .append("sh")
                    .append_quoted("has spaces"),
            );
            let result = runner.wait_for_exit().await.unwrap();
            assert_eq!(result.stdout, vec!["has spaces"]);
        }

        #[tokio::test]
        async fn wait_for_exit_forwards_lines_to_logger() {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = seen.clone();
            let logger: SharedLogger = Arc::new(move |line: &str| {
                sink.lock().unwrap().push(line.to_string());
            });
            let result = sh("echo a; echo b")
                .with_logger(Some(logger))
                .wait_for_exit()
                .await
                .unwrap();
            assert_eq!(result.stdout, vec!["a", "b"]);
            assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
        }

        #[tokio::test]
        async fn start_streams_to_logger() {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = seen.clone();
            let logger: SharedLogger = Arc::new(move |line: &str| {
                sink.lock().unwrap().push(line.to_string());
            });
            let mut live = sh("echo first; echo second")
                .with_logger(Some(logger))
                .start()
                .unwrap();
            assert!(live.id().is_some());
            let status = live.wait().await.unwrap();
            assert!(status.success());
            assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
        }

        #[tokio::test]
        async fn kill_terminates_live_process() {
            let mut live = sh("sleep 30").start().unwrap();
            live.kill().await.unwrap();
            let status = live.wait().await.unwrap();
            assert!(!status.success());
        }
    }
}
