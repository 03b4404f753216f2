// Recording executor for unit tests: returns canned results in order and
// remembers every invocation.
use super::args::ArgumentBuilder;
use super::executor::ProcessExecutor;
use super::logger::{ProcessLogger, SharedLogger};
use super::runner::LiveProcess;
use super::types::ProcessResult;
use crate::error::{BridgeError, BridgeResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub tokens: Vec<String>,
}

#[derive(Default)]
pub struct FakeExecutor {
    responses: Mutex<VecDeque<BridgeResult<ProcessResult>>>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, result: ProcessResult) -> Self {
        self.responses.lock().unwrap().push_back(Ok(result));
        self
    }

    pub fn respond_err(self, err: BridgeError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tokens(&self, index: usize) -> Vec<String> {
        self.calls()[index].tokens.clone()
    }

    fn record(&self, program: &Path, args: &ArgumentBuilder) {
        self.calls.lock().unwrap().push(Invocation {
            program: program.to_path_buf(),
            tokens: args.tokens(),
        });
    }
}

pub fn not_found(program: &str) -> BridgeError {
    BridgeError::Spawn {
        program: PathBuf::from(program),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    }
}

impl ProcessExecutor for FakeExecutor {
    async fn wait_for_exit(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<ProcessResult> {
        self.record(program, &args);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessResult::succeeded(Vec::new())));
        if let (Ok(result), Some(logger)) = (&next, logger) {
            for line in result.stdout.iter().chain(result.stderr.iter()) {
                logger.on_line(line);
            }
        }
        next
    }

    fn start(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        _logger: Option<SharedLogger>,
    ) -> BridgeResult<LiveProcess> {
        self.record(program, &args);
        Err(not_found(&program.to_string_lossy()))
    }
}
