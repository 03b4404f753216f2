use super::args::ArgumentBuilder;
use super::logger::SharedLogger;
use super::runner::{LiveProcess, ProcessRunner};
use super::types::ProcessResult;
use crate::error::BridgeResult;
use std::path::Path;

// Seam between the device bridge / tool client and the operating system.
#[allow(async_fn_in_trait)]
pub trait ProcessExecutor: Send + Sync {
    async fn wait_for_exit(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<ProcessResult>;

    fn start(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<LiveProcess>;
}

/// Spawns real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    async fn wait_for_exit(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<ProcessResult> {
        ProcessRunner::new(program, args)
            .with_logger(logger)
            .wait_for_exit()
            .await
    }

    fn start(
        &self,
        program: &Path,
        args: ArgumentBuilder,
        logger: Option<SharedLogger>,
    ) -> BridgeResult<LiveProcess> {
        ProcessRunner::new(program, args).with_logger(logger).start()
    }
}
