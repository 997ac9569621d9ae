//! Subprocess command runner on tokio

use crate::command::{CancelFlag, CommandError, CommandOutput, CommandRunner, OutputSink, OutputStream};
use crate::core::CommandSpec;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// How often the runner checks the cancel flag while a command runs
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs commands as real subprocesses, streaming their output line by line
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    /// Create a new subprocess runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(
        &self,
        command: &CommandSpec,
        timeout: Option<Duration>,
        sink: Option<&dyn OutputSink>,
        cancel: &CancelFlag,
    ) -> Result<CommandOutput, CommandError> {
        debug!("Spawning subprocess: {}", command);

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::Launch {
                program: command.program.clone(),
                reason: e.to_string(),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CommandError::Internal("missing stdout handle".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CommandError::Internal("missing stderr handle".to_string()))?;

        // Both pipes are drained concurrently while waiting, so a chatty tool
        // can't deadlock on a full pipe buffer.
        let run = async {
            let (out, err) = tokio::join!(
                drain_lines(stdout, OutputStream::Stdout, sink),
                drain_lines(stderr, OutputStream::Stderr, sink),
            );
            let status = child
                .wait()
                .await
                .map_err(|e| CommandError::Internal(e.to_string()))?;
            Ok::<_, CommandError>((status, out, err))
        };
        tokio::pin!(run);

        let cancelled = async {
            while !cancel.is_cancelled() {
                tokio::time::sleep(CANCEL_POLL_INTERVAL).await;
            }
        };
        tokio::pin!(cancelled);

        // kill_on_drop reaps the child on the early-return paths
        let (status, out, err) = if let Some(bound) = timeout {
            tokio::select! {
                result = &mut run => result?,
                _ = &mut cancelled => {
                    warn!("Cancelled while running: {}", command);
                    return Err(CommandError::Cancelled);
                }
                _ = tokio::time::sleep(bound) => {
                    warn!("Timed out after {:?}: {}", bound, command);
                    return Err(CommandError::Timeout(bound.as_secs()));
                }
            }
        } else {
            tokio::select! {
                result = &mut run => result?,
                _ = &mut cancelled => {
                    warn!("Cancelled while running: {}", command);
                    return Err(CommandError::Cancelled);
                }
            }
        };

        let exit_code = status.code().unwrap_or(-1);
        debug!("Subprocess exited with code {}: {}", exit_code, command);

        let mut output = out;
        output.push_str(&err);

        Ok(CommandOutput { exit_code, output })
    }
}

/// Read a stream to the end, forwarding each line to the sink and collecting
/// the full text.
async fn drain_lines<R>(reader: R, stream: OutputStream, sink: Option<&dyn OutputSink>) -> String
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut collected = String::new();

    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(sink) = sink {
            sink.on_line(stream, &line);
        }
        collected.push_str(&line);
        collected.push('\n');
    }

    collected
}
