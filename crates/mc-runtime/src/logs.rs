// SPDX-License-Identifier: Apache-2.0

//! Streaming `docker logs -f` until the container exits or the operator hits Ctrl-C.

use std::io;
use std::process::Stdio;

use tracing::{debug, info};

use crate::lifecycle::LifecycleError;

/// How a log-following session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// The log stream closed on its own, with the runtime's exit code.
    Ended(Option<i32>),
    /// The operator interrupted the stream.
    Interrupted,
}

/// Follows the container's logs on the current terminal.
///
/// Runs on a current-thread tokio runtime so the child can be raced against
/// Ctrl-C. An interrupt is a normal outcome, not an error.
pub fn follow_logs(program: &str, container: &str) -> Result<FollowOutcome, LifecycleError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| spawn_error(io::Error::other(format!("failed to build tokio runtime: {e}"))))?;

    runtime.block_on(follow(program, container))
}

async fn follow(program: &str, container: &str) -> Result<FollowOutcome, LifecycleError> {
    info!(container, "following container logs");
    let mut child = tokio::process::Command::new(program)
        .args(["logs", "-f", container])
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_error)?;

    let outcome = tokio::select! {
        status = child.wait() => FollowOutcome::Ended(status.map_err(spawn_error)?.code()),
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(spawn_error)?;
            FollowOutcome::Interrupted
        }
    };

    if outcome == FollowOutcome::Interrupted {
        debug!("log stream interrupted, terminating follower");
        let _ = child.kill().await;
    }
    Ok(outcome)
}

fn spawn_error(source: io::Error) -> LifecycleError {
    LifecycleError::Spawn {
        verb: "logs".to_string(),
        source,
    }
}
