// Single-shot reachability check by running an echo probe (ping).

use crate::models::Reachability;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::instrument;

/// Extra wall-clock time granted on top of ping's own reply deadline.
const PING_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ReachabilityProbe {
    /// `ping -c 1 -W <timeout> <target>`.
    pub fn ping(target: &str, timeout: Duration) -> Self {
        let secs = timeout.as_secs().max(1);
        Self {
            program: "ping".into(),
            args: vec![
                "-c".into(),
                "1".into(),
                "-W".into(),
                secs.to_string(),
                target.to_string(),
            ],
            timeout: timeout + PING_GRACE,
        }
    }

    /// Run an arbitrary command as the probe; exit status 0 means reachable.
    pub fn with_command(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One attempt, no retry. Every failure maps to `Unhealthy` with non-empty details.
    #[instrument(skip(self), fields(probe = "reachability", command = %self.command_line()))]
    pub async fn check(&self) -> Reachability {
        let run = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output();
        match tokio::time::timeout(self.timeout, run).await {
            Err(_) => Reachability::unhealthy(format!(
                "Command '{}' timed out after {} ms",
                self.command_line(),
                self.timeout.as_millis()
            )),
            Ok(Err(e)) => Reachability::unhealthy(format!(
                "Command '{}' could not be started: {}",
                self.command_line(),
                e
            )),
            Ok(Ok(output)) => self.classify(output),
        }
    }

    fn classify(&self, output: Output) -> Reachability {
        if output.status.success() {
            return Reachability::healthy(String::from_utf8_lossy(&output.stdout));
        }
        let status = match output.status.code() {
            Some(code) => format!("returned non-zero exit status {}", code),
            None => "was terminated by a signal".to_string(),
        };
        let mut details = format!("Command '{}' {}.", self.command_line(), status);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            details.push(' ');
            details.push_str(stderr);
        }
        Reachability::unhealthy(details)
    }
}
