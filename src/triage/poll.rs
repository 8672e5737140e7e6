use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::issue::Issue;
use crate::tracker::IssueTracker;
use crate::ui::console::Console;

/// Suspension between poll attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub tasks: Vec<Issue>,
    pub attempts: u32,
    /// False when attempts ran out before every expected task showed up.
    pub complete: bool,
}

/// Poll until at least one linked task per kind name exists, or attempts run out.
///
/// Running out is not an error: the last (short) result is returned so the caller
/// can carry on with whatever was created.
pub async fn wait_for_linked_tasks(
    tracker: &dyn IssueTracker,
    pause: &dyn Pause,
    console: &Console,
    policy: &PollPolicy,
    issue_key: &str,
    kind_names: &[String],
) -> Result<PollOutcome> {
    let expected = kind_names.len();
    let mut tasks = Vec::new();

    for attempt in 1..=policy.attempts {
        tasks = tracker.find_linked_tasks(issue_key, kind_names).await?;
        debug!(issue = issue_key, attempt, found = tasks.len(), expected, "polled linked tasks");
        if tasks.len() >= expected {
            return Ok(PollOutcome {
                tasks,
                attempts: attempt,
                complete: true,
            });
        }
        if attempt < policy.attempts {
            console.line("Waiting for tasks to be created...");
            pause.pause(policy.interval).await;
        }
    }

    warn!(issue = issue_key, found = tasks.len(), expected, "gave up waiting for linked tasks");
    console.warning(&format!(
        "Only {} of {expected} tasks showed up for {issue_key}, continuing with those.",
        tasks.len()
    ));
    Ok(PollOutcome {
        tasks,
        attempts: policy.attempts,
        complete: false,
    })
}
