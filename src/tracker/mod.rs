pub mod fields;
pub mod jira;
pub mod jql;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::issue::Issue;
use crate::model::sprint::Sprint;
use crate::model::update::IssueUpdate;

/// Upper bound on issues returned by a single listing. Anything past it is dropped.
pub const MAX_RESULTS: u32 = 500;

/// Typed facade over the remote issue tracker. Implementations do not retry;
/// failures surface as they come.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn server_version(&self) -> Result<String>;

    /// Active and future sprints of a board, in remote order.
    async fn list_sprints(&self, board_id: u64) -> Result<Vec<Sprint>>;

    async fn list_sprint_issues(
        &self,
        sprint_id: u64,
        assignee: Option<&str>,
        exclude_issues_with_tasks: bool,
    ) -> Result<Vec<Issue>>;

    async fn list_backlog_issues(&self, board_id: u64, assignee: Option<&str>) -> Result<Vec<Issue>>;

    /// New tasks linked to `issue_key` whose summary carries one of the kind tags.
    /// An empty result is normal while the remote is still creating them.
    async fn find_linked_tasks(&self, issue_key: &str, kind_names: &[String]) -> Result<Vec<Issue>>;

    /// Ask the remote to spawn linked tasks of the given kinds. The tasks appear
    /// asynchronously and are not returned here.
    async fn create_sub_tasks(&self, issue_key: &str, kind_ids: &[u64]) -> Result<()>;

    async fn update_issue(&self, issue_key: &str, update: &IssueUpdate) -> Result<()>;

    fn issue_url(&self, issue_key: &str) -> String;
}
