//! Interactive triage: pick a sprint (or the backlog), then walk its issues one by
//! one, splitting each into linked tasks, sizing those tasks and finally dropping
//! the parent from its sprint.

pub mod poll;


use ratatui::style::Color;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::issue::Issue;
use crate::model::size::Size;
use crate::model::sprint::SprintState;
use crate::model::task_kind::{TaskCatalog, TaskKind};
use crate::model::update::{FieldUpdate, IssueUpdate};
use crate::prompt::{Choice, Prompter};
use crate::tracker::IssueTracker;
use crate::ui::console::Console;
use crate::ui::theme::{size_color, sprint_state_color, task_kind_color};
use poll::{Pause, PollPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Sprint(u64),
    Backlog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `split` counts issues that were split and dropped, not skipped ones.
    Completed { split: usize },
    NoIssues,
    /// The user picked EXIT.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IssueOutcome {
    Split,
    Skipped,
    Exit,
}

enum Decision {
    Split(Vec<TaskKind>),
    Skip,
    Exit,
}

#[derive(Debug, Clone)]
pub struct TriageOptions {
    pub board_id: u64,
    pub assignee: Option<String>,
    /// Go straight to the board backlog instead of asking for a sprint.
    pub backlog: bool,
    pub poll: PollPolicy,
}

pub struct Triage<'a> {
    tracker: &'a dyn IssueTracker,
    prompter: &'a mut dyn Prompter,
    pause: &'a dyn Pause,
    console: &'a Console,
    catalog: &'a TaskCatalog,
    options: TriageOptions,
}

impl<'a> Triage<'a> {
    pub fn new(
        tracker: &'a dyn IssueTracker,
        prompter: &'a mut dyn Prompter,
        pause: &'a dyn Pause,
        console: &'a Console,
        catalog: &'a TaskCatalog,
        options: TriageOptions,
    ) -> Self {
        Self {
            tracker,
            prompter,
            pause,
            console,
            catalog,
            options,
        }
    }

    pub async fn run(&mut self) -> Result<Outcome> {
        let version = self.tracker.server_version().await?;
        debug!(%version, "connected to Jira");

        let source = self.select_source().await?;
        let issues = self.fetch_issues(source).await?;
        if issues.is_empty() {
            self.console.success("No issues found.");
            return Ok(Outcome::NoIssues);
        }
        info!(count = issues.len(), ?source, "triaging issues");

        let mut split = 0;
        for issue in &issues {
            let outcome = self.triage_issue(issue, source).await?;
            debug!(issue = %issue.key, ?outcome, "issue done");
            match outcome {
                IssueOutcome::Exit => return Ok(Outcome::Aborted),
                IssueOutcome::Split => split += 1,
                IssueOutcome::Skipped => {}
            }
        }

        Ok(Outcome::Completed { split })
    }

    async fn select_source(&mut self) -> Result<Source> {
        if self.options.backlog {
            return Ok(Source::Backlog);
        }

        let board = self.options.board_id;
        let sprints = self.tracker.list_sprints(board).await?;
        if sprints.is_empty() {
            self.console
                .warning(&format!("No active or future sprints on board {board}, using the backlog."));
            return Ok(Source::Backlog);
        }

        let mut choices: Vec<Choice> = sprints
            .iter()
            .map(|s| {
                Choice::new(self.console.sprint_label(s)).color(Some(sprint_state_color(&s.state)))
            })
            .collect();
        choices.push(Choice::new("Backlog").bold(true).disabled());
        let default = sprints.iter().position(|s| s.state == SprintState::Future);

        let picked = self
            .prompter
            .select("Pick issues to process from sprint or backlog", &choices, default, false)
            .await?;
        Ok(sprints
            .get(picked)
            .map(|s| Source::Sprint(s.id))
            .unwrap_or(Source::Backlog))
    }

    async fn fetch_issues(&self, source: Source) -> Result<Vec<Issue>> {
        let assignee = self.options.assignee.as_deref();
        match source {
            Source::Sprint(id) => self.tracker.list_sprint_issues(id, assignee, true).await,
            Source::Backlog => {
                self.tracker
                    .list_backlog_issues(self.options.board_id, assignee)
                    .await
            }
        }
    }

    async fn triage_issue(&mut self, issue: &Issue, source: Source) -> Result<IssueOutcome> {
        self.console.issue(issue, &self.tracker.issue_url(&issue.key));

        let kinds = match self.choose_kinds(issue).await? {
            Decision::Exit => return Ok(IssueOutcome::Exit),
            Decision::Skip => return Ok(IssueOutcome::Skipped),
            Decision::Split(kinds) => kinds,
        };

        if !kinds.is_empty() {
            let ids: Vec<u64> = kinds.iter().map(|k| k.id).collect();
            let names: Vec<String> = kinds.iter().map(|k| k.name.clone()).collect();
            self.tracker.create_sub_tasks(&issue.key, &ids).await?;

            let polled = poll::wait_for_linked_tasks(
                self.tracker,
                self.pause,
                self.console,
                &self.options.poll,
                &issue.key,
                &names,
            )
            .await?;
            debug!(
                issue = %issue.key,
                attempts = polled.attempts,
                complete = polled.complete,
                "linked tasks ready"
            );

            for task in &polled.tasks {
                if skips_follow_up(&kinds, task) {
                    debug!(task = %task.key, "no follow-up for this kind");
                    continue;
                }
                self.follow_up(issue, task, source).await?;
            }
        }

        let palette = self.console.palette();
        self.console.line(&format!(
            "Dropping {} from sprint and setting story points to {}...",
            palette.bold(&issue.key),
            palette.bold("0")
        ));
        self.tracker
            .update_issue(&issue.key, &IssueUpdate::drop_from_sprint())
            .await?;
        Ok(IssueOutcome::Split)
    }

    /// Task kinds to spawn. EXIT wins over SKIP, and both win over checked kinds.
    async fn choose_kinds(&mut self, issue: &Issue) -> Result<Decision> {
        let catalog = self.catalog;
        let kinds = catalog.kinds();
        let mut choices: Vec<Choice> = kinds
            .iter()
            .map(|k| {
                Choice::new(&k.name)
                    .color(task_kind_color(&k.name))
                    .checked(k.checked)
            })
            .collect();
        choices.push(Choice::separator());
        let skip_at = choices.len();
        choices.push(Choice::new("SKIP"));
        let exit_at = choices.len();
        choices.push(Choice::new("EXIT"));

        let message = format!("Split {} into following tasks:", issue.key);
        let picked = self.prompter.checkbox(&message, &choices, false).await?;

        if picked.contains(&exit_at) {
            return Ok(Decision::Exit);
        }
        if picked.contains(&skip_at) {
            return Ok(Decision::Skip);
        }
        Ok(Decision::Split(
            picked.iter().filter_map(|&i| kinds.get(i)).cloned().collect(),
        ))
    }

    /// Size a created task, assign it to the parent's assignee and optionally put
    /// it in the chosen sprint.
    async fn follow_up(&mut self, parent: &Issue, task: &Issue, source: Source) -> Result<()> {
        let palette = self.console.palette();
        self.console.line(&palette.italic(&task.summary));

        let default_size = parent
            .estimate
            .and_then(Size::from_estimate)
            .unwrap_or(Size::DEFAULT);
        let size_choices: Vec<Choice> = Size::ALL
            .iter()
            .map(|&s| {
                let (color, bold) = size_color(s);
                Choice::new(s.to_string()).color(Some(color)).bold(bold)
            })
            .collect();
        let default_at = Size::ALL.iter().position(|&s| s == default_size);
        let picked = self
            .prompter
            .select("Story Points", &size_choices, default_at, false)
            .await?;
        let size = Size::ALL.get(picked).copied().unwrap_or(default_size);

        let yes_no = [
            Choice::new("Yes").color(Some(Color::Green)),
            Choice::new("No").color(Some(Color::Red)),
        ];
        let add_to_sprint = self
            .prompter
            .select("Add to sprint", &yes_no, Some(0), false)
            .await?
            == 0;

        // The backlog has no sprint to add to.
        let sprint = match (add_to_sprint, source) {
            (true, Source::Sprint(id)) => FieldUpdate::Set(id),
            _ => FieldUpdate::Unset,
        };
        let update = IssueUpdate {
            assignee: parent.assignee_email().map(String::from).into(),
            size: FieldUpdate::Set(size),
            sprint,
        };
        self.tracker.update_issue(&task.key, &update).await
    }
}

/// A created task is left alone when its summary names one of the chosen kinds
/// that opts out of the follow-up.
fn skips_follow_up(chosen: &[TaskKind], task: &Issue) -> bool {
    chosen
        .iter()
        .any(|k| !k.follow_up && task.summary.contains(&k.name))
}
