use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueType {
    Task,
    Bug,
    Story,
    Epic,
    Other(String),
}

impl IssueType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Task" => IssueType::Task,
            "Bug" => IssueType::Bug,
            "Story" => IssueType::Story,
            "Epic" => IssueType::Epic,
            other => IssueType::Other(other.to_string()),
        }
    }

    /// Glyph shown in front of the issue key. Unknown types print their name.
    pub fn glyph(&self) -> &str {
        match self {
            IssueType::Task => "\u{2611}\u{FE0F}",
            IssueType::Bug => "\u{1F41B}",
            IssueType::Story => "\u{1F381}",
            IssueType::Epic => "\u{26A1}",
            IssueType::Other(name) => name,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::Task => f.write_str("Task"),
            IssueType::Bug => f.write_str("Bug"),
            IssueType::Story => f.write_str("Story"),
            IssueType::Epic => f.write_str("Epic"),
            IssueType::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Read-only snapshot of a remote issue.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    pub kind: IssueType,
    pub status: String,
    pub summary: String,
    pub assignee: Option<Assignee>,
    pub components: Vec<String>,
    /// Raw story points as stored remotely, not necessarily on the [`Size`] scale.
    ///
    /// [`Size`]: crate::model::size::Size
    pub estimate: Option<f64>,
    pub priority: Option<String>,
    pub severity: Option<String>,
}

impl Issue {
    pub fn assignee_email(&self) -> Option<&str> {
        self.assignee.as_ref().and_then(|a| a.email.as_deref())
    }

    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().and_then(|a| a.display_name.as_deref())
    }
}
