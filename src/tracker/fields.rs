use serde::Deserialize;

/// Remote field identifiers for the logical fields the tool reads and writes.
/// Custom field ids differ between deployments, so they come from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub assignee: String,
    pub size: String,
    pub sprint: String,
    pub automation: String,
    pub priority: String,
    pub severity: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            assignee: "assignee".into(),
            size: "customfield_12310243".into(),
            sprint: "customfield_12310940".into(),
            automation: "customfield_12316240".into(),
            priority: "priority".into(),
            severity: "customfield_12316142".into(),
        }
    }
}

impl FieldMap {
    /// Projection used for sprint and backlog listings.
    pub fn listing(&self) -> Vec<&str> {
        vec![
            "id",
            "issuetype",
            "status",
            "summary",
            "assignee",
            self.priority.as_str(),
            "components",
            self.size.as_str(),
            self.severity.as_str(),
        ]
    }

    /// Projection used when looking up freshly created tasks.
    pub fn linked_task(&self) -> Vec<&str> {
        vec![
            "id",
            "issuetype",
            "status",
            "components",
            "summary",
            "assignee",
            self.size.as_str(),
        ]
    }
}
