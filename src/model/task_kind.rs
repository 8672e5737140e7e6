use serde::Deserialize;

/// A spawnable sub-task template.
///
/// `id` is what the automation-link field expects on creation, `name` is what the
/// created task carries in its summary as `[name]: ...`. Both are needed to find the
/// task again after the remote creates it, so they must describe the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskKind {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub checked: bool,
    /// Whether created tasks of this kind get the estimate/sprint follow-up.
    #[serde(default = "default_follow_up")]
    pub follow_up: bool,
}

fn default_follow_up() -> bool {
    true
}

impl TaskKind {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            checked: false,
            follow_up: true,
        }
    }

    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    pub fn without_follow_up(mut self) -> Self {
        self.follow_up = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCatalog {
    kinds: Vec<TaskKind>,
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self::new(vec![
            TaskKind::new(39396, "DEV Task").checked(),
            TaskKind::new(39400, "QE Task").checked().without_follow_up(),
            TaskKind::new(39395, "Upstream"),
            TaskKind::new(40950, "Root Cause Analysis Task"),
            TaskKind::new(39398, "Preliminary Testing Task"),
            TaskKind::new(48270, "Integration Testing"),
        ])
    }
}

impl TaskCatalog {
    pub fn new(kinds: Vec<TaskKind>) -> Self {
        Self { kinds }
    }

    pub fn kinds(&self) -> &[TaskKind] {
        &self.kinds
    }

    /// Names of the kinds checked by default. Issues already linked to tasks of
    /// these kinds count as split.
    pub fn default_names(&self) -> Vec<String> {
        self.kinds
            .iter()
            .filter(|k| k.checked)
            .map(|k| k.name.clone())
            .collect()
    }
}
