use ratatui::style::Color;

use super::theme::Palette;
use crate::model::issue::Issue;
use crate::model::sprint::Sprint;

/// User-facing output between prompts.
pub struct Console {
    palette: Palette,
}

impl Console {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn line(&self, text: &str) {
        println!("{text}");
    }

    pub fn success(&self, text: &str) {
        println!("{}", self.palette.paint(text, Color::Green));
    }

    pub fn warning(&self, text: &str) {
        println!("{}", self.palette.paint(text, Color::Yellow));
    }

    pub fn issue(&self, issue: &Issue, url: &str) {
        println!("{}", self.issue_card(issue, url));
    }

    /// Three-line issue summary framed by blank lines.
    pub fn issue_card(&self, issue: &Issue, url: &str) -> String {
        let p = &self.palette;
        let components = if issue.components.is_empty() {
            "NO COMPONENT".to_string()
        } else {
            issue.components.join(", ")
        };
        // Priority and severity only show up when the remote has them.
        let rating: String = [issue.priority.as_deref(), issue.severity.as_deref()]
            .into_iter()
            .flatten()
            .map(|r| format!(" [{r}]"))
            .collect();
        format!(
            "\n{} {}{} - {} - {}\n{} - {}\nSee more: {}\n",
            issue.kind.glyph(),
            issue.key,
            p.dim(&rating),
            p.bold(&p.status(&issue.status)),
            p.italic(issue.assignee_name().unwrap_or_default()),
            p.underline(&components),
            p.italic(&issue.summary),
            p.italic(&p.underline(url)),
        )
    }

    /// Uncolored, so prompt rows can style it as a whole.
    pub fn sprint_label(&self, sprint: &Sprint) -> String {
        let state = &sprint.state;
        match sprint.date_range() {
            Some(range) => format!("{} ({state}, {range})", sprint.name),
            None => format!("{} ({state})", sprint.name),
        }
    }
}
