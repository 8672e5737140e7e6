pub mod list;
pub mod terminal;

use async_trait::async_trait;
use ratatui::style::Color;

use crate::error::Result;

/// One entry of a select or checkbox prompt. Labels are plain text; color and
/// weight are applied by the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub color: Option<Color>,
    pub bold: bool,
    pub checked: bool,
    pub disabled: bool,
    pub separator: bool,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: None,
            bold: false,
            checked: false,
            disabled: false,
            separator: false,
        }
    }

    pub fn separator() -> Self {
        Self {
            separator: true,
            ..Self::new("")
        }
    }

    pub fn color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn selectable(&self) -> bool {
        !self.disabled && !self.separator
    }
}

/// Interactive question surface. Answers are indices into the given choices.
#[async_trait]
pub trait Prompter: Send {
    /// Single choice. `default` is where the cursor starts; `wrap` lets navigation
    /// loop around the ends of the list.
    async fn select(
        &mut self,
        message: &str,
        choices: &[Choice],
        default: Option<usize>,
        wrap: bool,
    ) -> Result<usize>;

    /// Multiple choice with entries pre-checked per [`Choice::checked`].
    /// Returns checked indices in list order.
    async fn checkbox(&mut self, message: &str, choices: &[Choice], wrap: bool) -> Result<Vec<usize>>;
}
