use crossterm::style::{style, Stylize};
use ratatui::style::{Color, Modifier, Style};

use crate::model::size::Size;
use crate::model::sprint::SprintState;

pub fn size_color(size: Size) -> (Color, bool) {
    match size {
        Size::Zero => (Color::Gray, false),
        Size::One | Size::Two => (Color::Green, false),
        Size::Three => (Color::Yellow, false),
        Size::Five => (Color::Yellow, true),
        Size::Eight => (Color::Red, false),
        Size::Thirteen => (Color::Red, true),
    }
}

pub fn task_kind_color(name: &str) -> Option<Color> {
    match name {
        "DEV Task" | "Upstream" | "Root Cause Analysis Task" => Some(Color::Green),
        "QE Task" => Some(Color::Yellow),
        "Preliminary Testing Task" | "Integration Testing" => Some(Color::Blue),
        _ => None,
    }
}

pub fn status_color(status: &str) -> Option<Color> {
    match status {
        "New" | "Planning" => Some(Color::Cyan),
        "In Progress" => Some(Color::Blue),
        "Integration" | "Release Pending" => Some(Color::Green),
        _ => None,
    }
}

pub fn sprint_state_color(state: &SprintState) -> Color {
    match state {
        SprintState::Active => Color::Green,
        _ => Color::Yellow,
    }
}

/// Styles text and widgets unless color output is off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style(text).with(color.into()).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn italic(&self, text: &str) -> String {
        if self.color {
            style(text).italic().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn underline(&self, text: &str) -> String {
        if self.color {
            style(text).underlined().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn status(&self, status: &str) -> String {
        match status_color(status) {
            Some(color) => self.paint(status, color),
            None => status.to_string(),
        }
    }

    /// Widget style for prompt rows; plain when color output is off.
    pub fn style(&self, color: Option<Color>, bold: bool) -> Style {
        if !self.color {
            return Style::default();
        }
        let mut style = Style::default();
        if let Some(color) = color {
            style = style.fg(color);
        }
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn dim_style(&self) -> Style {
        if self.color {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        }
    }
}
