use std::io::{self, Write};

use async_trait::async_trait;
use crossterm::cursor;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;
use ratatui::text::{Line, Span};
use ratatui::widgets::{HighlightSpacing, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};

use super::list::ChoiceList;
use super::{Choice, Prompter};
use crate::error::{Error, Result};
use crate::ui::theme::Palette;

const PAGE_SIZE: usize = 10;

/// List prompts drawn in an inline viewport below the cursor.
pub struct TerminalPrompter {
    palette: Palette,
    page_size: usize,
}

impl TerminalPrompter {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            page_size: PAGE_SIZE,
        }
    }

    async fn run(&self, message: &str, mut list: ChoiceList, multi: bool) -> Result<ChoiceList> {
        if !list.has_selectable() {
            return Err(Error::Prompt(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("nothing to choose from for \"{message}\""),
            )));
        }

        let _raw = RawMode::enable()?;
        let height = viewport_height(list.choices().len(), self.page_size);
        let mut terminal = Terminal::with_options(
            CrosstermBackend::new(io::stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?;
        let mut view = ListState::default();
        let mut events = EventStream::new();

        let outcome = loop {
            view.select(Some(list.cursor()));
            terminal.draw(|frame| render(frame, &self.palette, message, &list, multi, &mut view))?;
            let event = match events.next().await {
                Some(event) => event?,
                None => break Err(Error::Interrupted),
            };
            let Event::Key(key) = event else { continue };
            match key_to_prompt_key(key) {
                Some(PromptKey::Up) => list.up(),
                Some(PromptKey::Down) => list.down(),
                Some(PromptKey::Toggle) if multi => list.toggle(),
                Some(PromptKey::Submit) => break Ok(()),
                Some(PromptKey::Interrupt) => break Err(Error::Interrupted),
                _ => {}
            }
        };

        // Leaves the cursor at the top of the wiped viewport for the answer line.
        terminal.clear()?;
        outcome.map(|_| list)
    }

    fn answered(&self, message: &str, answer: &str) {
        println!(
            "{} {} {}",
            self.palette.paint("\u{2714}", Color::Green),
            self.palette.bold(message),
            self.palette.paint(answer, Color::Cyan)
        );
    }
}

/// Prompt line, visible rows and hint line.
fn viewport_height(choices: usize, page_size: usize) -> u16 {
    (choices.min(page_size) + 2) as u16
}

/// Restores the terminal however the prompt ends.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = show_cursor(&mut io::stdout());
        let _ = disable_raw_mode();
    }
}

/// The inline viewport hides the cursor while drawing.
fn show_cursor(out: &mut impl Write) -> io::Result<()> {
    execute!(out, cursor::Show)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKey {
    Up,
    Down,
    Toggle,
    Submit,
    Interrupt,
}

fn key_to_prompt_key(key: KeyEvent) -> Option<PromptKey> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows SIGINT, so Ctrl+C arrives as a key.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(PromptKey::Interrupt);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(PromptKey::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(PromptKey::Down),
        KeyCode::Char(' ') => Some(PromptKey::Toggle),
        KeyCode::Enter => Some(PromptKey::Submit),
        _ => None,
    }
}

fn render(
    frame: &mut Frame,
    palette: &Palette,
    message: &str,
    list: &ChoiceList,
    multi: bool,
    view: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Line::from(vec![
        Span::styled("? ", palette.style(Some(Color::Green), false)),
        Span::styled(message, palette.style(None, true)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let items: Vec<ListItem> = list
        .choices()
        .iter()
        .map(|choice| choice_item(palette, choice, multi))
        .collect();
    let rows = List::new(items)
        .highlight_symbol("\u{276F} ")
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(palette.style(Some(Color::Cyan), false));
    frame.render_stateful_widget(rows, chunks[1], view);

    let hint = if multi {
        "(\u{2191}\u{2193} move, space toggle, enter submit)"
    } else {
        "(\u{2191}\u{2193} move, enter select)"
    };
    frame.render_widget(Paragraph::new(Span::styled(hint, palette.dim_style())), chunks[2]);
}

fn choice_item<'a>(palette: &Palette, choice: &'a Choice, multi: bool) -> ListItem<'a> {
    if choice.separator {
        return ListItem::new(Span::styled("\u{2500}".repeat(14), palette.dim_style()));
    }
    let mark = match (multi, choice.selectable(), choice.checked) {
        (false, _, _) => "",
        (true, false, _) => "- ",
        (true, true, true) => "\u{25C9} ",
        (true, true, false) => "\u{25EF} ",
    };
    let label = if choice.disabled {
        Span::styled(format!("{} (disabled)", choice.label), palette.dim_style())
    } else {
        Span::styled(choice.label.as_str(), palette.style(choice.color, choice.bold))
    };
    ListItem::new(Line::from(vec![Span::raw(mark), label]))
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select(
        &mut self,
        message: &str,
        choices: &[Choice],
        default: Option<usize>,
        wrap: bool,
    ) -> Result<usize> {
        let list = ChoiceList::new(choices, default, wrap);
        let list = self.run(message, list, false).await?;
        let picked = list.cursor();
        self.answered(message, &choices[picked].label);
        Ok(picked)
    }

    async fn checkbox(&mut self, message: &str, choices: &[Choice], wrap: bool) -> Result<Vec<usize>> {
        let list = ChoiceList::new(choices, None, wrap);
        let list = self.run(message, list, true).await?;
        let picked = list.checked();
        let labels: Vec<&str> = picked.iter().map(|&i| choices[i].label.as_str()).collect();
        self.answered(message, &labels.join(", "));
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Render once into an in-memory terminal and return its rows, right-trimmed.
    fn rows(
        message: &str,
        choices: &[Choice],
        default: Option<usize>,
        multi: bool,
        width: u16,
    ) -> Vec<String> {
        let list = ChoiceList::new(choices, default, false);
        let mut view = ListState::default();
        view.select(Some(list.cursor()));
        let height = viewport_height(choices.len(), PAGE_SIZE);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(frame, &Palette::new(false), message, &list, multi, &mut view))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn arrows_and_vim_keys_navigate() {
        assert_eq!(key_to_prompt_key(press(KeyCode::Up)), Some(PromptKey::Up));
        assert_eq!(key_to_prompt_key(press(KeyCode::Char('j'))), Some(PromptKey::Down));
        assert_eq!(key_to_prompt_key(press(KeyCode::Char(' '))), Some(PromptKey::Toggle));
        assert_eq!(key_to_prompt_key(press(KeyCode::Enter)), Some(PromptKey::Submit));
        assert_eq!(key_to_prompt_key(press(KeyCode::Char('q'))), None);
    }

    #[test]
    fn ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_prompt_key(key), Some(PromptKey::Interrupt));
    }

    #[test]
    fn viewport_fits_prompt_and_hint() {
        assert_eq!(viewport_height(4, 10), 6);
        assert_eq!(viewport_height(30, 10), 12);
    }

    #[test]
    fn cursor_is_shown_again_on_restore() {
        let mut out = Vec::new();
        show_cursor(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?25h");
    }

    #[test]
    fn checkbox_rendering() {
        let choices = vec![
            Choice::new("DEV Task").checked(true),
            Choice::new("Upstream"),
            Choice::separator(),
            Choice::new("SKIP"),
        ];
        let rows = rows("Split RHEL-1 into following tasks:", &choices, None, true, 50);
        assert_eq!(rows[0], "? Split RHEL-1 into following tasks:");
        assert_eq!(rows[1], "\u{276F} \u{25C9} DEV Task");
        assert_eq!(rows[2], "  \u{25EF} Upstream");
        assert!(rows[3].starts_with("  \u{2500}"));
        assert_eq!(rows[4], "  \u{25EF} SKIP");
        assert_eq!(rows[5], "(\u{2191}\u{2193} move, space toggle, enter submit)");
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn disabled_entries_are_marked() {
        let choices = vec![Choice::new("Sprint 42"), Choice::new("Backlog").disabled()];
        let rows = rows("Pick", &choices, None, false, 40);
        assert_eq!(rows[2], "  Backlog (disabled)");
    }

    #[test]
    fn wide_labels_are_clipped_not_wrapped() {
        let choices = vec![
            Choice::new("Sprint 42 (future, 10-01 \u{2192} 10-14) with a very long name"),
            Choice::new("Sprint 43"),
        ];
        let rows = rows("Pick", &choices, None, false, 20);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("\u{276F} Sprint 42"));
        assert!(rows[1].chars().count() <= 20);
        assert_eq!(rows[2], "  Sprint 43");
    }

    #[test]
    fn long_lists_scroll_to_the_cursor() {
        let choices: Vec<Choice> = (0..20).map(|i| Choice::new(format!("#{i}"))).collect();
        let rows = rows("Pick", &choices, Some(15), false, 20);
        assert_eq!(rows.len(), 12);
        assert!(rows.contains(&"\u{276F} #15".to_string()));
        assert!(!rows.contains(&"  #0".to_string()));
    }
}
