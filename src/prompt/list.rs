use super::Choice;

/// Cursor and check state of a prompt list. The cursor only ever rests on
/// selectable entries. Scrolling is left to the widget rendering it.
#[derive(Debug, Clone)]
pub struct ChoiceList {
    choices: Vec<Choice>,
    cursor: usize,
    wrap: bool,
}

impl ChoiceList {
    pub fn new(choices: &[Choice], default: Option<usize>, wrap: bool) -> Self {
        let choices = choices.to_vec();
        let first = choices.iter().position(Choice::selectable);
        let cursor = default
            .filter(|&i| choices.get(i).is_some_and(Choice::selectable))
            .or(first)
            .unwrap_or(0);
        Self {
            choices,
            cursor,
            wrap,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_selectable(&self) -> bool {
        self.choices.iter().any(Choice::selectable)
    }

    pub fn up(&mut self) {
        self.step(false);
    }

    pub fn down(&mut self) {
        self.step(true);
    }

    fn step(&mut self, forward: bool) {
        let len = self.choices.len();
        let mut i = self.cursor;
        for _ in 0..len {
            i = if forward {
                if i + 1 < len {
                    i + 1
                } else if self.wrap {
                    0
                } else {
                    return;
                }
            } else if i > 0 {
                i - 1
            } else if self.wrap {
                len - 1
            } else {
                return;
            };
            if self.choices[i].selectable() {
                self.cursor = i;
                return;
            }
        }
    }

    pub fn toggle(&mut self) {
        if let Some(choice) = self.choices.get_mut(self.cursor) {
            if choice.selectable() {
                choice.checked = !choice.checked;
            }
        }
    }

    pub fn checked(&self) -> Vec<usize> {
        self.choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.selectable() && c.checked)
            .map(|(i, _)| i)
            .collect()
    }
}
