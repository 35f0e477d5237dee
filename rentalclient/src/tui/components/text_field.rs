use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Position,
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::component::RenderProps;

/// Single line text input with a movable cursor
#[derive(Clone, Debug, Default)]
pub struct TextField {
    label: String,
    char_index: usize,
    input: String,
}

impl TextField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            char_index: 0,
            input: String::new(),
        }
    }

    pub fn with_value(label: &str, value: &str) -> Self {
        let mut field = Self::new(label);
        field.input = value.to_string();
        field.char_index = value.chars().count();

        field
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cursor_left(&mut self) {
        let moved_left = self.char_index.saturating_sub(1);
        self.char_index = self.clamp_cursor(moved_left);
    }

    pub fn cursor_right(&mut self) {
        let moved_right = self.char_index.saturating_add(1);
        self.char_index = self.clamp_cursor(moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input.insert(index, new_char);
        self.cursor_right();
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.char_index)
            .unwrap_or(self.input.len())
    }

    pub fn delete_char(&mut self) {
        let not_leftmost = self.char_index != 0;
        if not_leftmost {
            let curr_index = self.char_index;
            let from_left = curr_index - 1;

            let before_del = self.input.chars().take(from_left);
            let after_del = self.input.chars().skip(curr_index);

            self.input = before_del.chain(after_del).collect();
            self.cursor_left();
        }
    }

    fn clamp_cursor(&self, new_pos: usize) -> usize {
        new_pos.clamp(0, self.input.chars().count())
    }

    /// Editing keys only; Enter, Tab and Esc belong to the owner
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        match key.code {
            KeyCode::Char(to_insert) => {
                self.enter_char(to_insert);
            }
            KeyCode::Backspace => {
                self.delete_char();
            }
            KeyCode::Left => {
                self.cursor_left();
            }
            KeyCode::Right => {
                self.cursor_right();
            }
            KeyCode::Home => {
                self.char_index = 0;
            }
            KeyCode::End => {
                self.char_index = self.input.chars().count();
            }
            _ => return false,
        }

        true
    }

    pub fn render(&self, frame: &mut Frame, props: RenderProps, focused: bool) {
        let color = match focused {
            true => Color::Green,
            false => Color::Gray,
        };

        let input = Paragraph::new(self.input.as_str())
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .title(self.label())
                    .borders(Borders::ALL)
                    .fg(props.border_color),
            );
        frame.render_widget(input, props.area);

        if focused {
            frame.set_cursor_position(Position::new(
                props.area.x + self.char_index as u16 + 1,
                props.area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn edits_at_cursor() {
        let mut field = TextField::new("Name");
        for c in "mtrix".chars() {
            field.handle_key_event(key(KeyCode::Char(c)));
        }
        for _ in 0..4 {
            field.handle_key_event(key(KeyCode::Left));
        }
        field.handle_key_event(key(KeyCode::Char('a')));

        assert_eq!(field.value(), "matrix");

        field.handle_key_event(key(KeyCode::End));
        field.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(field.value(), "matri");
    }

    #[test]
    fn leaves_control_keys_alone() {
        let mut field = TextField::with_value("Id", "12");

        assert!(!field.handle_key_event(key(KeyCode::Enter)));
        assert!(!field.handle_key_event(key(KeyCode::Tab)));
        assert!(!field.handle_key_event(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(field.value(), "12");
    }
}
