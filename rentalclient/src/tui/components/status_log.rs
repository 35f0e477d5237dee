use super::component::{Component, ComponentRender, RenderProps};
use crate::state_handler::{Action, ClientState};

use crate::tui::TextType;
use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListDirection},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// Scrolling log of notifications, newest at the bottom
pub struct StatusLog {
    print_buffer: Vec<TextType>,
    title: String,
}

impl Component for StatusLog {
    fn new(state: &ClientState, _action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        Self {
            print_buffer: state.notifications.clone(),
            title: state.api_url.clone(),
        }
    }

    fn update(self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        Self {
            print_buffer: state.notifications.clone(),
            title: state.api_url.clone(),
        }
    }

    fn handle_key_event(&mut self, _key: KeyEvent) -> bool {
        false
    }
}

impl ComponentRender<RenderProps> for StatusLog {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let title = match self.title.is_empty() {
            true => String::from("DVD RENTAL"),
            false => format!("DVD RENTAL - {}", self.title),
        };

        let text = List::new(
            self.print_buffer
                .iter()
                .rev()
                .map(|line| match line {
                    TextType::Notification { text } => {
                        let style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

                        Line::from(text.as_str()).style(style)
                    }
                    TextType::Error { text } => {
                        let style = Style::new()
                            .fg(Color::LightRed)
                            .add_modifier(Modifier::BOLD);

                        Line::from(text.as_str()).style(style)
                    }
                    TextType::Listing { text } => {
                        let style = Style::new().fg(Color::White);

                        Line::from(text.as_str()).style(style)
                    }
                })
                .collect::<Vec<_>>(),
        )
        .direction(ListDirection::BottomToTop)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .fg(props.border_color),
        );

        frame.render_widget(text, props.area);
    }
}
