use crate::state_handler::{Action, ClientState};
use common::RemoteState;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

pub struct RenderProps {
    pub area: Rect,
    pub border_color: Color,
}

pub trait Component {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized;

    fn update(self, state: &ClientState) -> Self
    where
        Self: Sized;

    /// Returns false when the key was left for the router to handle
    fn handle_key_event(&mut self, key: KeyEvent) -> bool;

    /// True while the component is taking free text, so single letter
    /// shortcuts must not fire
    fn is_editing(&self) -> bool {
        false
    }
}

pub trait ComponentRender<Props> {
    fn render(&self, frame: &mut Frame, props: Props);
}

/// Line describing a slot that has no data to show yet
pub fn remote_status<T>(state: &RemoteState<T>) -> Option<Line<'static>> {
    match state {
        RemoteState::Idle => None,
        RemoteState::Loading => Some(Line::from("Loading...").style(
            Style::new()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
        RemoteState::Success(_) => None,
        RemoteState::Failure(reason) => Some(error_line(reason.clone())),
    }
}

pub fn error_line(text: String) -> Line<'static> {
    Line::from(text).style(
        Style::new()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn success_line(text: String) -> Line<'static> {
    Line::from(text).style(
        Style::new()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    )
}

/// "Label: value" row of a detail page; missing values render empty
pub fn detail_line(label: &'static str, value: Option<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.unwrap_or_default()),
    ])
}
