use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use super::component::RenderProps;
use crate::state_handler::{Action, Route};

/// One selectable row; rows without a route are shown but do nothing
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub label: String,
    pub route: Option<Route>,
}

impl Item {
    pub fn new(label: String, route: Route) -> Self {
        Self {
            label,
            route: Some(route),
        }
    }
}

/// Vertical list of items that navigates to the selected item's route
pub struct ItemList {
    items: Vec<Item>,
    selected: usize,
    action_tx: UnboundedSender<Action>,
}

impl ItemList {
    pub fn new(items: Vec<Item>, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            items,
            selected: 0,
            action_tx,
        }
    }

    /// Swaps the rows while keeping the selection in range
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Enter => {
                if let Some(route) = self.selected().and_then(|item| item.route.clone()) {
                    let _ = self.action_tx.send(Action::Navigate { route });
                }
            }
            _ => return false,
        }

        true
    }

    pub fn render(&self, frame: &mut Frame, props: RenderProps, title: &str, focused: bool) {
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(Line::from(item.label.as_str())))
            .collect();

        let highlight = match focused {
            true => Style::new()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            false => Style::new().fg(Color::Cyan),
        };

        let list = List::new(rows)
            .highlight_style(highlight)
            .highlight_symbol("> ")
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .fg(props.border_color),
            );

        let mut list_state = ListState::default().with_selected(match self.items.is_empty() {
            true => None,
            false => Some(self.selected),
        });
        frame.render_stateful_widget(list, props.area, &mut list_state);
    }
}
