use super::component::{remote_status, success_line, Component, ComponentRender, RenderProps};
use super::text_field::TextField;
use crate::state_handler::{Action, ClientState, FormKind, PageState};

use common::model::CustomerFields;
use common::RemoteState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// Stack of text fields with one focused at a time
#[derive(Clone, Debug, Default)]
pub struct FieldGroup {
    fields: Vec<TextField>,
    focus: usize,
}

impl FieldGroup {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|field| field.value())
            .unwrap_or_default()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Tab and arrows move between fields, the rest goes to the focused one
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            _ => {
                return match self.fields.get_mut(self.focus) {
                    Some(field) => field.handle_key_event(key),
                    None => false,
                }
            }
        }

        true
    }

    pub fn height(&self) -> u16 {
        self.fields.len() as u16 * 3
    }

    pub fn render(&self, frame: &mut Frame, props: RenderProps) {
        let rows = Layout::vertical(vec![Constraint::Length(3); self.fields.len()]).split(props.area);

        for (index, (field, area)) in self.fields.iter().zip(rows.iter()).enumerate() {
            field.render(
                frame,
                RenderProps {
                    area: *area,
                    border_color: props.border_color,
                },
                index == self.focus,
            );
        }
    }
}

fn customer_fields(group: &FieldGroup, offset: usize) -> CustomerFields {
    CustomerFields {
        store_id: group.value(offset).to_string(),
        first_name: group.value(offset + 1).to_string(),
        last_name: group.value(offset + 2).to_string(),
        email: group.value(offset + 3).to_string(),
        address_id: group.value(offset + 4).to_string(),
    }
}

fn customer_inputs() -> Vec<TextField> {
    ["Store ID", "First Name", "Last Name", "Email", "Address ID"]
        .into_iter()
        .map(TextField::new)
        .collect()
}

/// Result line of a form submission
pub fn outcome_line(state: &RemoteState<String>) -> Option<Line<'static>> {
    match state {
        RemoteState::Success(message) => Some(success_line(message.clone())),
        other => remote_status(other),
    }
}

/// Create, update, delete and return forms
pub struct FormPage {
    kind: Option<FormKind>,
    title: &'static str,
    group: FieldGroup,
    outcome: Option<Line<'static>>,
    action_tx: UnboundedSender<Action>,
}

impl FormPage {
    /// Whether the form identifies its target by id, and the id is missing
    fn is_disabled(&self) -> bool {
        match self.kind {
            Some(FormKind::AddCustomer) | None => false,
            Some(_) => self.group.value(0).trim().is_empty(),
        }
    }

    fn submit(&mut self) {
        if self.is_disabled() {
            return;
        }

        let action = match self.kind {
            Some(FormKind::AddCustomer) => Action::AddCustomer {
                fields: customer_fields(&self.group, 0),
            },
            Some(FormKind::EditCustomer) => Action::EditCustomer {
                id: self.group.value(0).to_string(),
                fields: customer_fields(&self.group, 1),
            },
            Some(FormKind::DeleteCustomer) => Action::DeleteCustomer {
                id: self.group.value(0).to_string(),
            },
            Some(FormKind::ReturnMovie) => Action::ReturnMovie {
                rental_id: self.group.value(0).to_string(),
            },
            None => return,
        };

        let _ = self.action_tx.send(action);
    }
}

impl Component for FormPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (kind, prefill, outcome) = match &state.page {
            PageState::Form(form) => (Some(form.kind), form.prefill, outcome_line(form.result.state())),
            _ => (None, None, None),
        };
        let customer_id = |label: &str| match prefill {
            Some(id) => TextField::with_value(label, &id.to_string()),
            None => TextField::new(label),
        };

        let fields = match kind {
            Some(FormKind::AddCustomer) => customer_inputs(),
            Some(FormKind::EditCustomer) => {
                let mut fields = vec![customer_id("Customer ID")];
                fields.extend(customer_inputs());
                fields
            }
            Some(FormKind::DeleteCustomer) => vec![customer_id("Customer ID")],
            Some(FormKind::ReturnMovie) => vec![TextField::new("Rental ID")],
            None => vec![],
        };

        Self {
            kind,
            title: state.route.title(),
            group: FieldGroup::new(fields),
            outcome,
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        if let PageState::Form(form) = &state.page {
            self.outcome = outcome_line(form.result.state());
        }

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.submit();
                true
            }
            _ => self.group.handle_key_event(key),
        }
    }

    fn is_editing(&self) -> bool {
        true
    }
}

impl ComponentRender<RenderProps> for FormPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(props.border_color));
        let inner = block.inner(props.area);
        frame.render_widget(block, props.area);

        let layout = Layout::vertical([
            Constraint::Length(self.group.height()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        self.group.render(
            frame,
            RenderProps {
                area: layout[0],
                border_color: props.border_color,
            },
        );

        let hint = match self.is_disabled() {
            true => Line::from("Enter an ID to submit").style(Style::default().fg(Color::DarkGray)),
            false => Line::from("Press Enter to submit").style(Style::default().fg(Color::Gray)),
        };
        frame.render_widget(Paragraph::new(hint), layout[1]);

        if let Some(outcome) = &self.outcome {
            frame.render_widget(Paragraph::new(outcome.clone()), layout[2]);
        }
    }
}
