use super::component::{remote_status, Component, ComponentRender, RenderProps};
use super::form::{outcome_line, FieldGroup};
use super::text_field::TextField;
use crate::state_handler::{Action, ClientState, PageState, Route};

use common::model::CustomerRental;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

/// A customer's rental history; `t` opens a return form for the highlighted rental
pub struct CustomerDetailsPage {
    customer_id: u32,
    rentals: Vec<CustomerRental>,
    return_form: Option<FieldGroup>,
    submitted: bool,
    status: Option<Line<'static>>,
    outcome: Option<Line<'static>>,
    selected: usize,
    action_tx: UnboundedSender<Action>,
}

fn page_data(
    state: &ClientState,
) -> (u32, Vec<CustomerRental>, Option<Line<'static>>, Option<Line<'static>>) {
    match &state.page {
        PageState::CustomerDetails(page) => (
            page.customer_id,
            page.rentals.data().cloned().unwrap_or_default(),
            remote_status(page.rentals.state()),
            outcome_line(page.returned.state()),
        ),
        _ => (0, vec![], None, None),
    }
}

impl CustomerDetailsPage {
    fn navigate(&self, route: Route) {
        let _ = self.action_tx.send(Action::Navigate { route });
    }

    fn submit(&mut self) {
        let Some(form) = &self.return_form else {
            return;
        };

        let rental_id = form.value(0).trim().to_string();
        if rental_id.is_empty() {
            return;
        }

        self.submitted = self.action_tx.send(Action::ReturnMovie { rental_id }).is_ok();
    }
}

impl Component for CustomerDetailsPage {
    fn new(state: &ClientState, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let (customer_id, rentals, status, outcome) = page_data(state);

        Self {
            customer_id,
            rentals,
            return_form: None,
            submitted: false,
            status,
            outcome,
            selected: 0,
            action_tx,
        }
    }

    fn update(mut self, state: &ClientState) -> Self
    where
        Self: Sized,
    {
        let (customer_id, rentals, status, outcome) = page_data(state);
        self.selected = self.selected.min(rentals.len().saturating_sub(1));
        self.customer_id = customer_id;
        self.rentals = rentals;
        self.status = status;
        self.outcome = outcome;

        let returned = match &state.page {
            PageState::CustomerDetails(page) => page.returned.data().is_some(),
            _ => false,
        };
        if self.submitted && returned {
            self.return_form = None;
            self.submitted = false;
        }

        self
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if let Some(form) = self.return_form.as_mut() {
            match key.code {
                KeyCode::Esc => self.return_form = None,
                KeyCode::Enter => self.submit(),
                _ => return form.handle_key_event(key),
            }

            return true;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rentals.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('t') => {
                let rental_id = self.rentals.get(self.selected).and_then(|r| r.rental_id);
                if let Some(rental_id) = rental_id {
                    self.return_form = Some(FieldGroup::new(vec![TextField::with_value(
                        "Rental ID",
                        &rental_id.to_string(),
                    )]));
                    self.submitted = false;
                }
            }
            KeyCode::Char('e') => self.navigate(Route::EditCustomer(Some(self.customer_id))),
            KeyCode::Char('d') => self.navigate(Route::DeleteCustomer(Some(self.customer_id))),
            _ => return false,
        }

        true
    }

    fn is_editing(&self) -> bool {
        self.return_form.is_some()
    }
}

impl ComponentRender<RenderProps> for CustomerDetailsPage {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let form_height = self.return_form.as_ref().map_or(0, |form| form.height());
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .split(props.area);

        let heading = match (&self.status, self.rentals.first()) {
            (Some(status), _) => status.clone(),
            (None, Some(rental)) => Line::from(format!(
                "#{} {} {} {}",
                rental.customer_id,
                rental.first_name,
                rental.last_name,
                rental.email.as_deref().unwrap_or_default()
            ))
            .style(Style::new().add_modifier(Modifier::BOLD)),
            (None, None) => Line::from("No rentals for this customer."),
        };
        frame.render_widget(Paragraph::new(heading), layout[0]);

        let rows = self.rentals.iter().map(|rental| {
            let returned = match rental.is_returned() {
                true => Style::new(),
                false => Style::new().fg(Color::Yellow),
            };

            Row::new(vec![
                rental.rental_id.map(|id| id.to_string()).unwrap_or_default(),
                rental.title.clone().unwrap_or_default(),
                rental.rental_date.clone().unwrap_or_default(),
                rental.return_label(),
            ])
            .style(returned)
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        )
        .header(
            Row::new(vec!["Rental ID", "Title", "Rented", "Returned"])
                .style(Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::new().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .title(format!("Customer {}", self.customer_id))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(props.border_color)),
        );
        let mut table_state = TableState::default().with_selected(match self.rentals.is_empty() {
            true => None,
            false => Some(self.selected),
        });
        frame.render_stateful_widget(table, layout[1], &mut table_state);

        if let Some(form) = &self.return_form {
            form.render(
                frame,
                RenderProps {
                    area: layout[2],
                    border_color: props.border_color,
                },
            );
        }

        let footer = match (&self.outcome, &self.return_form) {
            (Some(outcome), _) => outcome.clone(),
            (None, Some(_)) => Line::from("Enter to return this rental, Esc to cancel"),
            (None, None) => Line::from("t returns the selected rental, e edits, d deletes")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(footer), layout[3]);
    }
}
